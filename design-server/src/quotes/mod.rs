//! Quote status state machine
//!
//! The only place that knows which transitions are legal:
//!
//! ```text
//! pending ──> approved ──> completed
//!    └──────> rejected
//! ```
//!
//! `rejected` and `completed` are terminal. Every status write goes
//! through [`check_transition`], so no handler compares status strings
//! on its own.

use crate::db::models::QuoteStatus;
use thiserror::Error;

/// Illegal transition, with both endpoints for the caller-visible message
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot move quote from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: QuoteStatus,
    pub to: QuoteStatus,
}

/// Legal targets reachable from `from` in one step
pub fn next_states(from: QuoteStatus) -> &'static [QuoteStatus] {
    match from {
        QuoteStatus::Pending => &[QuoteStatus::Approved, QuoteStatus::Rejected],
        QuoteStatus::Approved => &[QuoteStatus::Completed],
        QuoteStatus::Rejected | QuoteStatus::Completed => &[],
    }
}

/// Whether a single-step transition is legal
pub fn can_transition(from: QuoteStatus, to: QuoteStatus) -> bool {
    next_states(from).contains(&to)
}

/// Validate a transition, returning a typed error when illegal
pub fn check_transition(from: QuoteStatus, to: QuoteStatus) -> Result<(), TransitionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError { from, to })
    }
}

/// Whether a status accepts no further transitions
pub fn is_terminal(status: QuoteStatus) -> bool {
    next_states(status).is_empty()
}
