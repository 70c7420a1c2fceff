//! External collaborators and supporting services
//!
//! Everything the core talks to over a boundary lives here, behind a
//! trait so tests can substitute it:
//!
//! - [`analysis`] - AI analysis/chat collaborator (HTTP)
//! - [`transcode`] - image transcoding collaborator (HTTP, HEIC -> JPEG)
//! - [`image_store`] - on-disk staged image storage with hash dedup

pub mod analysis;
pub mod image_store;
pub mod transcode;

pub use analysis::{AnalysisError, AnalysisProvider, ChatMessage, HttpAnalysisProvider};
pub use image_store::{ImageStore, StagedImage};
pub use transcode::{HttpTranscoder, TranscodeError, Transcoder};
