use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::UserRepository;
use crate::designs::InFlightAnalyses;
use crate::services::{
    AnalysisProvider, HttpAnalysisProvider, HttpTranscoder, ImageStore, Transcoder,
};

/// Server state - shared handles to every service
///
/// Cloning is shallow (Arc-backed); handlers receive it via axum `State`.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | db | embedded SurrealDB |
/// | jwt_service | token generation/validation |
/// | analysis | AI analysis/chat collaborator |
/// | transcoder | HEIC transcoding collaborator |
/// | image_store | staged upload storage |
/// | in_flight | per-project analysis generation tracking |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub analysis: Arc<dyn AnalysisProvider>,
    pub transcoder: Arc<dyn Transcoder>,
    pub image_store: ImageStore,
    pub in_flight: Arc<InFlightAnalyses>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("image_store", &self.image_store)
            .finish()
    }
}

impl ServerState {
    /// Initialize the full production state.
    ///
    /// Creates the work dir layout, opens the database, wires the HTTP
    /// collaborators and seeds the bootstrap admin.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("design.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let analysis: Arc<dyn AnalysisProvider> = Arc::new(
            HttpAnalysisProvider::new(
                config.analysis_url.clone(),
                Duration::from_millis(config.analysis_timeout_ms),
            )
            .expect("Failed to build analysis client"),
        );
        let transcoder: Arc<dyn Transcoder> = Arc::new(
            HttpTranscoder::new(
                config.transcode_url.clone(),
                Duration::from_millis(config.transcode_timeout_ms),
            )
            .expect("Failed to build transcode client"),
        );

        let state = Self::with_services(config.clone(), db_service.db, analysis, transcoder);
        state.seed_admin().await;
        state
    }

    /// Assemble state from pre-built services (tests substitute mocks here)
    pub fn with_services(
        config: Config,
        db: Surreal<Db>,
        analysis: Arc<dyn AnalysisProvider>,
        transcoder: Arc<dyn Transcoder>,
    ) -> Self {
        let image_store = ImageStore::new(&PathBuf::from(&config.work_dir));
        Self {
            config,
            db,
            jwt_service: Arc::new(JwtService::default()),
            analysis,
            transcoder,
            image_store,
            in_flight: Arc::new(InFlightAnalyses::new()),
        }
    }

    /// Seed the bootstrap admin account when no admin exists
    async fn seed_admin(&self) {
        let users = UserRepository::new(self.get_db());
        let password = match self.config.admin_password.clone() {
            Some(p) => p,
            None => {
                let generated = uuid::Uuid::new_v4().to_string();
                tracing::warn!(
                    password = %generated,
                    "ADMIN_PASSWORD not set, generated bootstrap admin password"
                );
                generated
            }
        };
        if let Err(e) = users.ensure_admin(&password).await {
            tracing::error!(error = %e, "Failed to seed bootstrap admin");
        }
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Work directory
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
