use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/studio/design | work directory (db, uploads, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ANALYSIS_URL | http://localhost:3101 | AI analysis collaborator |
/// | TRANSCODE_URL | http://localhost:3102 | image transcoding collaborator |
/// | ANALYSIS_TIMEOUT_MS | 30000 | analysis deadline per submission |
/// | TRANSCODE_TIMEOUT_MS | 15000 | transcoding deadline |
/// | ADMIN_PASSWORD | (none) | bootstrap admin password |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/studio HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory for database, staged uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === External collaborators ===
    /// AI analysis/chat service base URL
    pub analysis_url: String,
    /// Image transcoding service base URL
    pub transcode_url: String,
    /// Overall analysis deadline per submission (milliseconds)
    pub analysis_timeout_ms: u64,
    /// Transcoding deadline (milliseconds)
    pub transcode_timeout_ms: u64,

    /// Bootstrap admin password; when unset a random one is generated
    /// and logged once at first start
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/studio/design".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            analysis_url: std::env::var("ANALYSIS_URL")
                .unwrap_or_else(|_| "http://localhost:3101".into()),
            transcode_url: std::env::var("TRANSCODE_URL")
                .unwrap_or_else(|_| "http://localhost:3102".into()),
            analysis_timeout_ms: std::env::var("ANALYSIS_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
            transcode_timeout_ms: std::env::var("TRANSCODE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15_000),

            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override selected values (tests)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Database directory under the work dir
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Log directory under the work dir
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Ensure the work directory layout exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        std::fs::create_dir_all(PathBuf::from(&self.work_dir).join("uploads/images"))?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
