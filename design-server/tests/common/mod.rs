//! Shared test fixtures: in-memory state with mock collaborators
#![allow(dead_code)] // each test binary uses a different subset

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use design_server::core::{Config, ServerState};
use design_server::db::DbService;
use design_server::db::models::{ProjectType, Role, UserCreate};
use design_server::db::repository::UserRepository;
use design_server::services::{
    AnalysisError, AnalysisProvider, ChatMessage, TranscodeError, Transcoder,
};
use shared::design::AnalysisResult;
use tempfile::TempDir;

/// Canned analysis the mock returns for every image
pub fn canned_analysis() -> AnalysisResult {
    AnalysisResult {
        description: "Cocina compacta con buena luz natural".to_string(),
        style: "moderno".to_string(),
        materials: vec!["Laminado Blanco".to_string(), "Granito Gris".to_string()],
        colors: vec!["blanco".to_string(), "gris".to_string()],
        recommendations: vec!["ampliar la isla central".to_string()],
        extra: None,
    }
}

/// Analysis mock: counts calls, always succeeds
#[derive(Default)]
pub struct MockAnalysis {
    pub calls: AtomicUsize,
}

#[async_trait]
impl AnalysisProvider for MockAnalysis {
    async fn analyze(
        &self,
        _image: &[u8],
        _content_type: &str,
        _project_type: &ProjectType,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(canned_analysis())
    }

    async fn chat(&self, _messages: &[ChatMessage]) -> Result<String, AnalysisError> {
        Ok("Con gusto le ayudo con su proyecto".to_string())
    }
}

/// Analysis mock that always fails
pub struct FailingAnalysis;

#[async_trait]
impl AnalysisProvider for FailingAnalysis {
    async fn analyze(
        &self,
        _image: &[u8],
        _content_type: &str,
        _project_type: &ProjectType,
    ) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::Http("upstream unavailable".to_string()))
    }

    async fn chat(&self, _messages: &[ChatMessage]) -> Result<String, AnalysisError> {
        Err(AnalysisError::Http("upstream unavailable".to_string()))
    }
}

/// Transcoder mock: hands back a freshly encoded JPEG
pub struct MockTranscoder;

#[async_trait]
impl Transcoder for MockTranscoder {
    async fn transcode_to_jpeg(&self, _data: &[u8]) -> Result<Vec<u8>, TranscodeError> {
        Ok(test_jpeg(32))
    }
}

/// Transcoder mock that always fails
pub struct FailingTranscoder;

#[async_trait]
impl Transcoder for FailingTranscoder {
    async fn transcode_to_jpeg(&self, _data: &[u8]) -> Result<Vec<u8>, TranscodeError> {
        Err(TranscodeError::Http("decoder crashed".to_string()))
    }
}

/// Build an in-memory server state with the given mocks.
///
/// The TempDir must outlive the state (staged images live in it).
pub async fn test_state(
    analysis: Arc<dyn AnalysisProvider>,
    transcoder: Arc<dyn Transcoder>,
) -> (ServerState, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    config
        .ensure_work_dir_structure()
        .expect("work dir structure");
    let db = DbService::memory().await.expect("in-memory db");
    let state = ServerState::with_services(config, db.db, analysis, transcoder);
    (state, dir)
}

/// Default state: succeeding mocks
pub async fn default_state() -> (ServerState, TempDir) {
    test_state(Arc::new(MockAnalysis::default()), Arc::new(MockTranscoder)).await
}

/// A real JPEG payload of the given square dimension
pub fn test_jpeg(side: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(side, side, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 120])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    buf
}

/// A payload with HEIC magic bytes (content is irrelevant to the mocks)
pub fn fake_heic() -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x00, 0x18];
    data.extend_from_slice(b"ftypheic");
    data.extend_from_slice(&[0u8; 64]);
    data
}

/// Create a user with the given role, returning its "user:..." id
pub async fn create_user(state: &ServerState, username: &str, role: Role) -> String {
    let users = UserRepository::new(state.get_db());
    let user = users
        .create(UserCreate {
            username: username.to_string(),
            password: "contrasena-larga".to_string(),
            email: format!("{username}@example.com"),
            full_name: None,
            is_professional: false,
            role: Some(role),
        })
        .await
        .expect("create user");
    user.id.expect("user id").to_string()
}
