use async_trait::async_trait;
use gptsovits_client::domain::tts::{TtsService, TtsServiceError};
use gptsovits_client::infrastructure::audio::AudioSink;
use gptsovits_client::infrastructure::config::TtsClientConfig;
use gptsovits_client::infrastructure::repositories::GptSovitsTtsRepository;
use mockito::{Mock, Matcher, ServerGuard};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;


/// Sink that remembers what it was asked to play
#[derive(Default)]
pub struct RecordingSink {
    played: Mutex<Vec<PathBuf>>,
}

impl RecordingSink {
    pub fn played(&self) -> Vec<PathBuf> {
        self.played.lock().clone()
    }
}

#[async_trait]
impl AudioSink for RecordingSink {
    async fn play(&self, path: &Path) -> Result<(), TtsServiceError> {
        self.played.lock().push(path.to_path_buf());
        Ok(())
    }
}

pub struct TestContext {
    pub server: ServerGuard,
    pub work_dir: TempDir,
    pub sink: Arc<RecordingSink>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self {
            server: mockito::Server::new_async().await,
            work_dir: tempfile::tempdir().expect("Failed to create work dir"),
            sink: Arc::new(RecordingSink::default()),
        }
    }

    /// Client configuration pointing at the mock server
    pub fn config(&self) -> TtsClientConfig {
        let mut config = TtsClientConfig::new(self.server.url(), self.work_dir.path());
        config.text_language = "en".to_string();
        config
    }

    pub fn service(&self, config: TtsClientConfig) -> TtsService {
        let repo = GptSovitsTtsRepository::new(config).expect("Failed to build client");
        TtsService::new(Arc::new(repo), self.sink.clone())
    }

    /// Inference endpoint answering every POST with `archive`
    pub async fn mock_archive(&mut self, archive: Vec<u8>) -> Mock {
        self.server
            .mock("POST", Matcher::Any)
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .with_body(archive)
            .create_async()
            .await
    }
}
