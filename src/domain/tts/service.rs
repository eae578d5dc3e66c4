use super::error::TtsServiceError;
use super::naming::unique_wav_name;
use crate::infrastructure::audio::AudioSink;
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    sink: Arc<dyn AudioSink>,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, sink: Arc<dyn AudioSink>) -> Self {
        Self { tts_repo, sink }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize `text` into a WAV file at `output_path`
    ///
    /// Returns the path of the written file. A failed request is logged by
    /// the repository and surfaces as `Network` or `HttpStatus`; nothing is
    /// retried.
    async fn synthesize_to_file(
        &self,
        text: &str,
        output_path: &Path,
    ) -> Result<PathBuf, TtsServiceError>;

    /// Synthesize `text` into a freshly named file in the working directory
    /// and play it through the configured sink.
    ///
    /// Returns the path that was played.
    async fn synthesize_and_play(&self, text: &str) -> Result<PathBuf, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize_to_file(
        &self,
        text: &str,
        output_path: &Path,
    ) -> Result<PathBuf, TtsServiceError> {
        tracing::info!(
            text_length = text.len(),
            output = %output_path.display(),
            "TTS synthesis request"
        );

        self.tts_repo.synthesize_to_file(text, output_path).await
    }

    async fn synthesize_and_play(&self, text: &str) -> Result<PathBuf, TtsServiceError> {
        let output_path = self.tts_repo.work_dir().join(unique_wav_name());

        let path = self.synthesize_to_file(text, &output_path).await?;
        self.sink.play(&path).await?;

        Ok(path)
    }
}
