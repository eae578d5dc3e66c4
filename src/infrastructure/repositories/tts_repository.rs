use crate::domain::tts::TtsServiceError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Repository for TTS synthesis operations.
/// Abstracts the remote inference server.
///
/// Implementations are responsible for:
/// - Building the provider-specific request body
/// - Unpacking whatever container the provider answers with
/// - Leaving a WAV file at the requested path
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize `text` and write the result as WAV to `output_path`
    ///
    /// Returns `output_path` on success.
    ///
    /// # Errors
    /// Network failures and non-2xx statuses are reported as
    /// `Network`/`HttpStatus`; unusable payloads as `MalformedResponse` or
    /// `Conversion`.
    async fn synthesize_to_file(
        &self,
        text: &str,
        output_path: &Path,
    ) -> Result<PathBuf, TtsServiceError>;

    /// Directory used for intermediate and generated files
    fn work_dir(&self) -> &Path;
}
