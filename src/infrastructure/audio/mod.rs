pub mod convert;
#[cfg(feature = "playback")]
pub mod playback;

use crate::domain::tts::TtsServiceError;
use async_trait::async_trait;
use std::path::Path;

pub use convert::convert_to_wav;
#[cfg(feature = "playback")]
pub use playback::RodioSink;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("unsupported audio source: {0}")]
    Unsupported(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("wav encoding error: {0}")]
    Encode(#[from] hound::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Destination for synthesized audio.
///
/// Implementations may block until the clip has finished playing.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, path: &Path) -> Result<(), TtsServiceError>;
}

/// Sink that only records the file in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl AudioSink for NullSink {
    async fn play(&self, path: &Path) -> Result<(), TtsServiceError> {
        tracing::info!(path = %path.display(), "Playback disabled, audio left on disk");
        Ok(())
    }
}
