use super::AudioSink;
use crate::domain::tts::TtsServiceError;
use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Plays audio on the default output device, returning once the clip ends
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioSink;

impl RodioSink {
    fn play_blocking(path: &Path) -> Result<(), TtsServiceError> {
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| TtsServiceError::Playback(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| TtsServiceError::Playback(e.to_string()))?;

        let file = File::open(path)?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| TtsServiceError::Playback(e.to_string()))?;
        sink.append(source);
        sink.sleep_until_end();

        Ok(())
    }
}

#[async_trait]
impl AudioSink for RodioSink {
    async fn play(&self, path: &Path) -> Result<(), TtsServiceError> {
        tracing::info!(path = %path.display(), "Playing synthesized audio");
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::play_blocking(&path)).await?
    }
}
