//! Client for a GPT-SoVITS text-to-speech inference server.
//!
//! [`TtsService`](domain::tts::TtsService) posts text to the server, unpacks
//! the zip archive it answers with and leaves a WAV file in the working
//! directory, optionally handing it to an [`AudioSink`](infrastructure::audio::AudioSink).
//! [`encode_speaker_embedding`](domain::speaker::encode_speaker_embedding)
//! turns a speaker embedding into a compact text string.

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::speaker::{encode_speaker_embedding, EmbeddingError};
pub use domain::tts::{ReferenceAudio, SpeedPreset, TtsService, TtsServiceApi, TtsServiceError};
pub use error::{AppError, AppResult};
pub use infrastructure::config::{Config, ConfigError, TtsClientConfig};
pub use infrastructure::repositories::{GptSovitsTtsRepository, TtsRepository};
