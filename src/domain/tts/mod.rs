pub mod dto;
pub mod error;
pub mod naming;
pub mod service;
pub mod speed;

pub use dto::{InferenceRequest, ReferenceAudio};
pub use error::TtsServiceError;
pub use naming::unique_wav_name;
pub use service::{TtsService, TtsServiceApi};
pub use speed::SpeedPreset;
