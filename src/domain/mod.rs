pub mod speaker;
pub mod tts;
