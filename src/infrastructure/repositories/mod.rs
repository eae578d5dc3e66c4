pub mod gptsovits_tts_repository;
pub mod tts_repository;

pub use gptsovits_tts_repository::GptSovitsTtsRepository;
pub use tts_repository::TtsRepository;
