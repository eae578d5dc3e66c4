pub mod base16384;
pub mod embedding;

pub use embedding::{encode_speaker_embedding, EmbeddingError};
