use super::base16384;
use half::f16;
use ndarray::{ArrayBase, Data, Dimension};
use std::io::Write;
use liblzma::stream::{Filters, LzmaOptions, Stream};
use liblzma::write::XzEncoder;

/// liblzma's `LZMA_PRESET_EXTREME` flag
const PRESET_EXTREME: u32 = 0x8000_0000;
const PRESET_LEVEL: u32 = 9;

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("lzma error: {0}")]
    Compression(#[from] liblzma::stream::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Encode a speaker embedding into a compact, text-safe string.
///
/// Values are taken in logical (row-major) order, rounded to IEEE half
/// precision, written little-endian, compressed as a raw LZMA2 stream at
/// preset 9 | extreme and finally base16384-encoded. The output depends
/// only on the values, so equal tensors always yield equal strings.
pub fn encode_speaker_embedding<S, D>(embedding: &ArrayBase<S, D>) -> Result<String, EmbeddingError>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    let mut raw = Vec::with_capacity(embedding.len() * 2);
    for value in embedding.iter() {
        raw.extend_from_slice(&f16::from_f32(*value).to_le_bytes());
    }

    let compressed = compress_raw_lzma2(&raw)?;
    let encoded = base16384::encode(&compressed);

    tracing::debug!(
        elements = embedding.len(),
        raw_bytes = raw.len(),
        compressed_bytes = compressed.len(),
        encoded_chars = encoded.chars().count(),
        "Speaker embedding encoded"
    );

    Ok(encoded)
}

fn compress_raw_lzma2(data: &[u8]) -> Result<Vec<u8>, EmbeddingError> {
    let options = LzmaOptions::new_preset(PRESET_LEVEL | PRESET_EXTREME)?;
    let mut filters = Filters::new();
    filters.lzma2(&options);
    let stream = Stream::new_raw_encoder(&filters)?;

    let mut encoder = XzEncoder::new_stream(Vec::new(), stream);
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
