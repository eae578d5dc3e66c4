use super::AudioError;
use std::fs::File;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode `source` (MP3, WAV, FLAC, OGG...) and write it to `target` as
/// 16-bit PCM WAV, keeping the source sample rate and channel layout.
///
/// The WAV is written next to `target` and renamed into place, so `target`
/// may be the source file itself.
pub fn convert_to_wav(source: &Path, target: &Path) -> Result<(), AudioError> {
    let staging = staging_path(target);
    match decode_into(source, &staging) {
        Ok(frames) => {
            std::fs::rename(&staging, target)?;
            tracing::debug!(
                source = %source.display(),
                target = %target.display(),
                frames = frames,
                "Audio converted to WAV"
            );
            Ok(())
        }
        Err(e) => {
            if staging.exists() {
                let _ = std::fs::remove_file(&staging);
            }
            Err(e)
        }
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.wav".to_string());
    target.with_file_name(format!(".{}.{}.part", name, Uuid::new_v4().simple()))
}

/// Decode `source` into a new WAV file at `target`, returning frames written
fn decode_into(source: &Path, target: &Path) -> Result<u64, AudioError> {
    let file = File::open(source)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::Unsupported(format!("{}: {}", source.display(), e)))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AudioError::Unsupported(format!("no audio track in {}", source.display())))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::Unsupported(e.to_string()))?;

    let mut writer: Option<hound::WavWriter<std::io::BufWriter<File>>> = None;
    let mut sample_buf: Option<SampleBuffer<i16>> = None;
    let mut frames_written: u64 = 0;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Corrupt frames are skipped
            Err(SymphoniaError::DecodeError(e)) => {
                tracing::debug!(error = e, "Skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(AudioError::Decode(e.to_string())),
        };

        let spec = *decoded.spec();
        if writer.is_none() {
            let wav_spec = hound::WavSpec {
                channels: spec.channels.count() as u16,
                sample_rate: spec.rate,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            };
            writer = Some(hound::WavWriter::create(target, wav_spec)?);
        }

        let buf = sample_buf.get_or_insert_with(|| SampleBuffer::new(decoded.capacity() as u64, spec));
        if buf.capacity() < decoded.capacity() * spec.channels.count() {
            *buf = SampleBuffer::new(decoded.capacity() as u64, spec);
        }
        buf.copy_interleaved_ref(decoded);

        if let Some(writer) = writer.as_mut() {
            for sample in buf.samples() {
                writer.write_sample(*sample)?;
            }
        }
        frames_written += (buf.samples().len() / spec.channels.count().max(1)) as u64;
    }

    match writer {
        Some(writer) => {
            writer.finalize()?;
            Ok(frames_written)
        }
        None => Err(AudioError::Decode(format!(
            "no audio decoded from {}",
            source.display()
        ))),
    }
}
