use chrono::Utc;
use uuid::Uuid;

/// Timestamp-seeded random file name, e.g. `20261018T101500123_9f3c2a7be01d44c8.wav`
pub fn unique_wav_name() -> String {
    let timestamp = Utc::now().format("%Y%m%dT%H%M%S%3f");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}.wav", timestamp, &suffix[..16])
}
