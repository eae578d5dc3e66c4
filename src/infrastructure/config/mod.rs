use crate::domain::tts::{ReferenceAudio, SpeedPreset};
use crate::error::AppError;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GPT-SoVITS server location must be set")]
    MissingServerLocation,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Everything the TTS client needs, read once and never mutated.
#[derive(Debug, Clone)]
pub struct TtsClientConfig {
    /// Base URL of the inference server. Required.
    pub server_location: String,
    /// Language of the text to synthesize (`text_language` on the wire)
    pub text_language: String,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
    pub speed: SpeedPreset,
    /// `Some` enables reference-audio prompting
    pub reference_audio: Option<ReferenceAudio>,
    /// Where archives are extracted and generated files are written
    pub work_dir: PathBuf,
    /// No timeout when `None`; a stalled server blocks the call indefinitely
    pub request_timeout: Option<Duration>,
}

impl TtsClientConfig {
    pub fn new(server_location: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            server_location: server_location.into(),
            text_language: "auto".to_string(),
            top_k: 5,
            top_p: 1.0,
            temperature: 1.0,
            speed: SpeedPreset::Normal,
            reference_audio: None,
            work_dir: work_dir.into(),
            request_timeout: None,
        }
    }

    /// Endpoint the request body is posted to
    pub fn endpoint(&self) -> Result<String, ConfigError> {
        let location = self.server_location.trim();
        if location.is_empty() {
            return Err(ConfigError::MissingServerLocation);
        }
        Ok(format!("{}?", location.trim_end_matches('/')))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tts: TtsClientConfig,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let server_location = env::var("GPTSOVITS_SERVER_LOCATION").unwrap_or_default();
        if server_location.trim().is_empty() {
            return Err(ConfigError::MissingServerLocation.into());
        }

        let text_language =
            env::var("GPTSOVITS_TEXT_LANGUAGE").unwrap_or_else(|_| "auto".to_string());

        let reference_audio = if parse_flag("GPTSOVITS_USE_REFERENCE_AUDIO") {
            let wav_path = env::var("GPTSOVITS_REFERENCE_AUDIO").map_err(|_| {
                AppError::Config(
                    "GPTSOVITS_REFERENCE_AUDIO is required when reference audio is enabled"
                        .to_string(),
                )
            })?;
            Some(ReferenceAudio {
                wav_path,
                prompt_text: env::var("GPTSOVITS_REFERENCE_AUDIO_TEXT").unwrap_or_default(),
                prompt_language: env::var("GPTSOVITS_REFERENCE_AUDIO_LANGUAGE")
                    .unwrap_or_else(|_| text_language.clone()),
            })
        } else {
            None
        };

        let tts = TtsClientConfig {
            server_location,
            text_language,
            top_k: parse_or("GPTSOVITS_TOP_K", 5)?,
            top_p: parse_or("GPTSOVITS_TOP_P", 1.0)?,
            temperature: parse_or("GPTSOVITS_TEMPERATURE", 1.0)?,
            speed: SpeedPreset::from_label(env::var("GPTSOVITS_SPEED").ok().as_deref()),
            reference_audio,
            work_dir: env::var("GPTSOVITS_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("work")),
            request_timeout: env::var("GPTSOVITS_REQUEST_TIMEOUT_SECS")
                .ok()
                .map(|raw| parse_value::<u64>("GPTSOVITS_REQUEST_TIMEOUT_SECS", &raw))
                .transpose()?
                .map(Duration::from_secs),
        };

        let log_format = env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .parse::<String>()
            .map(|s| match s.as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            })
            .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Config { tts, log_format })
    }
}

fn parse_flag(key: &str) -> bool {
    env::var(key)
        .map(|s| matches!(s.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid {} '{}': {}", key, raw, e)))
}
