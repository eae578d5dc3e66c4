use super::tts_repository::TtsRepository;
use crate::domain::tts::{InferenceRequest, TtsServiceError};
use crate::infrastructure::audio::convert_to_wav;
use crate::infrastructure::config::{ConfigError, TtsClientConfig};
use async_trait::async_trait;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zip::ZipArchive;

/// Longest slice of an error body kept in `HttpStatus` messages
const MAX_ERROR_BODY: usize = 512;

/// GPT-SoVITS implementation of TTS repository
pub struct GptSovitsTtsRepository {
    client: reqwest::Client,
    endpoint: String,
    config: TtsClientConfig,
}

impl GptSovitsTtsRepository {
    /// Fails immediately when no server location is configured
    pub fn new(config: TtsClientConfig) -> Result<Self, ConfigError> {
        let endpoint = config.endpoint()?;
        let client = build_client(reqwest::Client::builder(), config.request_timeout)?;

        tracing::info!(
            endpoint = %endpoint,
            text_language = %config.text_language,
            speed = %config.speed,
            reference_audio = config.reference_audio.is_some(),
            work_dir = %config.work_dir.display(),
            "GPT-SoVITS client initialized"
        );

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request body for `text`; reference fields only in reference mode
    pub fn build_request<'a>(&'a self, text: &'a str) -> InferenceRequest<'a> {
        InferenceRequest {
            text: [text],
            reference: self.config.reference_audio.as_ref(),
            text_language: &self.config.text_language,
            top_k: self.config.top_k,
            top_p: self.config.top_p,
            temperature: self.config.temperature,
            speed: self.config.speed.value(),
        }
    }

    /// POST the body and return the raw archive bytes
    async fn call_server(&self, text: &str) -> Result<Vec<u8>, TtsServiceError> {
        let body = self.build_request(text);

        tracing::info!(
            endpoint = %self.endpoint,
            text_language = %self.config.text_language,
            speed = body.speed,
            reference_audio = body.reference.is_some(),
            text_length = text.len(),
            "Calling GPT-SoVITS inference server"
        );
        tracing::debug!(body = ?body, "Inference request body");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = %self.endpoint, "Inference request failed");
                TtsServiceError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            let message: String = message.chars().take(MAX_ERROR_BODY).collect();
            tracing::error!(
                status = status.as_u16(),
                endpoint = %self.endpoint,
                message = %message,
                "Inference server returned an error status"
            );
            return Err(TtsServiceError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read inference response body");
            TtsServiceError::from(e)
        })?;

        tracing::debug!(archive_size = bytes.len(), "Inference archive received");
        Ok(bytes.to_vec())
    }
}

/// Apply the configured timeout and build the client; a client that cannot
/// honour the configuration is a construction error.
fn build_client(
    builder: reqwest::ClientBuilder,
    timeout: Option<Duration>,
) -> Result<reqwest::Client, ConfigError> {
    let builder = match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    };
    builder.build().map_err(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        ConfigError::HttpClient(e)
    })
}

/// Extract every entry of `archive` into `work_dir` and convert the first
/// one into a WAV file at `output_path`.
fn unpack_and_convert(
    archive: Vec<u8>,
    work_dir: &Path,
    output_path: &Path,
) -> Result<PathBuf, TtsServiceError> {
    let mut archive = ZipArchive::new(Cursor::new(archive))?;
    if archive.len() == 0 {
        return Err(TtsServiceError::MalformedResponse(
            "archive contains no entries".to_string(),
        ));
    }

    let first_entry = {
        let entry = archive.by_index(0)?;
        entry.enclosed_name().map(Path::to_path_buf).ok_or_else(|| {
            TtsServiceError::MalformedResponse(format!("unsafe entry path: {}", entry.name()))
        })?
    };

    std::fs::create_dir_all(work_dir)?;
    archive.extract(work_dir)?;

    let extracted = work_dir.join(&first_entry);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    convert_to_wav(&extracted, output_path)?;

    tracing::info!(
        entries = archive.len(),
        source = %extracted.display(),
        output = %output_path.display(),
        "Extracted inference archive"
    );

    Ok(output_path.to_path_buf())
}

#[async_trait]
impl TtsRepository for GptSovitsTtsRepository {
    async fn synthesize_to_file(
        &self,
        text: &str,
        output_path: &Path,
    ) -> Result<PathBuf, TtsServiceError> {
        let start_time = std::time::Instant::now();

        let archive = self.call_server(text).await?;
        let archive_size = archive.len();

        let work_dir = self.config.work_dir.clone();
        let output = output_path.to_path_buf();
        let path =
            tokio::task::spawn_blocking(move || unpack_and_convert(archive, &work_dir, &output))
                .await??;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "gptsovits",
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            archive_size_bytes = archive_size,
            output = %path.display(),
            "TTS synthesis completed"
        );

        Ok(path)
    }

    fn work_dir(&self) -> &Path {
        &self.config.work_dir
    }
}
