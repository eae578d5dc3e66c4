use crate::infrastructure::audio::AudioError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("request to inference server failed: {0}")]
    Network(String),
    #[error("inference server returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("audio conversion failed: {0}")]
    Conversion(String),
    #[error("playback failed: {0}")]
    Playback(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TtsServiceError {
    /// Failures that happened before a usable response arrived
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus { .. })
    }
}

/// Status codes are checked on the response itself, so whatever reqwest
/// reports is a transport failure.
impl From<reqwest::Error> for TtsServiceError {
    fn from(err: reqwest::Error) -> Self {
        TtsServiceError::Network(err.to_string())
    }
}

impl From<zip::result::ZipError> for TtsServiceError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => TtsServiceError::Io(e),
            other => TtsServiceError::MalformedResponse(other.to_string()),
        }
    }
}

impl From<AudioError> for TtsServiceError {
    fn from(err: AudioError) -> Self {
        match err {
            AudioError::Io(e) => TtsServiceError::Io(e),
            other => TtsServiceError::Conversion(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for TtsServiceError {
    fn from(err: tokio::task::JoinError) -> Self {
        TtsServiceError::Other(anyhow::anyhow!("blocking task failed: {}", err))
    }
}
