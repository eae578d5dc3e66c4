use crate::domain::tts::TtsServiceError;
use crate::infrastructure::config::ConfigError;

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis failed: {0}")]
    Tts(#[from] TtsServiceError),

    #[error("Invalid input: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Process exit code for this error, used by the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::BadRequest(_) => 64,
            Self::Tts(e) if e.is_request_failure() => 69,
            Self::Tts(_) => 70,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
