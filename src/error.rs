//! Error types for Briefly.

use thiserror::Error;

/// Library-level error type for Briefly operations.
#[derive(Error, Debug)]
pub enum BrieflyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not a recognized YouTube video URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Extraction failed ({stage}) for {url}: {message}")]
    Extraction {
        stage: &'static str,
        url: String,
        message: String,
    },

    #[error("No '{language}' transcript available for {url}")]
    TranscriptUnavailable { url: String, language: String },

    #[error("Subtitle parse error: {0}")]
    Parse(String),

    #[error("Model '{model}' returned no summary")]
    EmptyResponse { model: String },

    #[error("Summarization provider error: {0}")]
    Provider(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl BrieflyError {
    /// Name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            BrieflyError::Config(_) => "configuration",
            BrieflyError::InvalidUrl(_) | BrieflyError::InvalidInput(_) => "validation",
            BrieflyError::Extraction { stage, .. } => *stage,
            BrieflyError::TranscriptUnavailable { .. } => "transcript",
            BrieflyError::Parse(_) => "cleaning",
            BrieflyError::EmptyResponse { .. } | BrieflyError::Provider(_) => "summarization",
            BrieflyError::ToolNotFound(_) | BrieflyError::ToolFailed(_) => "extraction",
            BrieflyError::Io(_) | BrieflyError::Json(_) | BrieflyError::TomlParse(_) => "internal",
        }
    }

    /// Whether the error was caused by the caller's input rather than an upstream failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BrieflyError::InvalidUrl(_) | BrieflyError::InvalidInput(_)
        )
    }
}

/// Result type alias for Briefly operations.
pub type Result<T> = std::result::Result<T, BrieflyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let err = BrieflyError::Extraction {
            stage: "metadata",
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
            message: "exit status 1".to_string(),
        };
        assert_eq!(err.stage(), "metadata");
        assert!(err.to_string().contains("https://youtu.be/dQw4w9WgXcQ"));

        assert_eq!(BrieflyError::Parse("empty".into()).stage(), "cleaning");
        assert_eq!(
            BrieflyError::EmptyResponse { model: "m".into() }.stage(),
            "summarization"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(BrieflyError::InvalidUrl("x".into()).is_client_error());
        assert!(!BrieflyError::Provider("x".into()).is_client_error());
    }
}
