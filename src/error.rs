use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("{0}")]
    MetadataUnavailable(String),

    #[error("Transcript error: {transcript}. Metadata error: {metadata}")]
    ContentUnavailable { transcript: String, metadata: String },

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Model completion failed: {0}")]
    ModelCompletion(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuizError {
    /// Whether the error means the video simply has no usable captions.
    pub fn is_transcript_unavailable(&self) -> bool {
        matches!(self, QuizError::TranscriptUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
