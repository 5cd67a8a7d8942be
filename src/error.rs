//! Error handling for the meeting analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Text decoding error: {0}")]
    TextDecoding(String),

    #[error("Transcoding error: {0}")]
    Transcoding(String),

    #[error("Speech recognition error: {0}")]
    SpeechRecognition(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl From<zip::result::ZipError> for AnalyzerError {
    fn from(err: zip::result::ZipError) -> Self {
        AnalyzerError::DocxExtraction(err.to_string())
    }
}

impl From<hound::Error> for AnalyzerError {
    fn from(err: hound::Error) -> Self {
        AnalyzerError::Transcoding(err.to_string())
    }
}

impl From<symphonia::core::errors::Error> for AnalyzerError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        AnalyzerError::Transcoding(err.to_string())
    }
}
