//! Input manager: classifies uploads and routes them to a converter

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::{extension_of, FileType, SUPPORTED_EXTENSIONS};
use crate::input::media::{MediaExtractor, SymphoniaTranscoder};
use crate::input::text_extractor::{DocxExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::text_processor::TextProcessor;
use crate::speech::model_manager::ModelManager;
use crate::speech::recognizer::WhisperRecognizer;
use log::{info, warn};
use std::path::Path;

/// Raw bytes of a single upload together with its declared name
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, bytes))
    }

    /// Declared extension; the content itself is never sniffed
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }
}

/// Outcome of converting one upload
#[derive(Debug, Clone)]
pub struct Extraction {
    pub file_type: FileType,
    /// Normalized text, empty when conversion failed
    pub text: String,
    pub failure: Option<String>,
}

pub struct InputManager {
    text_processor: TextProcessor,
    pdf: PdfExtractor,
    docx: DocxExtractor,
    plain: PlainTextExtractor,
    media: MediaExtractor,
}

impl InputManager {
    pub fn new(plain: PlainTextExtractor, media: MediaExtractor) -> Self {
        Self {
            text_processor: TextProcessor::new(),
            pdf: PdfExtractor,
            docx: DocxExtractor,
            plain,
            media,
        }
    }

    /// Converters wired from configuration: symphonia transcoding and whisper.cpp recognition
    pub fn from_config(config: &Config) -> Result<Self> {
        let plain = PlainTextExtractor::from_labels(&config.input.text_encodings)?;

        let model_path = ModelManager::model_file(config.models_dir(), &config.speech.default_model);
        let recognizer = WhisperRecognizer::new(config.speech.whisper_binary.clone(), model_path)
            .with_language(config.speech.language.clone())
            .with_threads(config.speech.threads);
        let media = MediaExtractor::new(
            Box::new(SymphoniaTranscoder::default()),
            Box::new(recognizer),
        );

        Ok(Self::new(plain, media))
    }

    pub fn detect_file_type(&self, file: &UploadedFile) -> Result<FileType> {
        let extension = file.extension();
        FileType::from_extension(&extension).ok_or_else(|| {
            AnalyzerError::UnsupportedFormat(format!(
                "'.{}' (supported: {})",
                extension,
                SUPPORTED_EXTENSIONS.join(", ")
            ))
        })
    }

    /// Run the converter for `file_type` and normalize its output
    pub fn convert(&self, file_type: FileType, bytes: &[u8]) -> Result<String> {
        let raw = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF ({} bytes)", bytes.len());
                self.pdf.extract(bytes)?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX ({} bytes)", bytes.len());
                self.docx.extract(bytes)?
            }
            FileType::Text => {
                info!("Decoding plain text ({} bytes)", bytes.len());
                self.plain.extract(bytes)?
            }
            FileType::Audio(format) => self.media.transcribe_audio(bytes, format)?,
            FileType::Video(format) => self.media.transcribe_video(bytes, format)?,
        };

        Ok(self.text_processor.normalize(&raw))
    }

    /// Classify and convert. Only an unsupported extension is an error here;
    /// converter failures degrade to empty text with the failure recorded.
    pub fn extract(&self, file: &UploadedFile) -> Result<Extraction> {
        let file_type = self.detect_file_type(file)?;

        let extraction = match self.convert(file_type, &file.bytes) {
            Ok(text) => Extraction {
                file_type,
                text,
                failure: None,
            },
            Err(e) => {
                warn!("Could not convert {}: {}", file.name, e);
                Extraction {
                    file_type,
                    text: String::new(),
                    failure: Some(e.to_string()),
                }
            }
        };

        Ok(extraction)
    }
}
