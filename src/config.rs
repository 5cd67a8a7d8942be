//! Configuration management for the meeting analyzer

use crate::error::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub speech: SpeechConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of leading sentences kept in the summary
    pub summary_sentences: usize,
    /// Characters of extracted text shown in the report
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Encodings tried in order when decoding plain text files
    pub text_encodings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub whisper_binary: PathBuf,
    pub default_model: String,
    pub models_dir: PathBuf,
    pub language: String,
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".meeting-analyzer")
            .join("models");

        Self {
            analysis: AnalysisConfig {
                summary_sentences: 8,
                preview_chars: 4000,
            },
            input: InputConfig {
                text_encodings: vec![
                    "utf-8".to_string(),
                    "latin-1".to_string(),
                    "windows-1252".to_string(),
                ],
            },
            speech: SpeechConfig {
                whisper_binary: PathBuf::from("whisper-cli"),
                default_model: "base.en".to_string(),
                models_dir,
                language: "en".to_string(),
                threads: 4,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load the configuration at `path`, writing defaults on first use
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("meeting-analyzer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.input.text_encodings.is_empty() {
            return Err(AnalyzerError::Configuration(
                "input.text_encodings must list at least one encoding".to_string(),
            ));
        }
        if self.speech.threads == 0 {
            return Err(AnalyzerError::Configuration(
                "speech.threads must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.speech.models_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.analysis.summary_sentences, 8);
        assert_eq!(config.analysis.preview_chars, 4000);
        assert_eq!(config.input.text_encodings[0], "utf-8");
        assert_eq!(config.output.format, OutputFormat::Console);
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.speech.default_model, "base.en");
    }

    #[test]
    fn test_roundtrip_custom_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.analysis.summary_sentences = 3;
        config.output.format = OutputFormat::Markdown;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.analysis.summary_sentences, 3);
        assert_eq!(loaded.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn test_rejects_empty_encoding_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.input.text_encodings.clear();
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(AnalyzerError::Configuration(_))
        ));
    }
}
