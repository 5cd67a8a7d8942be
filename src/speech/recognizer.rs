//! Speech-to-text backends

use crate::error::{AnalyzerError, Result};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait SpeechRecognizer {
    /// Transcribe a 16 kHz mono WAV file
    fn transcribe(&self, waveform: &Path) -> Result<String>;
}

/// Output of `whisper-cli --output-json`
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    #[serde(default)]
    transcription: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    text: String,
}

/// Runs a whisper.cpp command-line binary over the waveform
pub struct WhisperRecognizer {
    binary: PathBuf,
    model_path: PathBuf,
    language: String,
    threads: usize,
    marker_regex: Regex,
}

impl WhisperRecognizer {
    pub fn new(binary: PathBuf, model_path: PathBuf) -> Self {
        Self {
            binary,
            model_path,
            language: "en".to_string(),
            threads: 4,
            // Non-speech annotations such as [BLANK_AUDIO] or [Music]
            marker_regex: Regex::new(r"\[[^\]]*\]").expect("Invalid marker regex"),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Join segment texts, dropping non-speech markers
    fn parse_transcript(&self, json: &str) -> Result<String> {
        let output: WhisperOutput = serde_json::from_str(json)?;

        let transcript = output
            .transcription
            .iter()
            .map(|segment| self.marker_regex.replace_all(&segment.text, ""))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.is_empty() {
            Err(AnalyzerError::SpeechRecognition(
                "No intelligible speech recognized".to_string(),
            ))
        } else {
            Ok(transcript)
        }
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(&self, waveform: &Path) -> Result<String> {
        if !self.model_path.exists() {
            return Err(AnalyzerError::ModelNotFound(format!(
                "Speech model not found at {} (download it with `meeting-analyzer models download`)",
                self.model_path.display()
            )));
        }

        // whisper-cli appends ".json" to this prefix; it stays next to the waveform
        let output_prefix = waveform.with_extension("");
        let output = Command::new(&self.binary)
            .arg("-m")
            .arg(&self.model_path)
            .arg("-f")
            .arg(waveform)
            .arg("-l")
            .arg(&self.language)
            .arg("-t")
            .arg(self.threads.to_string())
            .args(["-nt", "-np", "-oj", "-of"])
            .arg(&output_prefix)
            .output()
            .map_err(|e| {
                AnalyzerError::SpeechRecognition(format!(
                    "Failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AnalyzerError::SpeechRecognition(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let json_path = output_prefix.with_extension("json");
        let json = fs::read_to_string(&json_path).map_err(|e| {
            AnalyzerError::SpeechRecognition(format!(
                "Missing recognizer output {}: {}",
                json_path.display(),
                e
            ))
        })?;
        debug!("Recognizer wrote {} bytes of JSON", json.len());

        self.parse_transcript(&json)
    }
}
