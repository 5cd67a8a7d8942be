//! Speech model management: downloads whisper.cpp ggml models from the Hugging Face Hub

use crate::error::{AnalyzerError, Result};
use hf_hub::api::tokio::Api;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Repository hosting the ggml conversions of the Whisper models
pub const WHISPER_REPO: &str = "ggerganov/whisper.cpp";

/// Information about an available speech model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechModelInfo {
    pub name: String,
    pub file_name: String,
    pub size_mb: u64,
    pub description: String,
    pub english_only: bool,
}

/// Manager for speech models - handles download, scanning and removal
pub struct ModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, SpeechModelInfo>,
    downloaded_models: HashSet<String>,
}

impl ModelManager {
    /// Create a new model manager
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                AnalyzerError::ModelError(format!("Failed to create models directory: {}", e))
            })?;
        }

        let mut manager = Self {
            models_dir,
            available_models: BTreeMap::new(),
            downloaded_models: HashSet::new(),
        };

        manager.init_available_models();
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    /// Path of the weights file for `model_id` under `models_dir`
    pub fn model_file(models_dir: &Path, model_id: &str) -> PathBuf {
        models_dir.join(format!("ggml-{}.bin", model_id))
    }

    fn init_available_models(&mut self) {
        let catalog = [
            ("tiny.en", 75, true, "Fastest English-only model, rough transcripts"),
            ("tiny", 75, false, "Fastest multilingual model"),
            ("base.en", 142, true, "Good balance of speed and accuracy for English meetings"),
            ("base", 142, false, "Multilingual base model"),
            ("small.en", 466, true, "Noticeably more accurate English transcripts"),
            ("small", 466, false, "Multilingual small model"),
            ("medium.en", 1500, true, "High accuracy English model, slow on CPU"),
            ("large-v3-turbo", 1600, false, "Best multilingual quality with reduced decoding cost"),
        ];

        for (id, size_mb, english_only, description) in catalog {
            self.available_models.insert(
                id.to_string(),
                SpeechModelInfo {
                    name: format!("Whisper {}", id),
                    file_name: format!("ggml-{}.bin", id),
                    size_mb,
                    description: description.to_string(),
                    english_only,
                },
            );
        }
    }

    /// Scan for already downloaded models
    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            AnalyzerError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            AnalyzerError::ModelError(format!("Failed to read directory entry: {}", e))
        })? {
            let file_name = entry.file_name().to_string_lossy().to_string();
            let model_id = match file_name
                .strip_prefix("ggml-")
                .and_then(|rest| rest.strip_suffix(".bin"))
            {
                Some(id) => id.to_string(),
                None => continue,
            };

            // Interrupted downloads leave empty files behind
            let metadata = entry.metadata().await?;
            if metadata.is_file() && metadata.len() > 0 {
                self.downloaded_models.insert(model_id);
            }
        }

        Ok(())
    }

    /// Download a model from Hugging Face Hub
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .ok_or_else(|| AnalyzerError::ModelNotFound(model_id.to_string()))?;

        let destination = Self::model_file(&self.models_dir, model_id);
        if !force && self.downloaded_models.contains(model_id) {
            return Ok(destination);
        }

        println!("📥 Downloading speech model: {} ({} MB)", model_info.name, model_info.size_mb);
        println!("📍 Repository: {}", WHISPER_REPO);

        let api = Api::new()
            .map_err(|e| AnalyzerError::Network(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.repo(hf_hub::Repo::model(WHISPER_REPO.to_string()));

        let cached = repo.get(&model_info.file_name).await.map_err(|e| {
            AnalyzerError::Network(format!("Failed to download {}: {}", model_info.file_name, e))
        })?;

        fs::copy(&cached, &destination).await.map_err(|e| {
            AnalyzerError::ModelError(format!("Failed to copy {}: {}", model_info.file_name, e))
        })?;
        println!("  ✅ Downloaded: {}", model_info.file_name);

        self.downloaded_models.insert(model_id.to_string());
        Ok(destination)
    }

    /// Delete a downloaded model's weights
    pub async fn remove_model(&mut self, model_id: &str) -> Result<PathBuf> {
        if !self.downloaded_models.contains(model_id) {
            return Err(AnalyzerError::ModelNotFound(model_id.to_string()));
        }

        let path = Self::model_file(&self.models_dir, model_id);
        fs::remove_file(&path).await.map_err(|e| {
            AnalyzerError::ModelError(format!("Failed to remove {}: {}", path.display(), e))
        })?;
        self.downloaded_models.remove(model_id);
        Ok(path)
    }

    /// Get path to a downloaded model
    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(Self::model_file(&self.models_dir, model_id))
        } else {
            None
        }
    }

    /// Available models sorted by id
    pub fn list_available_models(&self) -> Vec<(&String, &SpeechModelInfo)> {
        self.available_models.iter().collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.downloaded_models.iter().cloned().collect();
        models.sort();
        models
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&SpeechModelInfo> {
        self.available_models.get(model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }
}
