//! Speech recognition backends and their model files

pub mod model_manager;
pub mod recognizer;

pub use model_manager::ModelManager;
pub use recognizer::{SpeechRecognizer, WhisperRecognizer};
