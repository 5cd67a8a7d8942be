//! Input processing module
//! Handles file type detection, format conversion and upload management

pub mod file_detector;
pub mod text_extractor;
pub mod media;
pub mod manager;

pub use manager::{Extraction, InputManager, UploadedFile};
