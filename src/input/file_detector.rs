//! File type detection

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    M4a,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFormat {
    Mp4,
    Mkv,
    Mov,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Audio(AudioFormat),
    Video(VideoFormat),
}

pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf", "docx", "txt", "mp3", "wav", "m4a", "mp4", "mkv", "mov",
];

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::M4a => "m4a",
        }
    }
}

impl VideoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
            VideoFormat::Mkv => "mkv",
            VideoFormat::Mov => "mov",
        }
    }
}

impl FileType {
    /// Returns `None` for anything outside the supported set
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "txt" => Some(FileType::Text),
            "mp3" => Some(FileType::Audio(AudioFormat::Mp3)),
            "wav" => Some(FileType::Audio(AudioFormat::Wav)),
            "m4a" => Some(FileType::Audio(AudioFormat::M4a)),
            "mp4" => Some(FileType::Video(VideoFormat::Mp4)),
            "mkv" => Some(FileType::Video(VideoFormat::Mkv)),
            "mov" => Some(FileType::Video(VideoFormat::Mov)),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
            FileType::Text => "txt",
            FileType::Audio(format) => format.extension(),
            FileType::Video(format) => format.extension(),
        }
    }

    pub fn is_media(&self) -> bool {
        matches!(self, FileType::Audio(_) | FileType::Video(_))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileType::Pdf => "PDF document",
            FileType::Docx => "Word document",
            FileType::Text => "Plain text",
            FileType::Audio(_) => "Audio recording",
            FileType::Video(_) => "Video recording",
        };
        write!(f, "{} (.{})", label, self.extension())
    }
}

/// Extension of the trailing file-name component, lower-cased.
///
/// Mirrors `name.split('.').last()`: a name without a dot yields the whole name.
pub fn extension_of(file_name: &str) -> String {
    let base = file_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);
    base.rsplit('.').next().unwrap_or(base).to_lowercase()
}
