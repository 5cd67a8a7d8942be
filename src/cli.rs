//! CLI interface for the meeting analyzer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meeting-analyzer")]
#[command(about = "Meeting summary and task analyzer for documents and recordings")]
#[command(long_about = "Extract text from a PDF, DOCX, text file, audio or video recording and derive a summary, deadline, tasks and important points")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a meeting document or recording
    Analyze {
        /// File to analyze (pdf, docx, txt, mp3, wav, m4a, mp4, mkv, mov)
        file: PathBuf,

        /// Number of leading sentences in the summary
        #[arg(short, long)]
        sentences: Option<usize>,

        /// Output format: console, markdown
        #[arg(short, long)]
        format: Option<String>,

        /// Characters of extracted text to show
        #[arg(long)]
        preview_chars: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Speech model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available speech models
    List,

    /// Download a speech model
    Download {
        /// Model name (e.g. base.en)
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Remove a downloaded model
    Remove {
        /// Model name to remove
        model: String,
    },

    /// Show model information
    Info {
        /// Model name
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, markdown", format)),
    }
}
