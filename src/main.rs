//! Meeting analyzer: summary, deadline, tasks and important points from meeting files

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use meeting_analyzer::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use meeting_analyzer::config::Config;
use meeting_analyzer::error::{AnalyzerError, Result};
use meeting_analyzer::input::file_detector::FileType;
use meeting_analyzer::input::{InputManager, UploadedFile};
use meeting_analyzer::output::ReportGenerator;
use meeting_analyzer::pipeline::Pipeline;
use meeting_analyzer::processing::analyzer::AnalysisEngine;
use meeting_analyzer::processing::nlp::NlpModel;
use meeting_analyzer::speech::ModelManager;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        match &e {
            AnalyzerError::UnsupportedFormat(_) => eprintln!("❌ {}", e),
            _ => error!("Command failed: {}", e),
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            file,
            sentences,
            format,
            preview_chars,
            no_color,
        } => {
            let output_format = match format {
                Some(format) => cli::parse_output_format(&format).map_err(AnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            let use_colors = config.output.color_output && !no_color;
            if !use_colors {
                colored::control::set_override(false);
            }

            analyze_file(
                &file,
                &config,
                sentences.unwrap_or(config.analysis.summary_sentences),
                preview_chars.unwrap_or(config.analysis.preview_chars),
                &ReportGenerator::with_options(use_colors, true),
                output_format,
            )?;
        }

        Commands::Models { action } => {
            let mut model_manager = ModelManager::new(config.models_dir().clone()).await?;

            match action {
                ModelAction::List => {
                    println!("🎙️  Speech Models\n");
                    for (model_id, model_info) in model_manager.list_available_models() {
                        let status = if model_manager.is_model_downloaded(model_id) {
                            "✅ Downloaded"
                        } else {
                            "⬇️  Available"
                        };
                        let default_marker = if *model_id == config.speech.default_model {
                            " (default)"
                        } else {
                            ""
                        };

                        println!("  • {}{} - {} MB [{}]", model_id, default_marker, model_info.size_mb, status);
                        println!("    {}", model_info.description);
                    }

                    if model_manager.list_downloaded_models().is_empty() {
                        println!("\n💡 No models downloaded yet. Get started with:");
                        println!("   meeting-analyzer models download {}", config.speech.default_model);
                    }
                }

                ModelAction::Download { model, force } => {
                    if !force && model_manager.is_model_downloaded(&model) {
                        println!("✅ Model '{}' is already downloaded!", model);
                        println!("💡 Use --force to re-download");
                        return Ok(());
                    }

                    match model_manager.download_model(&model, force).await {
                        Ok(model_path) => {
                            println!("✅ Model '{}' downloaded successfully!", model);
                            println!("📁 Location: {}", model_path.display());
                        }
                        Err(e) => {
                            println!("❌ Failed to download model '{}': {}", model, e);
                            return Err(e);
                        }
                    }
                }

                ModelAction::Remove { model } => {
                    if !model_manager.is_model_downloaded(&model) {
                        println!("⚠️  Model '{}' is not downloaded", model);
                        return Ok(());
                    }

                    let removed = model_manager.remove_model(&model).await?;
                    println!("✅ Model '{}' removed successfully!", model);
                    println!("📁 Removed file: {}", removed.display());
                }

                ModelAction::Info { model } => {
                    let model_info = model_manager
                        .get_model_info(&model)
                        .ok_or_else(|| AnalyzerError::ModelNotFound(model.clone()))?;

                    println!("📋 Model Information for '{}'\n", model);
                    println!("Name: {}", model_info.name);
                    println!("File: {}", model_info.file_name);
                    println!("Size: {} MB", model_info.size_mb);
                    println!("Languages: {}", if model_info.english_only { "English only" } else { "Multilingual" });
                    println!("Description: {}", model_info.description);

                    match model_manager.get_model_path(&model) {
                        Some(model_path) => {
                            println!("Status: ✅ Downloaded");
                            println!("Location: {}", model_path.display());
                        }
                        None => {
                            println!("Status: ⬇️  Available for download");
                            println!("\n💡 To download this model, run:");
                            println!("   meeting-analyzer models download {}", model);
                        }
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Summary sentences: {}", config.analysis.summary_sentences);
                println!("Preview characters: {}", config.analysis.preview_chars);
                println!("Text encodings: {}", config.input.text_encodings.join(", "));
                println!("\nSpeech:");
                println!("  Whisper binary: {}", config.speech.whisper_binary.display());
                println!("  Default model: {}", config.speech.default_model);
                println!("  Models directory: {}", config.models_dir().display());
                println!("  Language: {}", config.speech.language);
                println!("  Threads: {}", config.speech.threads);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn analyze_file(
    path: &Path,
    config: &Config,
    summary_sentences: usize,
    preview_chars: usize,
    generator: &ReportGenerator,
    output_format: meeting_analyzer::config::OutputFormat,
) -> Result<()> {
    let upload = UploadedFile::from_path(path)?;
    info!("Analyzing {} ({} bytes)", upload.name, upload.bytes.len());

    let nlp = NlpModel::new();
    let engine = AnalysisEngine::new(&nlp).with_summary_sentences(summary_sentences);
    let pipeline = Pipeline::new(InputManager::from_config(config)?, engine)
        .with_preview_chars(preview_chars);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    let action = match FileType::from_extension(&upload.extension()) {
        Some(file_type) if file_type.is_media() => "Transcribing",
        _ => "Processing",
    };
    spinner.set_message(format!("{} {}...", action, upload.name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = pipeline.process(&upload);
    spinner.finish_and_clear();

    let rendered = generator.generate_report(&report?, &output_format)?;
    println!("{}", rendered);
    Ok(())
}
