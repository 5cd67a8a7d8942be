//! Output formatters for console and markdown presentation

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// Markdown formatter for pasting into notes or tickets
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📋 MEETING SUMMARY & TASK ANALYSIS", 1));
        output.push_str(&format!(
            "File: {} | Type: {} | Processing time: {}ms\n",
            report.metadata.file_name, report.metadata.file_type, report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("📄 Extracted Text", 2));
        if let Some(failure) = &report.extraction_failure {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("⚠️  Extraction failed:", Color::Yellow),
                failure
            ));
        }
        output.push_str(&format!("({} characters)\n", report.text_chars));
        output.push_str(&report.preview);
        output.push('\n');

        output.push_str(&self.format_header("📝 Summary", 2));
        output.push_str(&report.summary_text());
        output.push('\n');

        output.push_str(&self.format_header("⏰ Deadline", 2));
        let deadline_color = if report.analysis.deadline.date().is_some() {
            Color::Red
        } else {
            Color::BrightBlack
        };
        output.push_str(&self.colorize(&report.deadline_text(), deadline_color));
        output.push('\n');

        output.push_str(&self.format_header("✅ Tasks", 2));
        output.push_str(&self.colorize(&report.tasks_text(), Color::Cyan));
        output.push('\n');

        output.push_str(&self.format_header("⭐ Important Points", 2));
        output.push_str(&self.colorize(&report.important_points_text(), Color::Magenta));
        output.push('\n');

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# 📋 Meeting Summary & Task Analysis\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
                    .format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**File:** `{}` | **Type:** {}\n\n",
                report.metadata.file_name, report.metadata.file_type
            ));
        }

        output.push_str("## Extracted Text\n\n");
        if let Some(failure) = &report.extraction_failure {
            output.push_str(&format!("> ⚠️ Extraction failed: {}\n\n", failure));
        }
        output.push_str("```text\n");
        output.push_str(&report.preview);
        output.push_str("\n```\n\n");

        output.push_str("## Summary\n\n");
        output.push_str(&report.summary_text());
        output.push_str("\n\n");

        output.push_str("## Deadline\n\n");
        output.push_str(&format!("**{}**\n\n", report.deadline_text()));

        output.push_str("## Tasks\n\n");
        output.push_str(&report.tasks_text());
        output.push_str("\n\n");

        output.push_str("## Important Points\n\n");
        output.push_str(&report.important_points_text());
        output.push('\n');

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::FileType;
    use crate::output::report::ReportMetadata;
    use crate::processing::analyzer::{AnalysisResult, Deadline};
    use crate::processing::extractors::{NO_IMPORTANT_POINTS_FOUND, NO_TASKS_FOUND};
    use std::time::SystemTime;

    fn report(failure: Option<&str>) -> AnalysisReport {
        AnalysisReport {
            metadata: ReportMetadata {
                file_name: "standup.mp3".to_string(),
                file_type: FileType::from_extension("mp3").unwrap(),
                generated_at: SystemTime::now(),
                processing_time_ms: 42,
            },
            preview: String::new(),
            text_chars: 0,
            extraction_failure: failure.map(str::to_string),
            analysis: AnalysisResult {
                summary: vec![],
                deadline: Deadline::NotFound { candidates: 0 },
                tasks: vec![NO_TASKS_FOUND.to_string()],
                important_points: vec![NO_IMPORTANT_POINTS_FOUND.to_string()],
            },
        }
    }

    #[test]
    fn test_console_without_colors_has_plain_sections() {
        let output = ConsoleFormatter::new(false).format_report(&report(None)).unwrap();

        assert!(output.contains("▓ 📝 Summary"));
        assert!(output.contains("No deadline found"));
        assert!(output.contains(NO_TASKS_FOUND));
        assert!(output.contains(NO_IMPORTANT_POINTS_FOUND));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_console_shows_extraction_failure() {
        let output = ConsoleFormatter::new(false)
            .format_report(&report(Some("Speech recognition error: no speech")))
            .unwrap();

        assert!(output.contains("Extraction failed: Speech recognition error: no speech"));
    }

    #[test]
    fn test_markdown_headings() {
        let generator = ReportGenerator::with_options(false, false);
        let output = generator.generate_report(&report(None), &OutputFormat::Markdown).unwrap();

        for heading in ["## Extracted Text", "## Summary", "## Deadline", "## Tasks", "## Important Points"] {
            assert!(output.contains(heading), "missing {}", heading);
        }
        assert!(!output.contains("**Generated:**"));
        assert!(output.contains("**No deadline found**"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, true);
        assert_eq!(generator.console_formatter.supports_format(), OutputFormat::Console);
        assert_eq!(generator.markdown_formatter.supports_format(), OutputFormat::Markdown);
    }
}
