//! Report structure handed to the formatters

use crate::input::file_detector::FileType;
use crate::processing::analyzer::AnalysisResult;
use std::time::SystemTime;

/// Everything shown to the user for one processed upload
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    /// Extracted text cut to the preview length
    pub preview: String,

    /// Character count of the full extracted text
    pub text_chars: usize,

    /// Why extraction produced no text, when it failed
    pub extraction_failure: Option<String>,

    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone)]
pub struct ReportMetadata {
    pub file_name: String,
    pub file_type: FileType,
    pub generated_at: SystemTime,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    /// Summary sentences, one per line
    pub fn summary_text(&self) -> String {
        self.analysis.summary.join("\n")
    }

    pub fn deadline_text(&self) -> String {
        self.analysis.deadline.to_string()
    }

    pub fn tasks_text(&self) -> String {
        self.analysis.tasks.join("\n")
    }

    pub fn important_points_text(&self) -> String {
        self.analysis.important_points.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::Deadline;
    use chrono::NaiveDate;

    #[test]
    fn test_sections_are_newline_joined() {
        let report = AnalysisReport {
            metadata: ReportMetadata {
                file_name: "notes.txt".to_string(),
                file_type: FileType::Text,
                generated_at: SystemTime::now(),
                processing_time_ms: 3,
            },
            preview: "One. Two.".to_string(),
            text_chars: 9,
            extraction_failure: None,
            analysis: AnalysisResult {
                summary: vec!["One.".to_string(), "Two.".to_string()],
                deadline: Deadline::Found(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()),
                tasks: vec!["- Task: a thing".to_string(), "- Submit the form".to_string()],
                important_points: vec!["No important points found".to_string()],
            },
        };

        assert_eq!(report.summary_text(), "One.\nTwo.");
        assert_eq!(report.deadline_text(), "05 May 2025");
        assert_eq!(report.tasks_text(), "- Task: a thing\n- Submit the form");
        assert_eq!(report.important_points_text(), "No important points found");
    }
}
