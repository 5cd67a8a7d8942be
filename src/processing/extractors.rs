//! Cue-word pattern extraction for tasks and important points

use crate::processing::text_processor::TextProcessor;
use regex::Regex;

pub const NO_TASKS_FOUND: &str = "No explicit tasks found";
pub const NO_IMPORTANT_POINTS_FOUND: &str = "No important points found";

pub struct CueExtractor {
    task_regex: Regex,
    important_regex: Regex,
    text_processor: TextProcessor,
}

impl Default for CueExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CueExtractor {
    pub fn new() -> Self {
        // Cue words are not word-bounded: "Do" also fires inside "Document"
        let task_regex = Regex::new(r"(?i)(?:Task|Do|Complete|Finish|Submit|Prepare)[^\n.]{5,120}")
            .expect("Invalid task regex");
        let important_regex = Regex::new(r"(?i)Important[:\- ](.+?)[.\n]")
            .expect("Invalid important-point regex");

        Self {
            task_regex,
            important_regex,
            text_processor: TextProcessor::new(),
        }
    }

    /// Whole matches, cue word included
    pub fn tasks(&self, text: &str) -> Vec<String> {
        let tasks: Vec<String> = self
            .task_regex
            .find_iter(text)
            .map(|m| self.bullet(m.as_str()))
            .collect();

        if tasks.is_empty() {
            vec![NO_TASKS_FOUND.to_string()]
        } else {
            tasks
        }
    }

    /// Text after the cue, up to the next period or line break
    pub fn important_points(&self, text: &str) -> Vec<String> {
        let points: Vec<String> = self
            .important_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| self.bullet(m.as_str()))
            .collect();

        if points.is_empty() {
            vec![NO_IMPORTANT_POINTS_FOUND.to_string()]
        } else {
            points
        }
    }

    fn bullet(&self, raw: &str) -> String {
        format!("- {}", self.text_processor.normalize(raw))
    }
}
