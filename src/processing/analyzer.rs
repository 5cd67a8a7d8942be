//! Analysis engine: summary, deadline, tasks and important points

use crate::processing::date_parser::DateParser;
use crate::processing::extractors::CueExtractor;
use crate::processing::nlp::{EntityLabel, NlpModel};
use chrono::NaiveDate;
use log::debug;
use std::fmt;

pub const DEFAULT_SUMMARY_SENTENCES: usize = 8;
pub const NO_DEADLINE_FOUND: &str = "No deadline found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deadline {
    Found(NaiveDate),
    /// `candidates` counts DATE entities that were recognized but could not be parsed
    NotFound { candidates: usize },
}

impl Deadline {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Deadline::Found(date) => Some(*date),
            Deadline::NotFound { .. } => None,
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deadline::Found(date) => write!(f, "{}", date.format("%d %B %Y")),
            Deadline::NotFound { .. } => f.write_str(NO_DEADLINE_FOUND),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub summary: Vec<String>,
    pub deadline: Deadline,
    pub tasks: Vec<String>,
    pub important_points: Vec<String>,
}

/// Runs the four independent analyzers over normalized text
pub struct AnalysisEngine<'a> {
    nlp: &'a NlpModel,
    date_parser: DateParser,
    cue_extractor: CueExtractor,
    summary_sentences: usize,
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(nlp: &'a NlpModel) -> Self {
        Self {
            nlp,
            date_parser: DateParser::new(),
            cue_extractor: CueExtractor::new(),
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
        }
    }

    pub fn with_summary_sentences(mut self, sentences: usize) -> Self {
        self.summary_sentences = sentences;
        self
    }

    pub fn with_date_parser(mut self, date_parser: DateParser) -> Self {
        self.date_parser = date_parser;
        self
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        AnalysisResult {
            summary: self.summarize(text),
            deadline: self.detect_deadline(text),
            tasks: self.extract_tasks(text),
            important_points: self.extract_important_points(text),
        }
    }

    /// The first sentences in document order; a truncation, not a ranking
    pub fn summarize(&self, text: &str) -> Vec<String> {
        self.nlp
            .sentences(text)
            .into_iter()
            .take(self.summary_sentences)
            .collect()
    }

    /// Earliest parseable DATE entity
    pub fn detect_deadline(&self, text: &str) -> Deadline {
        let candidates = self.nlp.entities_with_label(text, EntityLabel::Date);

        let earliest = candidates
            .iter()
            .filter_map(|entity| {
                let parsed = self.date_parser.parse(&entity.text);
                if parsed.is_none() {
                    debug!("Dropping unparseable date candidate '{}'", entity.text);
                }
                parsed
            })
            .min();

        match earliest {
            Some(date) => Deadline::Found(date),
            None => {
                debug!("No deadline among {} date candidates", candidates.len());
                Deadline::NotFound {
                    candidates: candidates.len(),
                }
            }
        }
    }

    pub fn extract_tasks(&self, text: &str) -> Vec<String> {
        self.cue_extractor.tasks(text)
    }

    pub fn extract_important_points(&self, text: &str) -> Vec<String> {
        self.cue_extractor.important_points(text)
    }
}
