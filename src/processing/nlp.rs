//! Rule-based English language model: sentence segmentation and entity recognition.
//!
//! Built once at startup and shared by reference with every analyzer. All
//! methods take `&self`, so one instance serves any number of documents.

use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Date,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

pub struct NlpModel {
    abbreviations: HashSet<&'static str>,
    /// Also ordinary words, so they only join a following number or lowercase word
    ambiguous_abbreviations: HashSet<&'static str>,
    entity_regex: Regex,
}

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
const ORDINAL: &str = r"(?:st|nd|rd|th)?";
const WEEKDAY: &str = r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)";

impl Default for NlpModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NlpModel {
    pub fn new() -> Self {
        let abbreviations = [
            "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "vs.", "e.g.", "i.e.", "inc.",
            "ltd.", "corp.", "approx.", "dept.", "fig.",
        ]
        .into_iter()
        .collect();
        let ambiguous_abbreviations = ["no.", "co.", "st."].into_iter().collect();

        // Longer forms come first so the leftmost match is also the longest
        let date_patterns = [
            r"\d{4}-\d{1,2}-\d{1,2}".to_string(),
            r"\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})".to_string(),
            format!(r"\d{{1,2}}{ORDINAL}(?:\s+of)?\s+{MONTH},?\s+\d{{4}}"),
            format!(r"{MONTH}\s+\d{{1,2}}{ORDINAL},?\s+\d{{4}}"),
            format!(r"\d{{1,2}}{ORDINAL}(?:\s+of)?\s+{MONTH}"),
            format!(r"{MONTH}\s+\d{{1,2}}{ORDINAL}"),
            format!(r"{MONTH}\s+\d{{4}}"),
            r"(?:19|20)\d{2}".to_string(),
            r"today|tomorrow|yesterday".to_string(),
            WEEKDAY.to_string(),
        ];
        let time_pattern = r"\d{1,2}(?::\d{2})?\s?(?:am|pm)|\d{1,2}:\d{2}";

        let entity_regex = Regex::new(&format!(
            r"(?i)\b(?:(?P<date>{})|(?P<time>{}))\b",
            date_patterns.join("|"),
            time_pattern
        ))
        .expect("Invalid entity regex");

        Self {
            abbreviations,
            ambiguous_abbreviations,
            entity_regex,
        }
    }

    /// Sentences in document order, trimmed, with abbreviation splits repaired
    pub fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences: Vec<String> = Vec::new();

        for raw in text.unicode_sentences() {
            let sentence = raw.trim();
            if sentence.is_empty() {
                continue;
            }

            match sentences.last_mut() {
                Some(previous) if self.continues_abbreviation(previous, sentence) => {
                    previous.push(' ');
                    previous.push_str(sentence);
                }
                _ => sentences.push(sentence.to_string()),
            }
        }

        sentences
    }

    fn continues_abbreviation(&self, previous: &str, next: &str) -> bool {
        let Some(word) = previous.split_whitespace().last() else {
            return false;
        };
        let word = word.to_lowercase();

        if self.abbreviations.contains(word.as_str()) {
            return true;
        }
        self.ambiguous_abbreviations.contains(word.as_str())
            && next
                .chars()
                .next()
                .map_or(false, |c| c.is_ascii_digit() || c.is_lowercase())
    }

    /// Named entities in document order, non-overlapping
    pub fn entities(&self, text: &str) -> Vec<Entity> {
        self.entity_regex
            .captures_iter(text)
            .filter_map(|caps| {
                let (m, label) = match (caps.name("date"), caps.name("time")) {
                    (Some(m), _) => (m, EntityLabel::Date),
                    (None, Some(m)) => (m, EntityLabel::Time),
                    (None, None) => return None,
                };
                Some(Entity {
                    text: m.as_str().to_string(),
                    label,
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect()
    }

    pub fn entities_with_label(&self, text: &str, label: EntityLabel) -> Vec<Entity> {
        self.entities(text)
            .into_iter()
            .filter(|entity| entity.label == label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(entities: &[Entity]) -> Vec<&str> {
        entities.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn test_sentences_in_order() {
        let nlp = NlpModel::new();
        let sentences = nlp.sentences("First point. Second point? Third point!");

        assert_eq!(sentences, vec!["First point.", "Second point?", "Third point!"]);
    }

    #[test]
    fn test_sentences_empty_text() {
        let nlp = NlpModel::new();
        assert!(nlp.sentences("").is_empty());
        assert!(nlp.sentences("   ").is_empty());
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let nlp = NlpModel::new();
        let sentences = nlp.sentences("Dr. Smith will present. Then we vote.");

        assert_eq!(sentences, vec!["Dr. Smith will present.", "Then we vote."]);
    }

    #[test]
    fn test_word_like_abbreviations_keep_real_boundaries() {
        let nlp = NlpModel::new();

        let sentences = nlp.sentences("The vote was no. Next we discuss the budget. Then we close.");
        assert_eq!(
            sentences,
            vec!["The vote was no.", "Next we discuss the budget.", "Then we close."]
        );

        let sentences = nlp.sentences("Item No. 5 was approved. We moved to Main St. Parking is free.");
        assert_eq!(
            sentences,
            vec!["Item No. 5 was approved.", "We moved to Main St.", "Parking is free."]
        );
    }

    #[test]
    fn test_date_entities() {
        let nlp = NlpModel::new();
        let text = "Kickoff on 3 March 2025, review on January 1st, 2025 and sign-off 2025-06-30.";
        let dates = nlp.entities_with_label(text, EntityLabel::Date);

        assert_eq!(texts(&dates), vec!["3 March 2025", "January 1st, 2025", "2025-06-30"]);
    }

    #[test]
    fn test_partial_and_relative_dates() {
        let nlp = NlpModel::new();
        let text = "Ship by May 2025, demo on 12th of June, call tomorrow and submit by Friday.";
        let dates = nlp.entities_with_label(text, EntityLabel::Date);

        assert_eq!(texts(&dates), vec!["May 2025", "12th of June", "tomorrow", "Friday"]);
    }

    #[test]
    fn test_bare_years_are_dates() {
        let nlp = NlpModel::new();
        let dates = nlp.entities_with_label("The 2024 budget closes 5 May 2025; order 1500 units.", EntityLabel::Date);

        assert_eq!(texts(&dates), vec!["2024", "5 May 2025"]);
    }

    #[test]
    fn test_time_entities_are_labelled_separately() {
        let nlp = NlpModel::new();
        let entities = nlp.entities("Meet at 10:30 am on 5 May 2025.");

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].label, EntityLabel::Time);
        assert_eq!(entities[0].text, "10:30 am");
        assert_eq!(entities[1].label, EntityLabel::Date);
        assert_eq!(entities[1].text, "5 May 2025");
    }

    #[test]
    fn test_month_words_inside_other_words_are_ignored() {
        let nlp = NlpModel::new();
        let dates = nlp.entities_with_label("You may mark 5 marbles as done.", EntityLabel::Date);

        assert!(dates.is_empty());
    }
}
