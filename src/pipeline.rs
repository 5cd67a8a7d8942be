//! One upload in, one report out

use crate::error::Result;
use crate::input::manager::{InputManager, UploadedFile};
use crate::output::report::{AnalysisReport, ReportMetadata};
use crate::processing::analyzer::AnalysisEngine;
use crate::processing::text_processor::TextProcessor;
use log::info;
use std::time::{Instant, SystemTime};

pub const DEFAULT_PREVIEW_CHARS: usize = 4000;

pub struct Pipeline<'a> {
    input: InputManager,
    engine: AnalysisEngine<'a>,
    text_processor: TextProcessor,
    preview_chars: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(input: InputManager, engine: AnalysisEngine<'a>) -> Self {
        Self {
            input,
            engine,
            text_processor: TextProcessor::new(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Fails only for an unsupported extension; conversion problems are
    /// carried in the report and the analyzers see empty text.
    pub fn process(&self, file: &UploadedFile) -> Result<AnalysisReport> {
        let started = Instant::now();

        let extraction = self.input.extract(file)?;
        info!(
            "Extracted {} characters from {} ({})",
            extraction.text.chars().count(),
            file.name,
            extraction.file_type
        );

        let analysis = self.engine.analyze(&extraction.text);

        Ok(AnalysisReport {
            metadata: ReportMetadata {
                file_name: file.name.clone(),
                file_type: extraction.file_type,
                generated_at: SystemTime::now(),
                processing_time_ms: started.elapsed().as_millis() as u64,
            },
            preview: self.text_processor.truncate(&extraction.text, self.preview_chars),
            text_chars: extraction.text.chars().count(),
            extraction_failure: extraction.failure,
            analysis,
        })
    }
}
