//! Text normalization and analysis module

pub mod text_processor;
pub mod nlp;
pub mod date_parser;
pub mod extractors;
pub mod analyzer;
