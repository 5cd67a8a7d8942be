//! Meeting analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod speech;

pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use pipeline::Pipeline;
