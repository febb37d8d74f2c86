pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{ExtractCliConfig, TranslateCliConfig};

#[cfg(feature = "tabula")]
pub use adapters::tabula::TabulaDetector;

pub use config::cli::LocalStorage;
pub use core::{
    etl::{ExtractionEngine, RunSummary},
    pipeline::TablePipeline,
    translate::{translate_keys, JsonKeyTranslator, KeyMap},
};
pub use domain::model::{OutputFormat, Record, RecordSet};
pub use utils::error::{Result, ToolError};
