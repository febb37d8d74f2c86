use crate::domain::model::{OutputFormat, PageTables, Record, RecordSet};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Finds tables in a PDF document.
pub trait TableDetector {
    /// Returns the tables of every page, in page order. A document without
    /// tables yields an empty vector, not an error.
    fn detect_tables(&self, pdf_path: &Path) -> Result<Vec<PageTables>>;
}

pub trait Storage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn pdf_paths(&self) -> &[PathBuf];
    fn format(&self) -> OutputFormat;
    fn output(&self) -> Option<&Path>;
    fn merge(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self, pdf_path: &Path) -> Result<Vec<PageTables>>;
    fn transform(&self, pages: Vec<PageTables>) -> Result<RecordSet>;
    /// Writes `records` to `output_path`. Returns `false` without writing
    /// anything when `records` is empty.
    fn load(&self, records: &[Record], format: OutputFormat, output_path: &Path) -> Result<bool>;
}
