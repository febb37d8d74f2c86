use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::domain::model::{PageTables, TableGrid};
use crate::domain::ports::TableDetector;
use crate::utils::error::{Result, ToolError};

/// Tables as written by Tabula's JSON output format.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct JsonTableSet(pub Vec<JsonTable>);

#[derive(Deserialize, Debug)]
pub struct JsonTable {
    pub page_number: u32,
    pub data: Vec<JsonRow>,
}

#[derive(Deserialize, Debug)]
pub struct JsonRow(pub Vec<JsonCell>);

#[derive(Deserialize, Debug)]
pub struct JsonCell {
    pub text: String,
}

impl JsonTableSet {
    /// Groups tables by page, in page order. Tables on the same page keep the
    /// order Tabula reported them in.
    pub fn into_pages(self) -> Vec<PageTables> {
        let mut tables = self.0;
        tables.sort_by_key(|t| t.page_number);

        let mut pages: Vec<PageTables> = Vec::new();
        for table in tables {
            let grid: TableGrid = table
                .data
                .into_iter()
                .map(|row| row.0.into_iter().map(|cell| Some(cell.text)).collect())
                .collect();
            match pages.last_mut() {
                Some(page) if page.page_number == table.page_number => page.tables.push(grid),
                _ => pages.push(PageTables {
                    page_number: table.page_number,
                    tables: vec![grid],
                }),
            }
        }
        pages
    }
}

/// [TableDetector] backed by tabula-java.
///
/// Must be created and used on a single thread.
pub struct TabulaDetector {
    vm: ::tabula::TabulaVM,
}

impl TabulaDetector {
    /// Starts a JVM with the Tabula jar at `libpath` on its classpath.
    pub fn new(libpath: &str) -> Result<Self> {
        let vm = ::tabula::TabulaVM::new(libpath, false).map_err(|e| ToolError::ConfigError {
            message: format!("starting Tabula from {}: {}", libpath, e),
        })?;
        Ok(Self { vm })
    }

    fn extract(&self, pdf_path: &Path) -> anyhow::Result<JsonTableSet> {
        let env = self.vm.attach().context("attaching to TabulaVM")?;

        let tabula = env
            .configure_tabula(
                None,
                None,
                ::tabula::OutputFormat::Json,
                true,
                ::tabula::ExtractionMethod::Decide,
                false,
                None,
            )
            .context("configuring Tabula to extract tables")?;

        let extracted_file = tempfile::NamedTempFile::new()
            .context("creating temporary file for extracted table data")?;
        tabula
            .parse_document_into(pdf_path, extracted_file.path())
            .context("extracting PDF table data")?;

        serde_json::from_reader(extracted_file).context("parsing JSON output from Tabula")
    }
}

impl TableDetector for TabulaDetector {
    fn detect_tables(&self, pdf_path: &Path) -> Result<Vec<PageTables>> {
        let table_set = self
            .extract(pdf_path)
            .map_err(|e| ToolError::DetectionError {
                path: pdf_path.display().to_string(),
                message: format!("{:#}", e),
            })?;
        Ok(table_set.into_pages())
    }
}
