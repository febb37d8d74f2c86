use crate::core::flatten::flatten_pages;
use crate::core::serialize;
use crate::core::{OutputFormat, PageTables, Pipeline, Record, RecordSet, Storage, TableDetector};
use crate::utils::error::Result;
use std::path::Path;

/// Detect → flatten → serialize pipeline over a [`TableDetector`] and a
/// [`Storage`].
pub struct TablePipeline<D: TableDetector, S: Storage> {
    detector: D,
    storage: S,
}

impl<D: TableDetector, S: Storage> TablePipeline<D, S> {
    pub fn new(detector: D, storage: S) -> Self {
        Self { detector, storage }
    }
}

impl<D: TableDetector, S: Storage> Pipeline for TablePipeline<D, S> {
    fn extract(&self, pdf_path: &Path) -> Result<Vec<PageTables>> {
        tracing::debug!("Detecting tables in {}", pdf_path.display());
        let pages = self.detector.detect_tables(pdf_path)?;
        tracing::debug!(
            "Found {} table(s) on {} page(s)",
            pages.iter().map(|p| p.tables.len()).sum::<usize>(),
            pages.len()
        );
        Ok(pages)
    }

    fn transform(&self, pages: Vec<PageTables>) -> Result<RecordSet> {
        let records = flatten_pages(&pages);
        tracing::debug!("Flattened tables into {} record(s)", records.len());
        Ok(records)
    }

    fn load(&self, records: &[Record], format: OutputFormat, output_path: &Path) -> Result<bool> {
        if records.is_empty() {
            return Ok(false);
        }

        let data = serialize::render(records, format)?;
        tracing::debug!(
            "Writing {} record(s) as {} ({} bytes) to {}",
            records.len(),
            format,
            data.len(),
            output_path.display()
        );
        self.storage.write_file(output_path, &data)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ToolError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MockDetector {
        pages: Vec<PageTables>,
    }

    impl TableDetector for MockDetector {
        fn detect_tables(&self, _pdf_path: &Path) -> Result<Vec<PageTables>> {
            Ok(self.pages.clone())
        }
    }

    struct FailingDetector;

    impl TableDetector for FailingDetector {
        fn detect_tables(&self, pdf_path: &Path) -> Result<Vec<PageTables>> {
            Err(ToolError::DetectionError {
                path: pdf_path.display().to_string(),
                message: "not a PDF".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                ToolError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                ))
            })
        }

        fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), data.to_vec());
            Ok(())
        }
    }

    fn page(number: u32, rows: &[&[&str]]) -> PageTables {
        PageTables {
            page_number: number,
            tables: vec![rows
                .iter()
                .map(|row| row.iter().map(|c| Some(c.to_string())).collect())
                .collect()],
        }
    }

    #[test]
    fn test_extract_then_transform() {
        let detector = MockDetector {
            pages: vec![page(1, &[&["A", "B"], &["1", "2"], &["3", "4"]])],
        };
        let pipeline = TablePipeline::new(detector, MockStorage::default());

        let pages = pipeline.extract(Path::new("in.pdf")).unwrap();
        let records = pipeline.transform(pages).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("B"), Some("4"));
    }

    #[test]
    fn test_extract_propagates_detection_failure() {
        let pipeline = TablePipeline::new(FailingDetector, MockStorage::default());

        let err = pipeline.extract(Path::new("broken.pdf")).unwrap_err();

        assert!(matches!(err, ToolError::DetectionError { .. }));
    }

    #[test]
    fn test_load_writes_rendered_output() {
        let pipeline = TablePipeline::new(MockDetector { pages: vec![] }, MockStorage::default());
        let records = vec![[("A", "1")].into_iter().collect::<Record>()];

        let written = pipeline
            .load(&records, OutputFormat::Csv, Path::new("out.csv"))
            .unwrap();

        assert!(written);
        assert_eq!(
            pipeline.storage.get_file("out.csv").unwrap(),
            b"A\r\n1\r\n".to_vec()
        );
    }

    #[test]
    fn test_load_skips_empty_record_set() {
        let pipeline = TablePipeline::new(MockDetector { pages: vec![] }, MockStorage::default());

        let written = pipeline
            .load(&[], OutputFormat::Json, Path::new("out.json"))
            .unwrap();

        assert!(!written);
        assert!(pipeline.storage.get_file("out.json").is_none());
    }
}
