use crate::core::{ConfigProvider, OutputFormat, Pipeline, RecordSet};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// `<input_dir>/<input_stem>_table.<format>`
pub fn default_output_path(pdf_path: &Path, format: OutputFormat) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input_dir(pdf_path).join(format!("{}_table.{}", stem, format.extension()))
}

/// `<first_input_dir>/merged_tables.<format>`
pub fn default_merge_output_path(first_pdf: &Path, format: OutputFormat) -> PathBuf {
    input_dir(first_pdf).join(format!("merged_tables.{}", format.extension()))
}

fn input_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

/// Outcome of one extraction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub files_processed: usize,
    pub total_rows: usize,
    pub outputs: Vec<PathBuf>,
    pub warnings: Vec<String>,
    pub failures: Vec<String>,
}

pub struct ExtractionEngine<P: Pipeline, C: ConfigProvider> {
    pipeline: P,
    config: C,
}

impl<P: Pipeline, C: ConfigProvider> ExtractionEngine<P, C> {
    pub fn new(pipeline: P, config: C) -> Self {
        Self { pipeline, config }
    }

    /// Runs in merge or per-file mode depending on the configuration.
    ///
    /// Documents that cannot be read are reported and skipped in both modes;
    /// in per-file mode the run moves on to the next document instead of
    /// stopping. Errors while writing output end the run.
    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!(
            "Processing {} file(s) as {} (merge: {})",
            self.config.pdf_paths().len(),
            self.config.format(),
            self.config.merge()
        );

        if self.config.merge() {
            self.run_merged()
        } else {
            self.run_per_file()
        }
    }

    fn extract_records(&self, pdf_path: &Path) -> Result<RecordSet> {
        let pages = self.pipeline.extract(pdf_path)?;
        self.pipeline.transform(pages)
    }

    fn run_per_file(&self) -> Result<RunSummary> {
        let paths = self.config.pdf_paths();
        let format = self.config.format();
        let mut summary = RunSummary::default();

        let explicit_output = match self.config.output() {
            Some(output) if paths.len() > 1 => {
                let warning = format!(
                    "--output {} is ignored when processing multiple files without --merge",
                    output.display()
                );
                println!("⚠️  Warning: {}", warning);
                tracing::warn!("{}", warning);
                summary.warnings.push(warning);
                None
            }
            other => other,
        };

        for pdf_path in paths {
            let records = match self.extract_records(pdf_path) {
                Ok(records) => records,
                Err(e) => {
                    let failure = format!("Failed to read {}: {}", pdf_path.display(), e);
                    println!("❌ {}", failure);
                    tracing::error!("{}", failure);
                    summary.failures.push(failure);
                    continue;
                }
            };
            summary.files_processed += 1;

            if records.is_empty() {
                let warning = format!("No table data found in {}", pdf_path.display());
                println!("{}!", warning);
                tracing::warn!("{}", warning);
                summary.warnings.push(warning);
                continue;
            }

            let output_path = explicit_output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| default_output_path(pdf_path, format));
            self.pipeline.load(&records, format, &output_path)?;

            println!(
                "✅ Extracted {} rows of table data from {} to {}",
                records.len(),
                pdf_path.display(),
                output_path.display()
            );
            summary.total_rows += records.len();
            summary.outputs.push(output_path);
        }

        if summary.total_rows > 0 {
            println!(
                "\nProcessed {} files, extracted {} rows in total",
                paths.len(),
                summary.total_rows
            );
        }

        Ok(summary)
    }

    fn run_merged(&self) -> Result<RunSummary> {
        let paths = self.config.pdf_paths();
        let format = self.config.format();
        let mut summary = RunSummary::default();
        let mut all_records = RecordSet::new();

        for pdf_path in paths {
            match self.extract_records(pdf_path) {
                Ok(records) if records.is_empty() => {
                    summary.files_processed += 1;
                    let warning = format!("No table data found in {}", pdf_path.display());
                    println!("⚠️  Warning: {}", warning);
                    tracing::warn!("{}", warning);
                    summary.warnings.push(warning);
                }
                Ok(records) => {
                    summary.files_processed += 1;
                    tracing::debug!("{} row(s) from {}", records.len(), pdf_path.display());
                    all_records.extend(records);
                }
                Err(e) => {
                    let failure = format!("Skipping {}: {}", pdf_path.display(), e);
                    println!("⚠️  Warning: {}", failure);
                    tracing::error!("{}", failure);
                    summary.failures.push(failure);
                }
            }
        }

        if all_records.is_empty() {
            println!("❌ Error: no table data found in any of the input files!");
            return Ok(summary);
        }

        let output_path = match (self.config.output(), paths.first()) {
            (Some(output), _) => output.to_path_buf(),
            (None, Some(first)) => default_merge_output_path(first, format),
            (None, None) => default_merge_output_path(Path::new(""), format),
        };
        self.pipeline.load(&all_records, format, &output_path)?;

        println!(
            "✅ Merged {} rows of table data into {}",
            all_records.len(),
            output_path.display()
        );
        summary.total_rows = all_records.len();
        summary.outputs.push(output_path);

        Ok(summary)
    }
}
