pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::{ExtractCliConfig, TranslateCliConfig};

#[cfg(feature = "cli")]
mod args {
    use crate::config::toml_config::ToolConfig;
    use crate::core::{ConfigProvider, OutputFormat};
    use crate::utils::error::{Result, ToolError};
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "pdf-tables")]
    #[command(about = "Extract table data from PDF files as JSON, CSV or XML")]
    pub struct ExtractCliConfig {
        /// PDF files to extract tables from
        #[arg(required = true)]
        pub pdf_paths: Vec<PathBuf>,

        /// Output format [default: json]
        #[arg(long, value_enum)]
        pub format: Option<OutputFormat>,

        /// Output file path; ignored when several files are processed without --merge
        #[arg(long)]
        pub output: Option<PathBuf>,

        /// Merge the tables of all input files into one output file
        #[arg(long)]
        pub merge: bool,

        /// Path to the tabula-java jar used for table detection
        #[arg(long, env = "TABULA_JAR")]
        pub tabula_jar: Option<String>,

        /// Optional TOML settings file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ExtractCliConfig {
        /// Fills settings not given on the command line from `file`.
        pub fn apply_file_defaults(&mut self, file: &ToolConfig) {
            if self.format.is_none() {
                self.format = file.extract_format();
            }
            if !self.merge {
                self.merge = file.extract_merge().unwrap_or(false);
            }
            if self.tabula_jar.is_none() {
                self.tabula_jar = file.tabula_jar().map(str::to_string);
            }
        }
    }

    impl Validate for ExtractCliConfig {
        fn validate(&self) -> Result<()> {
            if self.pdf_paths.is_empty() {
                return Err(ToolError::MissingConfigError {
                    field: "pdf_paths".to_string(),
                });
            }
            for path in &self.pdf_paths {
                validate_path("pdf_paths", path)?;
            }
            if let Some(output) = &self.output {
                validate_path("output", output)?;
            }
            Ok(())
        }
    }

    impl ConfigProvider for ExtractCliConfig {
        fn pdf_paths(&self) -> &[PathBuf] {
            &self.pdf_paths
        }

        fn format(&self) -> OutputFormat {
            self.format.unwrap_or_default()
        }

        fn output(&self) -> Option<&Path> {
            self.output.as_deref()
        }

        fn merge(&self) -> bool {
            self.merge
        }
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "tranjson")]
    #[command(about = "Rename the keys of a JSON file using the vocabulary key map")]
    pub struct TranslateCliConfig {
        /// Input JSON file
        pub input: PathBuf,

        /// Output JSON file [default: <input>_en.<ext>]
        #[arg(short, long)]
        pub output: Option<PathBuf>,

        /// Optional TOML settings file with extra [translate.keys]
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl Validate for TranslateCliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            if let Some(output) = &self.output {
                validate_path("output", output)?;
            }
            Ok(())
        }
    }

}
