use clap::Parser;
use pdf_table_tools::config::toml_config::ToolConfig;
use pdf_table_tools::utils::logger;
use pdf_table_tools::utils::validation::{validate_required_field, Validate};
use pdf_table_tools::{
    ExtractCliConfig, ExtractionEngine, LocalStorage, TabulaDetector, TablePipeline, ToolError,
};

fn main() {
    let config = ExtractCliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting pdf-tables");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 所有錯誤都在這裡回報，程序一律正常結束
    if let Err(e) = run(config) {
        tracing::error!("❌ Extraction failed: {} (Category: {:?})", e, e.category());
        println!("❌ Error: {}", e.user_friendly_message());
        println!("💡 Suggestion: {}", e.recovery_suggestion());
    }
}

fn run(mut config: ExtractCliConfig) -> Result<(), ToolError> {
    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path.display());
        let file_config = ToolConfig::from_file(&path)?;
        config.apply_file_defaults(&file_config);
    }

    config.validate()?;

    let detector = build_detector(&config)?;
    let pipeline = TablePipeline::new(detector, LocalStorage::new());
    let engine = ExtractionEngine::new(pipeline, config);

    let summary = engine.run()?;
    tracing::info!(
        "Done: {} file(s) read, {} row(s), {} output(s), {} failure(s)",
        summary.files_processed,
        summary.total_rows,
        summary.outputs.len(),
        summary.failures.len()
    );

    Ok(())
}

fn build_detector(config: &ExtractCliConfig) -> Result<TabulaDetector, ToolError> {
    let jar = validate_required_field(
        "tabula_jar (--tabula-jar or TABULA_JAR)",
        &config.tabula_jar,
    )?;
    TabulaDetector::new(jar)
}
