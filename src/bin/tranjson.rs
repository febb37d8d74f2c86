use clap::Parser;
use pdf_table_tools::config::toml_config::ToolConfig;
use pdf_table_tools::utils::{logger, validation::Validate};
use pdf_table_tools::{JsonKeyTranslator, KeyMap, LocalStorage, ToolError, TranslateCliConfig};

fn main() {
    let config = TranslateCliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!("❌ Translation failed: {} (Category: {:?})", e, e.category());
        match e {
            ToolError::InvalidJsonError { path, .. } => {
                println!("❌ Error: {} is not a valid JSON file", path)
            }
            other => println!("❌ Error while processing file: {}", other),
        }
    }
}

fn run(config: &TranslateCliConfig) -> Result<(), ToolError> {
    config.validate()?;

    let key_map = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading extra key mappings from: {}", path.display());
            let file_config = ToolConfig::from_file(path)?;
            KeyMap::builtin().extended(file_config.extra_keys())
        }
        None => KeyMap::builtin().clone(),
    };

    let translator = JsonKeyTranslator::new(LocalStorage::new(), key_map);
    let output_path = translator.process_file(&config.input, config.output.as_deref())?;

    println!("✅ Conversion complete! Output file: {}", output_path.display());
    println!("Key mappings applied:");
    for (source, target) in translator.key_map().iter() {
        println!("  {} -> {}", source, target);
    }

    Ok(())
}
