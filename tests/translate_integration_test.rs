use anyhow::Result;
use pdf_table_tools::config::toml_config::ToolConfig;
use pdf_table_tools::{JsonKeyTranslator, KeyMap, LocalStorage, ToolError};
use serde_json::{json, Value};
use tempfile::TempDir;

#[test]
fn test_translate_file_to_default_path() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("vocab.json");
    std::fs::write(
        &input,
        r#"[
  {"序号": "1", "发音": "māo", "音调": "1", "单词": "猫", "词性": "n.", "释义": "cat", "笔记": ""},
  {"序号": "2", "单词": "狗", "extra": {"释义": "dog"}}
]"#,
    )?;

    let translator = JsonKeyTranslator::new(LocalStorage::new(), KeyMap::builtin().clone());
    let output = translator.process_file(&input, None)?;

    assert_eq!(output, temp_dir.path().join("vocab_en.json"));
    let text = std::fs::read_to_string(&output)?;
    assert!(text.contains("\"word\": \"猫\""));

    let value: Value = serde_json::from_str(&text)?;
    assert_eq!(
        value,
        json!([
            {"number": "1", "pronunciation": "māo", "tone": "1", "word": "猫",
             "part_of_speech": "n.", "meaning": "cat", "note": ""},
            {"number": "2", "word": "狗", "extra": {"meaning": "dog"}}
        ])
    );

    Ok(())
}

#[test]
fn test_translate_twice_is_stable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("words.json");
    std::fs::write(&input, r#"{"单词": "猫", "list": [{"释义": "cat"}]}"#)?;

    let translator = JsonKeyTranslator::new(LocalStorage::new(), KeyMap::builtin().clone());
    let first = translator.process_file(&input, None)?;
    let again = temp_dir.path().join("again.json");
    let second = translator.process_file(&first, Some(again.as_path()))?;

    let first_value: Value = serde_json::from_str(&std::fs::read_to_string(first)?)?;
    let second_value: Value = serde_json::from_str(&std::fs::read_to_string(second)?)?;
    assert_eq!(first_value, second_value);

    Ok(())
}

#[test]
fn test_invalid_json_input_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("broken.json");
    std::fs::write(&input, "{ not json")?;

    let translator = JsonKeyTranslator::new(LocalStorage::new(), KeyMap::builtin().clone());
    let err = translator.process_file(&input, None).unwrap_err();

    assert!(matches!(err, ToolError::InvalidJsonError { .. }));
    assert!(!temp_dir.path().join("broken_en.json").exists());

    Ok(())
}

#[test]
fn test_extra_keys_from_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("tools.toml");
    std::fs::write(&config_path, "[translate.keys]\n\"例句\" = \"example\"\n")?;
    let input = temp_dir.path().join("vocab.json");
    std::fs::write(&input, r#"{"单词": "猫", "例句": "我有一只猫"}"#)?;

    let file_config = ToolConfig::from_file(&config_path)?;
    let key_map = KeyMap::builtin().extended(file_config.extra_keys());
    let translator = JsonKeyTranslator::new(LocalStorage::new(), key_map);
    let output = translator.process_file(&input, None)?;

    let value: Value = serde_json::from_str(&std::fs::read_to_string(output)?)?;
    assert_eq!(value, json!({"word": "猫", "example": "我有一只猫"}));

    Ok(())
}
