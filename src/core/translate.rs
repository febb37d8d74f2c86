use crate::domain::ports::Storage;
use crate::utils::error::{Result, ToolError};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

static BUILTIN_KEY_MAP: Lazy<KeyMap> = Lazy::new(|| {
    KeyMap::from_pairs([
        ("序号", "number"),
        ("发音", "pronunciation"),
        ("音调", "tone"),
        ("单词", "word"),
        ("词性", "part_of_speech"),
        ("释义", "meaning"),
        ("笔记", "note"),
    ])
});

/// Source-key to target-key rename table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    entries: IndexMap<String, String>,
}

impl KeyMap {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The vocabulary-table mapping shipped with the tools.
    pub fn builtin() -> &'static KeyMap {
        &BUILTIN_KEY_MAP
    }

    /// Returns a copy of this map with `extra` entries added. An extra entry
    /// replaces an existing one with the same source key.
    pub fn extended<I>(&self, extra: I) -> KeyMap
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries = self.entries.clone();
        entries.extend(extra);
        KeyMap { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Maps `key`, passing unknown keys through unchanged.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renames object keys throughout `value`.
///
/// Descends into object values and array elements; scalars come back as they
/// are. If two keys of one object map to the same target, the later value
/// wins.
pub fn translate_keys(value: &Value, map: &KeyMap) -> Value {
    match value {
        Value::Object(object) => {
            let mut translated = Map::with_capacity(object.len());
            for (key, inner) in object {
                translated.insert(map.translate(key).to_string(), translate_keys(inner, map));
            }
            Value::Object(translated)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| translate_keys(item, map)).collect())
        }
        scalar => scalar.clone(),
    }
}

/// `<dir>/<stem>_en<.ext>` next to the input file.
pub fn default_translated_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}_en.{}", stem, ext.to_string_lossy()),
        None => format!("{}_en", stem),
    };
    input.with_file_name(file_name)
}

/// Translates the keys of a JSON file and writes the result.
pub struct JsonKeyTranslator<S: Storage> {
    storage: S,
    key_map: KeyMap,
}

impl<S: Storage> JsonKeyTranslator<S> {
    pub fn new(storage: S, key_map: KeyMap) -> Self {
        Self { storage, key_map }
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    /// Returns the path written to.
    pub fn process_file(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        let output_path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_translated_path(input));

        tracing::debug!("Reading JSON from {}", input.display());
        let raw = self.storage.read_file(input)?;
        let data: Value =
            serde_json::from_slice(&raw).map_err(|source| ToolError::InvalidJsonError {
                path: input.display().to_string(),
                source,
            })?;

        let converted = translate_keys(&data, &self.key_map);

        let bytes = serde_json::to_vec_pretty(&converted)?;
        tracing::debug!(
            "Writing {} bytes of translated JSON to {}",
            bytes.len(),
            output_path.display()
        );
        self.storage.write_file(&output_path, &bytes)?;

        Ok(output_path)
    }
}
