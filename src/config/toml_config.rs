use crate::core::OutputFormat;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file shared by both tools.
///
/// ```toml
/// [extract]
/// format = "csv"
/// tabula_jar = "${TABULA_HOME}/tabula.jar"
///
/// [translate.keys]
/// "例句" = "example"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    pub extract: Option<ExtractConfig>,
    pub translate: Option<TranslateConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub format: Option<OutputFormat>,
    pub merge: Option<bool>,
    pub tabula_jar: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslateConfig {
    pub keys: Option<IndexMap<String, String>>,
}

impl ToolConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ToolError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| ToolError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${TABULA_HOME})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ToolError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn extract_format(&self) -> Option<OutputFormat> {
        self.extract.as_ref().and_then(|e| e.format)
    }

    pub fn extract_merge(&self) -> Option<bool> {
        self.extract.as_ref().and_then(|e| e.merge)
    }

    pub fn tabula_jar(&self) -> Option<&str> {
        self.extract.as_ref().and_then(|e| e.tabula_jar.as_deref())
    }

    /// Extra key mappings, in file order.
    pub fn extra_keys(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.translate
            .iter()
            .filter_map(|t| t.keys.as_ref())
            .flat_map(|keys| keys.iter().map(|(k, v)| (k.clone(), v.clone())))
    }
}

impl Validate for ToolConfig {
    fn validate(&self) -> Result<()> {
        if let Some(jar) = self.tabula_jar() {
            validate_non_empty_string("extract.tabula_jar", jar)?;
        }

        for (source, target) in self.extra_keys() {
            validate_non_empty_string("translate.keys", &source)?;
            if target.trim().is_empty() {
                return Err(ToolError::InvalidConfigValueError {
                    field: format!("translate.keys.{}", source),
                    value: target,
                    reason: "Target key cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}
