use crate::utils::error::{PresenterError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub enabled: Option<bool>,
    pub compress: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PresenterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PresenterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PresenterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// API key, ignoring empty values and placeholders whose variable was unset.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty() && !(key.starts_with("${") && key.ends_with('}')))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        if let Some(base_url) = &self.gemini.base_url {
            validate_url("gemini.base_url", base_url)?;
        }
        if let Some(model) = &self.gemini.text_model {
            validate_non_empty_string("gemini.text_model", model)?;
        }
        if let Some(model) = &self.gemini.image_model {
            validate_non_empty_string("gemini.image_model", model)?;
        }
        if let Some(temperature) = self.gemini.temperature {
            validate_range("gemini.temperature", temperature, 0.0, 2.0)?;
        }
        if let Some(path) = &self.output.path {
            validate_path("output.path", path)?;
        }
        Ok(())
    }
}
