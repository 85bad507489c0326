pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::services::gemini::DEFAULT_BASE_URL;
use crate::services::prompts::{DEFAULT_IMAGE_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TEXT_MODEL};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "solar-presenter")]
#[command(about = "Generate a solar sales presentation for a customer persona")]
pub struct CliConfig {
    #[arg(long, conflicts_with = "custom", help = "Built-in persona id (see --list-personas)")]
    pub persona: Option<String>,

    #[arg(long, help = "Free-text description of the customer")]
    pub custom: Option<String>,

    #[arg(long, help = "Also generate the FAQ section")]
    pub faq: bool,

    #[arg(long, help = "Gemini API key; falls back to API_KEY / GEMINI_API_KEY")]
    pub api_key: Option<String>,

    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, help = "Only print the presentation, write nothing to disk")]
    pub no_export: bool,

    #[arg(long, help = "Bundle exported files into presentation.zip")]
    pub zip: bool,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub text_model: Option<String>,

    #[arg(long)]
    pub image_model: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long, help = "List the built-in personas and exit")]
    pub list_personas: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after layering defaults, the TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
    pub timeout_seconds: Option<u64>,
    pub output_path: String,
    pub export_enabled: bool,
    pub compress: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            export_enabled: true,
            compress: false,
        }
    }
}

impl AppConfig {
    pub fn from_toml(toml: &TomlConfig) -> Self {
        let defaults = Self::default();
        let gemini = &toml.gemini;
        let output = &toml.output;

        Self {
            api_key: toml.api_key().map(str::to_string),
            base_url: gemini.base_url.clone().unwrap_or(defaults.base_url),
            text_model: gemini.text_model.clone().unwrap_or(defaults.text_model),
            image_model: gemini.image_model.clone().unwrap_or(defaults.image_model),
            temperature: gemini.temperature.unwrap_or(defaults.temperature),
            timeout_seconds: gemini.timeout_seconds,
            output_path: output.path.clone().unwrap_or(defaults.output_path),
            export_enabled: output.enabled.unwrap_or(defaults.export_enabled),
            compress: output.compress.unwrap_or(defaults.compress),
        }
    }

    /// CLI flags override the TOML file, which overrides defaults.
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, toml: Option<&TomlConfig>) -> Self {
        let mut config = toml.map(Self::from_toml).unwrap_or_default();

        if let Some(key) = cli.api_key.as_ref().filter(|key| !key.is_empty()) {
            config.api_key = Some(key.clone());
        }
        if let Some(base_url) = &cli.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &cli.text_model {
            config.text_model = model.clone();
        }
        if let Some(model) = &cli.image_model {
            config.image_model = model.clone();
        }
        if let Some(temperature) = cli.temperature {
            config.temperature = temperature;
        }
        if let Some(path) = &cli.output_path {
            config.output_path = path.clone();
        }
        if cli.no_export {
            config.export_enabled = false;
        }
        if cli.zip {
            config.compress = true;
        }
        config
    }
}

impl ConfigProvider for AppConfig {
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn api_base_url(&self) -> &str {
        &self.base_url
    }

    fn text_model(&self) -> &str {
        &self.text_model
    }

    fn image_model(&self) -> &str {
        &self.image_model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("text_model", &self.text_model)?;
        validate_non_empty_string("image_model", &self.image_model)?;
        validate_range("temperature", self.temperature, 0.0, 2.0)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 600)?;
        }
        if self.export_enabled {
            validate_path("output_path", &self.output_path)?;
        }
        Ok(())
    }
}
