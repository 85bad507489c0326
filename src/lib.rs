pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod services;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, AppConfig};

pub use core::{export::PresentationExporter, presenter::Presenter};
pub use domain::model::{FaqItem, FinancingScenario, LoadingStates, Persona, Presentation};
pub use services::{ContentService, GeminiClient};
pub use utils::error::{PresenterError, Result};
