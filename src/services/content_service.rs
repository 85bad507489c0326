use crate::domain::catalog::{
    fallback_faq, fallback_financing_scenarios, FALLBACK_BENEFITS, FALLBACK_IMAGE_URL,
};
use crate::domain::model::{FaqItem, FinancingScenario, TextRequest};
use crate::domain::ports::{ConfigProvider, ContentGenerator, GenerativeBackend};
use crate::services::gemini::{GeminiClient, DEFAULT_BASE_URL};
use crate::services::prompts::PromptSettings;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds a backend for an API key; swapped out in tests.
pub type BackendFactory = Box<dyn Fn(&str) -> Result<Box<dyn GenerativeBackend>> + Send + Sync>;

/// Generates presentation content, substituting canned content whenever the
/// live backend is missing or a call fails. Generators never return `Err`.
pub struct ContentService {
    backend: Option<Box<dyn GenerativeBackend>>,
    factory: BackendFactory,
    settings: PromptSettings,
}

impl ContentService {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let base_url = base_url.into();
        let factory: BackendFactory = Box::new(move |key: &str| {
            let client = GeminiClient::with_timeout(key, base_url.clone(), timeout)?;
            Ok(Box::new(client) as Box<dyn GenerativeBackend>)
        });

        Self {
            backend: None,
            factory,
            settings: PromptSettings::default(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut service = Self::new(
            config.api_base_url(),
            config.request_timeout_seconds().map(Duration::from_secs),
        )
        .with_settings(PromptSettings {
            text_model: config.text_model().to_string(),
            image_model: config.image_model().to_string(),
            temperature: config.temperature(),
        });

        if let Some(key) = config.api_key() {
            service.update_api_key(key);
        }
        service
    }

    pub fn with_factory(factory: BackendFactory) -> Self {
        Self {
            backend: None,
            factory,
            settings: PromptSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: PromptSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &PromptSettings {
        &self.settings
    }

    async fn structured<T: DeserializeOwned>(
        backend: &dyn GenerativeBackend,
        request: &TextRequest,
    ) -> Result<T> {
        let text = backend.generate_text(request).await?;
        Ok(serde_json::from_str(text.trim())?)
    }
}

impl Default for ContentService {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, None)
    }
}

#[async_trait]
impl ContentGenerator for ContentService {
    fn update_api_key(&mut self, key: &str) {
        if key.is_empty() {
            self.backend = None;
            return;
        }

        match (self.factory)(key) {
            Ok(backend) => self.backend = Some(backend),
            Err(e) => {
                tracing::error!("Error initializing Gemini AI with the provided key: {}", e);
                self.backend = None;
            }
        }
    }

    fn is_ai_ready(&self) -> bool {
        self.backend.is_some()
    }

    async fn generate_benefits(&self, persona_prompt: &str) -> Result<String> {
        let Some(backend) = self.backend.as_deref() else {
            return Ok(FALLBACK_BENEFITS.to_string());
        };

        let request = self.settings.benefits_request(persona_prompt);
        match backend.generate_text(&request).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::error!("Error generating benefits: {}", e);
                Ok(FALLBACK_BENEFITS.to_string())
            }
        }
    }

    async fn generate_image(&self, benefits_text: &str) -> Result<String> {
        let Some(backend) = self.backend.as_deref() else {
            return Ok(FALLBACK_IMAGE_URL.to_string());
        };

        let request = self.settings.image_request(benefits_text);
        match backend.generate_image(&request).await {
            Ok(image) => Ok(image.to_data_url()),
            Err(e) => {
                tracing::error!("Error generating image: {}", e);
                Ok(FALLBACK_IMAGE_URL.to_string())
            }
        }
    }

    async fn generate_financing_scenarios(
        &self,
        persona_prompt: &str,
    ) -> Result<Vec<FinancingScenario>> {
        let Some(backend) = self.backend.as_deref() else {
            return Ok(fallback_financing_scenarios());
        };

        let request = self.settings.financing_request(persona_prompt);
        match Self::structured(backend, &request).await {
            Ok(scenarios) => Ok(scenarios),
            Err(e) => {
                tracing::error!("Error generating financing scenarios: {}", e);
                Ok(fallback_financing_scenarios())
            }
        }
    }

    async fn generate_faq(
        &self,
        persona_prompt: &str,
        benefits_text: &str,
    ) -> Result<Vec<FaqItem>> {
        let Some(backend) = self.backend.as_deref() else {
            return Ok(fallback_faq());
        };

        let request = self.settings.faq_request(persona_prompt, benefits_text);
        match Self::structured(backend, &request).await {
            Ok(faq) => Ok(faq),
            Err(e) => {
                tracing::error!("Error generating FAQ: {}", e);
                Ok(fallback_faq())
            }
        }
    }
}
