use crate::domain::catalog::find_persona;
use crate::domain::model::{LoadingStates, Persona, Presentation, PromptSource};
use crate::domain::ports::ContentGenerator;
use crate::utils::error::{PresenterError, Result};
use chrono::Utc;
use tokio::sync::mpsc::UnboundedSender;

pub const GENERATION_ERROR_MESSAGE: &str =
    "An error occurred while generating content. Please try again.";
pub const FAQ_ERROR_MESSAGE: &str = "Failed to generate FAQ.";

/// Environment variables consulted, in order, when no user key is set.
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

pub fn env_api_key() -> Option<String> {
    lookup_api_key(|name| std::env::var(name).ok())
}

/// First non-empty value among `API_KEY_ENV_VARS`, read through `get`.
pub fn lookup_api_key<F>(get: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| get(name))
        .find(|value| !value.is_empty())
}

/// The user's key wins; the environment key is the fallback.
pub fn resolve_api_key(user_key: &str, env_key: Option<&str>) -> Option<String> {
    if !user_key.is_empty() {
        return Some(user_key.to_string());
    }
    env_key
        .filter(|key| !key.is_empty())
        .map(|key| key.to_string())
}

/// Presentation state plus the sequential generation pipeline.
///
/// Every mutation happens through `&mut self`, so the steps of a cycle run
/// strictly one after another.
pub struct Presenter<G: ContentGenerator> {
    generator: G,
    env_api_key: Option<String>,
    user_api_key: String,
    api_key_available: bool,
    selected_persona: Option<Persona>,
    custom_data: String,
    is_custom_mode: bool,
    presentation: Presentation,
    loading: LoadingStates,
    error: Option<String>,
    progress: Option<UnboundedSender<LoadingStates>>,
}

impl<G: ContentGenerator> Presenter<G> {
    pub fn new(generator: G) -> Self {
        let api_key_available = generator.is_ai_ready();
        Self {
            generator,
            env_api_key: env_api_key(),
            user_api_key: String::new(),
            api_key_available,
            selected_persona: None,
            custom_data: String::new(),
            is_custom_mode: false,
            presentation: Presentation::default(),
            loading: LoadingStates::default(),
            error: None,
            progress: None,
        }
    }

    pub fn with_env_api_key(mut self, key: Option<String>) -> Self {
        self.env_api_key = key;
        self
    }

    /// Every loading-flag transition is sent to `sender`.
    pub fn with_progress(mut self, sender: UnboundedSender<LoadingStates>) -> Self {
        self.progress = Some(sender);
        self
    }

    pub fn set_user_api_key(&mut self, key: &str) {
        self.user_api_key = key.to_string();

        match resolve_api_key(&self.user_api_key, self.env_api_key.as_deref()) {
            Some(key) => {
                self.generator.update_api_key(&key);
                self.api_key_available = self.generator.is_ai_ready();
            }
            None => {
                self.generator.update_api_key("");
                self.api_key_available = false;
            }
        }

        tracing::info!(
            "AI features {}",
            if self.api_key_available {
                "active"
            } else {
                "disabled, using fallback content"
            }
        );
    }

    pub fn set_custom_data(&mut self, text: &str) {
        self.custom_data = text.to_string();
    }

    pub fn reset_state(&mut self) {
        self.presentation = Presentation::default();
        self.error = None;
        self.set_loading(|loading| *loading = LoadingStates::default());
    }

    pub async fn select_persona(&mut self, persona: Persona) {
        self.reset_state();
        tracing::info!("Selected persona: {}", persona.name);

        let prompt = persona.prompt.clone();
        self.presentation.source = Some(PromptSource::Persona(persona.clone()));
        self.selected_persona = Some(persona);
        self.is_custom_mode = false;
        self.custom_data.clear();

        self.generate_content(&prompt).await;
    }

    pub async fn select_persona_by_id(&mut self, id: &str) -> Result<()> {
        let persona = find_persona(id).ok_or_else(|| PresenterError::PersonaNotFound {
            id: id.to_string(),
        })?;
        self.select_persona(persona).await;
        Ok(())
    }

    /// Returns `false` without touching state when `text` is blank.
    pub async fn submit_custom_data(&mut self, text: &str) -> bool {
        self.custom_data = text.to_string();
        if text.trim().is_empty() {
            tracing::warn!("Ignoring empty custom customer data");
            return false;
        }

        self.reset_state();
        self.selected_persona = None;
        self.is_custom_mode = true;
        self.presentation.source = Some(PromptSource::Custom(text.to_string()));

        self.generate_content(text).await;
        true
    }

    /// Benefits, then the image built from them, then financing. The first
    /// failing step aborts the rest of the cycle.
    pub async fn generate_content(&mut self, prompt: &str) {
        if let Err(e) = self.run_pipeline(prompt).await {
            tracing::error!("Content generation aborted: {}", e);
            self.error = Some(GENERATION_ERROR_MESSAGE.to_string());
            self.set_loading(|loading| *loading = LoadingStates::default());
        }
    }

    async fn run_pipeline(&mut self, prompt: &str) -> Result<()> {
        self.set_loading(|loading| loading.benefits = true);
        let benefits = self.generator.generate_benefits(prompt).await?;
        self.presentation.benefits = benefits;
        self.set_loading(|loading| {
            loading.benefits = false;
            loading.image = true;
        });

        let image_url = self
            .generator
            .generate_image(&self.presentation.benefits)
            .await?;
        self.presentation.image_url = image_url;
        self.set_loading(|loading| {
            loading.image = false;
            loading.financing = true;
        });

        let scenarios = self.generator.generate_financing_scenarios(prompt).await?;
        tracing::debug!("Received {} financing scenarios", scenarios.len());
        self.presentation.financing_scenarios = scenarios;
        self.set_loading(|loading| loading.financing = false);

        self.presentation.generated_at = Some(Utc::now());
        Ok(())
    }

    /// Returns `false` when there is no prompt or no benefits text yet.
    pub async fn generate_faq(&mut self) -> bool {
        let prompt = match &self.selected_persona {
            Some(persona) => persona.prompt.clone(),
            None => self.custom_data.clone(),
        };
        if prompt.is_empty() || self.presentation.benefits.is_empty() {
            return false;
        }

        self.set_loading(|loading| loading.faq = true);
        match self
            .generator
            .generate_faq(&prompt, &self.presentation.benefits)
            .await
        {
            Ok(faq) => self.presentation.faq = faq,
            Err(e) => {
                tracing::error!("FAQ generation failed: {}", e);
                self.error = Some(FAQ_ERROR_MESSAGE.to_string());
            }
        }
        self.set_loading(|loading| loading.faq = false);
        true
    }

    fn set_loading(&mut self, update: impl FnOnce(&mut LoadingStates)) {
        update(&mut self.loading);
        if let Some(stage) = self.loading.active_stage() {
            tracing::debug!("{}", stage.spinner_message());
        }
        if let Some(sender) = &self.progress {
            // 接收端已關閉時忽略
            let _ = sender.send(self.loading);
        }
    }

    pub fn has_active_prompt(&self) -> bool {
        self.selected_persona.is_some() || self.is_custom_mode
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn loading(&self) -> LoadingStates {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_persona(&self) -> Option<&Persona> {
        self.selected_persona.as_ref()
    }

    pub fn custom_data(&self) -> &str {
        &self.custom_data
    }

    pub fn is_custom_mode(&self) -> bool {
        self.is_custom_mode
    }

    pub fn api_key_available(&self) -> bool {
        self.api_key_available
    }

    pub fn user_api_key(&self) -> &str {
        &self.user_api_key
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
