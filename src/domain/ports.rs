use crate::domain::model::{
    FaqItem, FinancingScenario, GeneratedImage, ImageRequest, TextRequest,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human-readable location of `path` inside this storage.
    fn locate(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&str>;
    fn api_base_url(&self) -> &str;
    fn text_model(&self) -> &str;
    fn image_model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn request_timeout_seconds(&self) -> Option<u64>;
    fn output_path(&self) -> &str;
}

/// Raw access to a hosted generative model.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_text(&self, request: &TextRequest) -> Result<String>;
    async fn generate_image(&self, request: &ImageRequest) -> Result<GeneratedImage>;
}

/// The four presentation generators driven by the presenter.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Replaces the live client; an empty key disables live generation.
    fn update_api_key(&mut self, key: &str);
    fn is_ai_ready(&self) -> bool;

    async fn generate_benefits(&self, persona_prompt: &str) -> Result<String>;
    async fn generate_image(&self, benefits_text: &str) -> Result<String>;
    async fn generate_financing_scenarios(
        &self,
        persona_prompt: &str,
    ) -> Result<Vec<FinancingScenario>>;
    async fn generate_faq(&self, persona_prompt: &str, benefits_text: &str)
        -> Result<Vec<FaqItem>>;
}
