use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingScenario {
    pub option: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    #[serde(rename = "bestFor")]
    pub best_for: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Where the prompt of the current generation cycle came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PromptSource {
    Persona(Persona),
    Custom(String),
}

impl PromptSource {
    pub fn prompt(&self) -> &str {
        match self {
            PromptSource::Persona(persona) => &persona.prompt,
            PromptSource::Custom(text) => text,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PromptSource::Persona(persona) => &persona.name,
            PromptSource::Custom(_) => "Custom customer data",
        }
    }
}

/// Generated content of one presentation; cleared at the start of every cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub source: Option<PromptSource>,
    pub benefits: String,
    pub image_url: String,
    pub financing_scenarios: Vec<FinancingScenario>,
    pub faq: Vec<FaqItem>,
    pub generated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingStates {
    pub benefits: bool,
    pub image: bool,
    pub financing: bool,
    pub faq: bool,
}

impl LoadingStates {
    pub fn is_idle(&self) -> bool {
        !(self.benefits || self.image || self.financing || self.faq)
    }

    pub fn is_loading(&self, stage: GenerationStage) -> bool {
        match stage {
            GenerationStage::Benefits => self.benefits,
            GenerationStage::Image => self.image,
            GenerationStage::Financing => self.financing,
            GenerationStage::Faq => self.faq,
        }
    }

    /// The stage currently in flight, if any.
    pub fn active_stage(&self) -> Option<GenerationStage> {
        GenerationStage::ALL
            .into_iter()
            .find(|stage| self.is_loading(*stage))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStage {
    Benefits,
    Image,
    Financing,
    Faq,
}

impl GenerationStage {
    pub const ALL: [GenerationStage; 4] = [
        GenerationStage::Benefits,
        GenerationStage::Image,
        GenerationStage::Financing,
        GenerationStage::Faq,
    ];

    pub fn spinner_message(&self) -> &'static str {
        match self {
            GenerationStage::Benefits => "Generating personalized benefits...",
            GenerationStage::Image => "Creating inspirational imagery...",
            GenerationStage::Financing => "Calculating financing options...",
            GenerationStage::Faq => "Preparing common questions...",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GenerationStage::Benefits => "benefits",
            GenerationStage::Image => "image",
            GenerationStage::Financing => "financing",
            GenerationStage::Faq => "faq",
        };
        f.write_str(name)
    }
}

/// Request for a plain or structured text completion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: Option<f32>,
    /// JSON schema of the expected response; `None` for free text.
    pub response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub number_of_images: u32,
    pub mime_type: String,
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub base64_data: String,
}

impl GeneratedImage {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financing_scenario_uses_wire_field_names() {
        let json = serde_json::json!({
            "option": "Solar Loan",
            "pros": ["You own the system"],
            "cons": ["Requires good credit"],
            "bestFor": "Owners"
        });
        let scenario: FinancingScenario = serde_json::from_value(json).unwrap();
        assert_eq!(scenario.best_for, "Owners");

        let back = serde_json::to_value(&scenario).unwrap();
        assert!(back.get("bestFor").is_some());
        assert!(back.get("best_for").is_none());
    }

    #[test]
    fn test_financing_scenario_requires_all_fields() {
        let json = serde_json::json!({ "option": "Cash", "pros": [] });
        assert!(serde_json::from_value::<FinancingScenario>(json).is_err());
    }

    #[test]
    fn test_loading_states_active_stage() {
        let mut loading = LoadingStates::default();
        assert!(loading.is_idle());
        assert_eq!(loading.active_stage(), None);

        loading.image = true;
        assert!(!loading.is_idle());
        assert_eq!(loading.active_stage(), Some(GenerationStage::Image));
    }

    #[test]
    fn test_prompt_source_prompt() {
        let custom = PromptSource::Custom("A retired couple".to_string());
        assert_eq!(custom.prompt(), "A retired couple");
        assert_eq!(custom.label(), "Custom customer data");
    }

    #[test]
    fn test_generated_image_data_url() {
        let image = GeneratedImage {
            mime_type: "image/jpeg".to_string(),
            base64_data: "AAAA".to_string(),
        };
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,AAAA");
    }
}
