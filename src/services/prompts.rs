//! Prompt texts and response schemas for the four generation calls.

use crate::domain::model::{ImageRequest, TextRequest};
use serde_json::{json, Value};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";
pub const IMAGE_ASPECT_RATIO: &str = "16:9";

pub fn benefits_prompt(persona_prompt: &str) -> String {
    format!(
        "Generate a short, easy-to-read paragraph (around 100 words) explaining the primary benefits of residential solar panels for the following customer type: \"{}\". Focus on what they care about most. Use a positive and trustworthy tone.",
        persona_prompt
    )
}

pub fn image_prompt(benefits_text: &str) -> String {
    format!(
        "Create a vibrant, photorealistic lifestyle image of happy homeowners enjoying the benefits of solar energy, inspired by this theme: \"{}\". The image should feel warm, optimistic, and modern. Show a clean, beautiful home with subtle solar panels. Focus on the people feeling happy and secure.",
        benefits_text
    )
}

pub fn financing_prompt(persona_prompt: &str) -> String {
    format!(
        "Generate three distinct solar financing scenarios (e.g., Loan, Cash Purchase, Lease/PPA) tailored for a customer described as: \"{}\". For each scenario, provide a name, 2-3 brief 'pros', 2 'cons', and a 'best for' summary. The tone should be clear, objective, and helpful.",
        persona_prompt
    )
}

pub fn faq_prompt(persona_prompt: &str, benefits_text: &str) -> String {
    format!(
        "Generate a concise FAQ with 3 questions and answers for a potential solar customer described as \"{}\", who has just learned about these benefits: \"{}\". The questions should anticipate their primary concerns. Answers should be reassuring and easy to understand.",
        persona_prompt, benefits_text
    )
}

pub fn financing_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "option": { "type": "STRING" },
                "pros": { "type": "ARRAY", "items": { "type": "STRING" } },
                "cons": { "type": "ARRAY", "items": { "type": "STRING" } },
                "bestFor": { "type": "STRING" }
            },
            "required": ["option", "pros", "cons", "bestFor"]
        }
    })
}

pub fn faq_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "answer": { "type": "STRING" }
            },
            "required": ["question", "answer"]
        }
    })
}

/// Model names and sampling settings shared by the request builders.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSettings {
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl PromptSettings {
    pub fn benefits_request(&self, persona_prompt: &str) -> TextRequest {
        TextRequest {
            model: self.text_model.clone(),
            prompt: benefits_prompt(persona_prompt),
            temperature: Some(self.temperature),
            response_schema: None,
        }
    }

    pub fn image_request(&self, benefits_text: &str) -> ImageRequest {
        ImageRequest {
            model: self.image_model.clone(),
            prompt: image_prompt(benefits_text),
            number_of_images: 1,
            mime_type: IMAGE_MIME_TYPE.to_string(),
            aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
        }
    }

    pub fn financing_request(&self, persona_prompt: &str) -> TextRequest {
        TextRequest {
            model: self.text_model.clone(),
            prompt: financing_prompt(persona_prompt),
            temperature: None,
            response_schema: Some(financing_schema()),
        }
    }

    pub fn faq_request(&self, persona_prompt: &str, benefits_text: &str) -> TextRequest {
        TextRequest {
            model: self.text_model.clone(),
            prompt: faq_prompt(persona_prompt, benefits_text),
            temperature: None,
            response_schema: Some(faq_schema()),
        }
    }
}
