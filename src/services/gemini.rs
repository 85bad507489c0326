//! Gemini / Imagen REST client.
//!
//! Text calls go to `models/{model}:generateContent`, image calls to
//! `models/{model}:predict`. The API key travels in the `x-goog-api-key`
//! header so it never shows up in logged URLs.

use crate::domain::model::{GeneratedImage, ImageRequest, TextRequest};
use crate::domain::ports::GenerativeBackend;
use crate::utils::error::{PresenterError, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, base_url, None)
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PresenterError::MissingConfigError {
                field: "api_key".to_string(),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R> {
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Gemini response status: {}", status);

        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_text(&self, request: &TextRequest) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig::from_request(request),
        };

        let url = self.endpoint(&request.model, "generateContent");
        let response: GenerateContentResponse = self.post(&url, &body).await?;
        extract_text_response(response)
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<GeneratedImage> {
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: request.number_of_images,
                aspect_ratio: request.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: request.mime_type.clone(),
                },
            },
        };

        let url = self.endpoint(&request.model, "predict");
        let response: PredictResponse = self.post(&url, &body).await?;

        let prediction = response
            .predictions
            .and_then(|predictions| predictions.into_iter().next())
            .ok_or_else(|| PresenterError::ProcessingError {
                message: "Imagen returned no predictions".to_string(),
            })?;

        let base64_data =
            prediction
                .bytes_base64_encoded
                .ok_or_else(|| PresenterError::ProcessingError {
                    message: "Imagen prediction carries no image bytes".to_string(),
                })?;

        // 先解碼確認內容有效，壞掉的資料交給上層走 fallback
        if let Err(e) = BASE64_STANDARD.decode(base64_data.trim()) {
            return Err(PresenterError::ProcessingError {
                message: format!("Imagen returned invalid image bytes: {}", e),
            });
        }

        Ok(GeneratedImage {
            mime_type: request.mime_type.clone(),
            base64_data: base64_data.trim().to_string(),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    fn from_request(request: &TextRequest) -> Option<Self> {
        if request.temperature.is_none() && request.response_schema.is_none() {
            return None;
        }

        Some(Self {
            temperature: request.temperature,
            response_mime_type: request
                .response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: request.response_schema.clone(),
        })
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_options: OutputOptions,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Option<Vec<Prediction>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Concatenates the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(PresenterError::ProcessingError {
            message: "Gemini API returned no text in the response candidates".to_string(),
        });
    }

    Ok(text)
}

fn map_http_error(status: StatusCode, body: String) -> PresenterError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    PresenterError::HttpStatusError {
        status: status.as_u16(),
        message,
    }
}
