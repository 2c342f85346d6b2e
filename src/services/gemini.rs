use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};

use super::VisionService;
use crate::config::Config;
use crate::error::RemoteError;
use crate::models::ImagePayload;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    text: String,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiService {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.google_api_key.clone(),
            model: config.gemini_model.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn request_body(prompt: &str, image: &ImagePayload) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: general_purpose::STANDARD.encode(&image.data),
                        },
                    },
                ],
            }],
        }
    }

    fn classify_failure(status: reqwest::StatusCode, message: String) -> RemoteError {
        match status.as_u16() {
            401 | 403 => RemoteError::Auth,
            429 => RemoteError::Quota,
            status => RemoteError::Api { status, message },
        }
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String, RemoteError> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(RemoteError::EmptyResponse)
    }
}

#[async_trait::async_trait]
impl VisionService for GeminiService {
    async fn describe_image(
        &self,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<String, RemoteError> {
        let request = Self::request_body(prompt, image);

        log::info!("🤖 Sending request to Gemini with model: {}", self.model);
        log::debug!(
            "📊 Image payload: {} ({} bytes)",
            image.mime_type,
            image.data.len()
        );

        let url = format!("{}/{}:generateContent", API_BASE_URL, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Gemini response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ Gemini API error ({}): {}", status, error_text);
            return Err(Self::classify_failure(status, error_text));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = Self::extract_text(parsed)?;

        log::info!("💬 Gemini returned {} characters", text.len());

        Ok(text)
    }
}
