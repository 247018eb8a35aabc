use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ai_service::{AnalysisError, VisionAnalyzer};
use crate::config::Config;
use crate::models::NutritionItem;

const ANALYSIS_PROMPT: &str = "List every food item visible in this image with its estimated nutrition. \
Respond with a JSON object only, exactly in this format:\n\
{\"items\":[{\"item_name\":\"name of item\",\"total_calories\":kcal,\"total_protein\":grams,\"total_carbs\":grams,\"total_fats\":grams},...]}";

const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 1.0;
const MAX_COMPLETION_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        #[serde(rename = "type")]
        content_type: String,
        text: String,
    },
    ImageUrl {
        #[serde(rename = "type")]
        content_type: String,
        image_url: ImageData,
    },
}

#[derive(Debug, Serialize)]
struct ImageData {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
    model: String,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    stream: bool,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: Option<String>,
}

/// Groq chat completions client (OpenAI-compatible API)
pub struct GroqClient {
    api_key: Option<String>,
    api_url: String,
    model: String,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(config: &Config) -> Self {
        Self {
            api_key: config.groq_api_key.clone(),
            api_url: config.groq_api_url.clone(),
            model: config.groq_model.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, image_url: &str) -> ChatRequest {
        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text {
                    content_type: "text".to_string(),
                    text: ANALYSIS_PROMPT.to_string(),
                },
                ContentPart::ImageUrl {
                    content_type: "image_url".to_string(),
                    image_url: ImageData {
                        url: image_url.to_string(),
                    },
                },
            ],
        }];

        ChatRequest {
            messages,
            model: self.model.clone(),
            temperature: TEMPERATURE,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            top_p: TOP_P,
            stream: false,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        }
    }

    fn extract_content(body: &str) -> Result<String, AnalysisError> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| AnalysisError::MalformedResponse(format!("{}: {}", e, body)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AnalysisError::MalformedResponse(format!("no message content in: {}", body))
            })
    }

    /// Reads the `items` array out of the model's JSON answer.
    fn parse_items(content: &str) -> Result<Vec<NutritionItem>, AnalysisError> {
        let mut answer: Value = serde_json::from_str(content)?;

        match answer.get_mut("items").map(Value::take) {
            Some(items @ Value::Array(_)) => Ok(serde_json::from_value(items)?),
            _ => Err(AnalysisError::MissingItems),
        }
    }
}

#[async_trait::async_trait]
impl VisionAnalyzer for GroqClient {
    async fn analyze_image(&self, image_url: &str) -> Result<Vec<NutritionItem>, AnalysisError> {
        if image_url.is_empty() {
            return Err(AnalysisError::MissingUrl);
        }
        let api_key = self.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;

        log::info!("🤖 Sending {} to Groq with model: {}", image_url, self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&self.build_request(image_url))
            .send()
            .await?;

        let status = response.status();
        log::debug!("📥 Groq response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(AnalysisError::Status { status, body });
        }

        let content = Self::extract_content(&body)?;
        log::debug!("💬 Groq answer: {}", content);

        let items = Self::parse_items(&content)?;
        log::info!("✅ Model reported {} food item(s)", items.len());

        Ok(items)
    }
}
