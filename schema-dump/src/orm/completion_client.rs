use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use super::CompletionService;
use crate::http_client::{build_http_client, decode_json, read_json_response, ServiceOptions};
use crate::{Result, SchemaDumpError};

pub const COMPLETIONS_ENDPOINT: &str = "https://models.github.ai/inference/chat/completions";
pub const COMPLETION_MODEL: &str = "openai/gpt-4.1";

const CREATE_COMPLETION: &str = "create completion";

pub const SYSTEM_INSTRUCTION: &str = "You are an experienced software engineer with more than 20 years of experience, \
specialized in backend development, with vast knowledge of Python, Go, C++, Java, Rust, TypeScript and SQL. \
You mostly help with transforming a raw schema into an ORM model. \
For Python use the Django ORM, or SQLAlchemy if specified. For Go use GORM. For Rust use Diesel. \
For TypeScript use TypeORM. For Java use Spring Boot JDBC.";

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub model: String,
}

impl ChatCompletionRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: 1.0,
            top_p: 1.0,
            model: COMPLETION_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    pub content: String,
}

impl ChatCompletionResponse {
    /// The text of the first choice.
    pub fn into_content(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(SchemaDumpError::EmptyCompletion)
    }
}

pub fn parse_completion_response(body: &str) -> Result<String> {
    let response: ChatCompletionResponse = decode_json(body, CREATE_COMPLETION)?;
    response.into_content()
}

/// Client for an OpenAI style chat completions endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
}

impl ChatCompletionsClient {
    pub fn new(options: &ServiceOptions) -> Result<Self> {
        Self::with_endpoint(options, COMPLETIONS_ENDPOINT)
    }

    pub fn with_endpoint(options: &ServiceOptions, endpoint: &str) -> Result<Self> {
        Ok(Self {
            client: build_http_client(options)?,
            endpoint: endpoint.to_string(),
        })
    }
}

impl CompletionService for ChatCompletionsClient {
    #[instrument(skip_all)]
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&ChatCompletionRequest::new(prompt))
            .send()
            .await
            .map_err(|source| SchemaDumpError::HttpError {
                action: CREATE_COMPLETION,
                source,
            })?;

        let response: ChatCompletionResponse = read_json_response(response, CREATE_COMPLETION).await?;
        response.into_content()
    }
}
