use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use super::CredentialIssuer;
use crate::http_client::{build_http_client, decode_json, read_json_response, ServiceOptions};
use crate::{Result, SchemaDumpError};

pub const TOKEN_ENDPOINT: &str = "https://utils.logizon.com/tokens";
pub const API_KEY_ENDPOINT: &str = "https://utils.logizon.com/utils/first";

const FETCH_TOKEN: &str = "fetch token";
const FETCH_API_KEY: &str = "fetch api key";

#[derive(Debug, Clone)]
pub struct CredentialEndpoints {
    pub token_url: String,
    pub api_key_url: String,
}

impl Default for CredentialEndpoints {
    fn default() -> Self {
        Self {
            token_url: TOKEN_ENDPOINT.to_string(),
            api_key_url: API_KEY_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub data: TokenData,
    pub message: Option<String>,
    pub status: Option<String>,
    pub status_code: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub token: String,
    pub created_at: Option<String>,
    pub id: Option<i64>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyResponse {
    pub data: ApiKeyData,
    pub message: Option<String>,
    pub status: Option<String>,
    pub status_code: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ApiKeyData {
    pub ai_apikey: String,
    pub created_at: Option<String>,
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Fetches tokens and api keys from the issuance service over http.
pub struct HttpCredentialIssuer {
    client: Client,
    endpoints: CredentialEndpoints,
}

impl HttpCredentialIssuer {
    pub fn new(options: &ServiceOptions) -> Result<Self> {
        Self::with_endpoints(options, CredentialEndpoints::default())
    }

    pub fn with_endpoints(options: &ServiceOptions, endpoints: CredentialEndpoints) -> Result<Self> {
        Ok(Self {
            client: build_http_client(options)?,
            endpoints,
        })
    }
}

impl CredentialIssuer for HttpCredentialIssuer {
    fn fetch_token(&self) -> impl std::future::Future<Output = Result<String>> + Send {
        let client = self.client.clone();
        let url = self.endpoints.token_url.clone();

        async move {
            // The request runs as its own task, the join handle carries back either the token or the error.
            let handle = tokio::spawn(request_token(client, url));
            handle.await?
        }
    }

    #[instrument(skip_all)]
    async fn fetch_api_key(&self, token: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoints.api_key_url)
            .header("Token", token)
            .send()
            .await
            .map_err(|source| SchemaDumpError::HttpError {
                action: FETCH_API_KEY,
                source,
            })?;

        let response: ApiKeyResponse = read_json_response(response, FETCH_API_KEY).await?;
        Ok(response.data.ai_apikey)
    }
}

#[instrument(skip_all)]
async fn request_token(client: Client, url: String) -> Result<String> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|source| SchemaDumpError::HttpError {
            action: FETCH_TOKEN,
            source,
        })?;

    let response: TokenResponse = read_json_response(response, FETCH_TOKEN).await?;
    Ok(response.data.token)
}

pub fn parse_token_response(body: &str) -> Result<String> {
    let response: TokenResponse = decode_json(body, FETCH_TOKEN)?;
    Ok(response.data.token)
}

pub fn parse_api_key_response(body: &str) -> Result<String> {
    let response: ApiKeyResponse = decode_json(body, FETCH_API_KEY)?;
    Ok(response.data.ai_apikey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::serve_once;

    fn issuer_for(url: &str) -> HttpCredentialIssuer {
        let endpoints = CredentialEndpoints {
            token_url: format!("{url}/tokens"),
            api_key_url: format!("{url}/utils/first"),
        };

        HttpCredentialIssuer::with_endpoints(&ServiceOptions::default(), endpoints).unwrap()
    }

    #[test]
    fn reads_token_from_data() {
        let body = r#"{
            "data": {"created_at": "2025-05-01T10:00:00Z", "id": 7, "ip_address": "10.0.0.1", "token": "abc123"},
            "message": "token created",
            "status": "success",
            "status_code": 201
        }"#;

        assert_eq!(parse_token_response(body).unwrap(), "abc123");
    }

    #[test]
    fn reads_api_key_from_data() {
        let body = r#"{
            "data": {"ai_apikey": "sk-test", "created_at": "2025-05-01T10:00:00Z", "id": 1, "name": "default"},
            "message": "ok",
            "status": "success",
            "status_code": 200
        }"#;

        assert_eq!(parse_api_key_response(body).unwrap(), "sk-test");
    }

    #[test]
    fn unexpected_shape_is_a_decode_error() {
        let result = parse_token_response(r#"{"token": "abc123"}"#);

        assert!(matches!(result, Err(SchemaDumpError::DecodeError { action: FETCH_TOKEN, .. })));
    }

    #[test]
    fn default_endpoints() {
        let endpoints = CredentialEndpoints::default();

        assert_eq!(endpoints.token_url, "https://utils.logizon.com/tokens");
        assert_eq!(endpoints.api_key_url, "https://utils.logizon.com/utils/first");
    }

    #[tokio::test]
    async fn token_comes_back_from_the_spawned_request() {
        let (url, server) = serve_once(200, r#"{"data": {"token": "t1"}, "status": "success"}"#).await;

        let token = issuer_for(&url).fetch_token().await.unwrap();

        assert_eq!(token, "t1");
        let request = server.await.unwrap();
        assert!(request.head.starts_with("get /tokens http/1.1\r\n"));
    }

    #[tokio::test]
    async fn token_request_failure_comes_back_from_the_spawned_request() {
        let (url, server) = serve_once(503, r#"{"message": "unavailable"}"#).await;

        let result = issuer_for(&url).fetch_token().await;

        match result {
            Err(SchemaDumpError::UnexpectedStatus { action, status }) => {
                assert_eq!(action, FETCH_TOKEN);
                assert_eq!(status.as_u16(), 503);
            }
            other => panic!("Expected UnexpectedStatus, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn api_key_request_carries_the_token() {
        let (url, server) = serve_once(200, r#"{"data": {"ai_apikey": "sk-test"}, "status": "success"}"#).await;

        let api_key = issuer_for(&url).fetch_api_key("tok").await.unwrap();

        assert_eq!(api_key, "sk-test");
        let request = server.await.unwrap();
        assert!(request.head.starts_with("get /utils/first http/1.1\r\n"));
        assert!(request.head.contains("\r\ntoken: tok\r\n"));
    }

    #[tokio::test]
    async fn api_key_rejection_is_an_unexpected_status() {
        let (url, server) = serve_once(500, r#"{"message": "boom"}"#).await;

        let err = issuer_for(&url).fetch_api_key("tok").await.unwrap_err();

        assert!(matches!(err, SchemaDumpError::UnexpectedStatus { action: FETCH_API_KEY, .. }));
        assert_eq!(
            err.to_string(),
            "Failed to fetch api key: server responded with status 500 Internal Server Error"
        );
        server.await.unwrap();
    }
}
