//! Embedding providers.
//!
//! The provider is a black box that turns text into a vector. Callers own
//! retry policy; a provider makes exactly one HTTP call per request.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EmbeddingError, Result};
use crate::{DEFAULT_BASE_URL, DEFAULT_MODEL, Embedding};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request for generating an embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Text to embed.
    pub text: String,

    /// Model to use (provider-specific).
    pub model: Option<String>,
}

impl EmbeddingRequest {
    /// Create a new embedding request.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Response from embedding generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The generated embedding.
    pub embedding: Embedding,

    /// Model used to generate the embedding.
    pub model: String,

    /// Dimension of the embedding.
    pub dimension: usize,

    /// Token usage (if available).
    pub tokens_used: Option<u64>,
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;

    /// Generate an embedding for the given text.
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Generate embeddings for multiple texts, in request order.
    async fn embed_batch(&self, requests: Vec<EmbeddingRequest>) -> Result<Vec<EmbeddingResponse>> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(self.embed(request).await?);
        }
        Ok(results)
    }

    /// Check if the provider is usable (API key set, etc.).
    fn is_available(&self) -> bool;
}

/// OpenAI-compatible embedding provider.
pub struct OpenAIProvider {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Default model.
    default_model: String,

    /// End-user identifier forwarded to the provider.
    user: Option<String>,

    /// Per-request timeout.
    timeout: Duration,
}

impl OpenAIProvider {
    /// Create a provider with no API key against the public OpenAI endpoint.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
            default_model: DEFAULT_MODEL.to_string(),
            user: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set the `user` field sent with every request.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url)
    }

    /// Submit `input` in one call and return the items sorted by `index`.
    async fn request_embeddings(
        &self,
        input: &[&str],
        model: &str,
    ) -> Result<OpenAIEmbeddingResponse> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(EmbeddingError::ProviderNotConfigured)?;

        let body = OpenAIEmbeddingRequest {
            model,
            input,
            user: self.user.as_deref(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(EmbeddingError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest {
                status: status.as_u16(),
                message: describe_error_body(&error_text),
            });
        }

        let bytes = response.bytes().await?;
        let mut result: OpenAIEmbeddingResponse = serde_json::from_slice(&bytes)
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        if result.data.len() != input.len() {
            return Err(EmbeddingError::ShapeMismatch {
                expected: input.len(),
                actual: result.data.len(),
            });
        }

        result.data.sort_by_key(|item| item.index);
        Ok(result)
    }
}

impl Default for OpenAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
        let model = request
            .model
            .unwrap_or_else(|| self.default_model.clone());

        debug!("Generating embedding with model: {model}");

        let result = self.request_embeddings(&[request.text.as_str()], &model).await?;
        let tokens_used = result.usage.map(|u| u.total_tokens);
        let embedding = result
            .data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding in response".to_string()))?;

        let dimension = embedding.len();
        debug!("Generated embedding with {dimension} dimensions");

        Ok(EmbeddingResponse {
            embedding,
            model: result.model,
            dimension,
            tokens_used,
        })
    }

    async fn embed_batch(&self, requests: Vec<EmbeddingRequest>) -> Result<Vec<EmbeddingResponse>> {
        let Some(first) = requests.first() else {
            return Ok(Vec::new());
        };

        let model = first
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        let texts: Vec<&str> = requests.iter().map(|r| r.text.as_str()).collect();

        debug!(
            "Generating batch embeddings for {} texts with model: {model}",
            texts.len()
        );

        let result = self.request_embeddings(&texts, &model).await?;
        let response_model = result.model;

        let responses: Vec<EmbeddingResponse> = result
            .data
            .into_iter()
            .map(|item| {
                let dimension = item.embedding.len();
                EmbeddingResponse {
                    embedding: item.embedding,
                    model: response_model.clone(),
                    dimension,
                    tokens_used: None,
                }
            })
            .collect();

        info!("Generated {} batch embeddings", responses.len());

        Ok(responses)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Turn an error body into a readable message, preferring the structured
/// `error.message` when the provider sent one.
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<OpenAIErrorEnvelope>(body) {
        Ok(envelope) => {
            let err = envelope.error;
            let mut message = err.message;
            if let Some(kind) = err.kind {
                message.push_str(&format!(" (type: {kind}"));
                if let Some(code) = err.code.filter(|c| !c.is_null()) {
                    message.push_str(&format!(", code: {code}"));
                }
                message.push(')');
            }
            if let Some(param) = err.param {
                message.push_str(&format!(" [param: {param}]"));
            }
            message
        }
        Err(_) if body.trim().is_empty() => "<empty body>".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[derive(Debug, Serialize)]
struct OpenAIEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

/// OpenAI API response format.
#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
    model: String,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    #[allow(dead_code)]
    prompt_tokens: u64,
    total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorEnvelope {
    error: OpenAIErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    param: Option<String>,
    code: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAIProvider {
        OpenAIProvider::new()
            .with_api_key("test-key")
            .with_base_url(server.uri())
    }

    fn embedding_body(vectors: &[(usize, Vec<f32>)]) -> serde_json::Value {
        let data: Vec<_> = vectors
            .iter()
            .map(|(index, embedding)| {
                json!({ "object": "embedding", "embedding": embedding, "index": index })
            })
            .collect();
        json!({
            "object": "list",
            "data": data,
            "model": "text-embedding-ada-002",
            "usage": { "prompt_tokens": 5, "total_tokens": 5 }
        })
    }

    #[test]
    fn test_embedding_request() {
        let request = EmbeddingRequest::new("Hello world").with_model("text-embedding-3-small");

        assert_eq!(request.text, "Hello world");
        assert_eq!(request.model, Some("text-embedding-3-small".to_string()));
    }

    #[test]
    fn test_request_body_omits_missing_user() {
        let input = ["hello"];
        let body = OpenAIEmbeddingRequest {
            model: "m",
            input: &input,
            user: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({ "model": "m", "input": ["hello"] }));
    }

    #[test]
    fn test_describe_error_body() {
        let body = r#"{"error":{"message":"Invalid API key","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#;
        assert_eq!(
            describe_error_body(body),
            "Invalid API key (type: invalid_request_error, code: \"invalid_api_key\")"
        );
        assert_eq!(describe_error_body("  upstream down \n"), "upstream down");
        assert_eq!(describe_error_body(""), "<empty body>");
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let provider = OpenAIProvider::new();
        assert!(!provider.is_available());
        let err = provider.embed(EmbeddingRequest::new("x")).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::ProviderNotConfigured));
    }

    #[tokio::test]
    async fn test_embed_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "text-embedding-ada-002",
                "input": ["Login succeeds"],
                "user": "ci"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(embedding_body(&[(0, vec![0.25, -0.5, 1.0])])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server).with_user("ci");
        let response = provider
            .embed(EmbeddingRequest::new("Login succeeds"))
            .await
            .unwrap();

        assert_eq!(response.embedding, vec![0.25, -0.5, 1.0]);
        assert_eq!(response.dimension, 3);
        assert_eq!(response.model, "text-embedding-ada-002");
        assert_eq!(response.tokens_used, Some(5));
    }

    #[tokio::test]
    async fn test_embed_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .embed(EmbeddingRequest::new("x"))
            .await
            .unwrap_err();

        match err {
            EmbeddingError::ApiRequest { status, message } => {
                assert_eq!(status, 401);
                assert!(message.starts_with("Incorrect API key provided"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_embed_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .embed(EmbeddingRequest::new("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, EmbeddingError::RateLimited { retry_after_secs: 7 }));
        assert!(err.is_provider_error());
    }

    #[tokio::test]
    async fn test_embed_shape_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(embedding_body(&[
                (0, vec![1.0, 0.0]),
                (1, vec![0.0, 1.0]),
            ])))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .embed(EmbeddingRequest::new("x"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EmbeddingError::ShapeMismatch {
                expected: 1,
                actual: 2
            }
        ));
        assert!(!err.is_provider_error());
    }

    #[tokio::test]
    async fn test_embed_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .embed(EmbeddingRequest::new("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, EmbeddingError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_embed_batch_orders_by_index() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "input": ["a", "b"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(embedding_body(&[
                (1, vec![2.0]),
                (0, vec![1.0]),
            ])))
            .mount(&server)
            .await;

        let responses = provider_for(&server)
            .embed_batch(vec![EmbeddingRequest::new("a"), EmbeddingRequest::new("b")])
            .await
            .unwrap();

        let vectors: Vec<Embedding> = responses.into_iter().map(|r| r.embedding).collect();
        assert_eq!(vectors, vec![vec![1.0], vec![2.0]]);
    }
}
