use crate::domain::ports::TextGenerator;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn single_message(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Walks candidates -> content -> parts -> text and takes the first
    /// candidate's first part. On failure the returned level names where the
    /// path broke off.
    pub fn into_first_text(self) -> std::result::Result<String, &'static str> {
        let candidate = self
            .candidates
            .filter(|c| !c.is_empty())
            .map(|mut c| c.remove(0))
            .ok_or("candidates")?;
        let content = candidate.content.ok_or("content")?;
        let part = content
            .parts
            .filter(|p| !p.is_empty())
            .map(|mut p| p.remove(0))
            .ok_or("parts")?;
        part.text.ok_or("text")
    }
}

#[derive(Debug, Deserialize)]
pub struct ModelCatalog {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

/// Client for the generateContent and ListModels endpoints. One blocking-style
/// request at a time; no retries.
pub struct GeminiClient {
    http: Client,
    generate_endpoint: String,
    models_endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        generate_endpoint: String,
        models_endpoint: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            generate_endpoint,
            models_endpoint,
            api_key,
        })
    }

    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        tracing::debug!("Listing models from: {}", self.models_endpoint);
        let response = self
            .http
            .get(&self.models_endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(EtlError::Api { status, body });
        }

        let catalog: ModelCatalog = serde_json::from_str(&body)?;
        Ok(catalog.models)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Making API request to: {}", self.generate_endpoint);
        let response = self
            .http
            .post(&self.generate_endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateRequest::single_message(prompt))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(EtlError::Api { status, body });
        }

        let decoded: GenerateResponse = serde_json::from_str(&body)?;
        decoded
            .into_first_text()
            .map_err(|level| EtlError::MissingContent { level, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            server.url("/generate"),
            server.url("/models"),
            "test-key".to_string(),
            None,
        )
        .unwrap()
    }

    fn decode(json: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn first_text_extracts_the_first_candidate() {
        let response = decode(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "a,b"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]
        }));
        assert_eq!(response.into_first_text().unwrap(), "a,b");
    }

    #[test]
    fn first_text_names_the_missing_level() {
        let cases = [
            (serde_json::json!({}), "candidates"),
            (serde_json::json!({"candidates": []}), "candidates"),
            (serde_json::json!({"candidates": [{}]}), "content"),
            (serde_json::json!({"candidates": [{"content": {}}]}), "parts"),
            (
                serde_json::json!({"candidates": [{"content": {"parts": []}}]}),
                "parts",
            ),
            (
                serde_json::json!({"candidates": [{"content": {"parts": [{}]}}]}),
                "text",
            ),
        ];

        for (json, expected_level) in cases {
            let level = decode(json.clone()).into_first_text().unwrap_err();
            assert_eq!(level, expected_level, "for response {}", json);
        }
    }

    #[tokio::test]
    async fn generate_sends_the_auth_header_and_payload_shape() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/generate")
                .header(API_KEY_HEADER, "test-key")
                .json_body(serde_json::json!({
                    "contents": [{"parts": [{"text": "the prompt"}]}]
                }));
            then.status(200).json_body(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "x,y\n1,2"}]}}]
            }));
        });

        let text = client_for(&server).generate("the prompt").await.unwrap();

        api_mock.assert();
        assert_eq!(text, "x,y\n1,2");
    }

    #[tokio::test]
    async fn generate_surfaces_non_2xx_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(403).body("{\"error\":\"bad key\"}");
        });

        let err = client_for(&server).generate("prompt").await.unwrap_err();

        match err {
            EtlError::Api { status, body } => {
                assert_eq!(status.as_u16(), 403);
                assert!(body.contains("bad key"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_reports_missing_content_with_raw_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/generate");
            then.status(200)
                .json_body(serde_json::json!({"candidates": [{"finishReason": "SAFETY"}]}));
        });

        let err = client_for(&server).generate("prompt").await.unwrap_err();

        match err {
            EtlError::MissingContent { level, body } => {
                assert_eq!(level, "content");
                assert!(body.contains("SAFETY"));
            }
            other => panic!("expected MissingContent, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_models_parses_camel_case_metadata() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/models")
                .header(API_KEY_HEADER, "test-key");
            then.status(200).json_body(serde_json::json!({
                "models": [
                    {
                        "name": "models/gemini-2.0-flash-001",
                        "description": "Fast model",
                        "version": "001",
                        "supportedGenerationMethods": ["generateContent"]
                    },
                    {"name": "models/bare"}
                ]
            }));
        });

        let models = client_for(&server).list_models().await.unwrap();

        api_mock.assert();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].name, "models/gemini-2.0-flash-001");
        assert_eq!(
            models[0].supported_generation_methods,
            vec!["generateContent"]
        );
        assert!(models[1].description.is_none());
        assert!(models[1].supported_generation_methods.is_empty());
    }

    #[tokio::test]
    async fn list_models_surfaces_non_2xx_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/models");
            then.status(500).body("internal");
        });

        let err = client_for(&server).list_models().await.unwrap_err();
        assert_eq!(err.raw_body(), Some("internal"));
    }
}
