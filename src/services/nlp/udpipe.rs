//! UDPipe REST client.
//!
//! Sends text to `{endpoint}/process` with tokenization, tagging and parsing
//! enabled and reads the CoNLL-U document from the JSON `result` field.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{conllu, NlpPipeline, PipelineError};
use crate::models::RawToken;

/// Configuration for the UDPipe pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// UDPipe REST API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name understood by the service (default: english-ewt)
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://lindat.mff.cuni.cz/services/udpipe/api".to_string()
}
fn default_model() -> String {
    "english-ewt".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PipelineConfig {
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    result: String,
}

/// Pipeline backed by a UDPipe REST service.
pub struct UdpipeClient {
    config: PipelineConfig,
    client: Client,
}

impl UdpipeClient {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PipelineError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn process_url(&self) -> String {
        format!("{}/process", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl NlpPipeline for UdpipeClient {
    fn name(&self) -> &str {
        "udpipe"
    }

    fn components(&self) -> Vec<String> {
        vec![
            "tokenizer".to_string(),
            "tagger".to_string(),
            "parser".to_string(),
        ]
    }

    async fn analyze(&self, text: &str) -> Result<Vec<RawToken>, PipelineError> {
        debug!(
            "Sending {} bytes to {} (model {})",
            text.len(),
            self.config.endpoint,
            self.config.model
        );

        let form = [
            ("data", text),
            ("model", self.config.model.as_str()),
            ("tokenizer", ""),
            ("tagger", ""),
            ("parser", ""),
        ];
        let resp = self
            .client
            .post(self.process_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| PipelineError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(PipelineError::Api(format!("HTTP {}: {}", status, body)));
        }

        let processed: ProcessResponse = resp
            .json()
            .await
            .map_err(|e| PipelineError::Parse(e.to_string()))?;

        let tokens = conllu::parse(&processed.result)?;
        debug!("Pipeline returned {} tokens", tokens.len());
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.model, "english-ewt");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config: PipelineConfig = toml::from_str(r#"model = "english-gum""#).unwrap();
        assert_eq!(config.model, "english-gum");
        assert_eq!(config.endpoint, default_endpoint());
    }

    #[test]
    fn test_process_url() {
        let client = UdpipeClient::new(
            PipelineConfig::default().with_endpoint("http://localhost:8001/"),
        )
        .unwrap();
        assert_eq!(client.process_url(), "http://localhost:8001/process");
        assert_eq!(client.name(), "udpipe");
        assert_eq!(client.components(), vec!["tokenizer", "tagger", "parser"]);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_connection_error() {
        let client = UdpipeClient::new(
            PipelineConfig::default().with_endpoint("http://127.0.0.1:9"),
        )
        .unwrap();
        let err = client.analyze("Hello.").await.unwrap_err();
        assert!(matches!(err, PipelineError::Connection(_)));
    }
}
