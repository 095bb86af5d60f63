//! Ollama local model provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::{Host, Url};

use super::{non_empty, GenerationError, TextGenerator};
use crate::config::GeneratorConfig;
use crate::errors::{CalcError, CalcResult};

const DEFAULT_API_BASE: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3:latest";

/// Ollama provider using the non-streaming `/api/generate` endpoint
#[derive(Debug)]
pub struct OllamaGenerator {
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OllamaGenerator {
    pub fn new(config: GeneratorConfig) -> CalcResult<Self> {
        let api_base = validate_endpoint(config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CalcError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_base,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn build_request(&self, prompt: &str) -> OllamaRequest {
        OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        }
    }
}

/// Only http/https endpoints are accepted; anything off the loopback
/// interface gets a warning since prompts leave the machine.
fn validate_endpoint(endpoint: &str) -> CalcResult<String> {
    let url = Url::parse(endpoint).map_err(|e| {
        CalcError::config(format!("Invalid Ollama endpoint URL '{}': {}", endpoint, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CalcError::config(format!(
            "Ollama endpoint must use http or https scheme, got: {}",
            url.scheme()
        )));
    }

    if !is_local(&url) {
        warn!(
            "Ollama endpoint is not localhost: {}. Ensure this is intentional.",
            url.host_str().unwrap_or_default()
        );
    }

    let mut result = url.to_string();
    while result.ends_with('/') {
        result.pop();
    }
    Ok(result)
}

fn is_local(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let start_time = Instant::now();
        let url = format!("{}/api/generate", self.api_base);

        debug!(model = %self.model, "Sending request to Ollama");

        let response = self
            .client
            .post(&url)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status { status, body });
        }

        let body: OllamaResponse = response.json().await?;
        debug!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Received response from Ollama"
        );

        non_empty(body.response)
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: Option<String>,
}
