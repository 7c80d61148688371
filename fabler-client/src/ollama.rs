use std::time::Duration;

use isahc::{
    config::Configurable as _, AsyncReadResponseExt as _, HttpClient, Request,
};

use crate::{Generate, GenerateError};

#[derive(serde::Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(serde::Deserialize)]
struct CompletionResponse {
    response: String,
}

/// Client for an Ollama-style completion endpoint.
pub struct OllamaClient {
    client: HttpClient,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: &str, model: &str, timeout: Duration) -> Result<Self, GenerateError> {
        let client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }
}

#[async_trait::async_trait]
impl Generate for OllamaClient {
    #[tracing::instrument(skip(self, prompt), fields(prompt_length = prompt.chars().count()), err)]
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        tracing::debug!(url = %self.generate_url(), model = %self.model, "requesting completion");

        let body = serde_json::to_vec(&CompletionRequest {
            model: &self.model,
            prompt,
            stream: false,
        })?;

        let req = Request::post(self.generate_url())
            .header("content-type", "application/json")
            .body(body)?;

        let mut res = self.client.send_async(req).await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(GenerateError::Service {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion: CompletionResponse = serde_json::from_str(&text)?;

        Ok(completion.response)
    }
}
