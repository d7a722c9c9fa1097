use anyhow::{ensure, Context};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Body, Client,
};
use tracing::debug;

pub mod text_generation;

/// Handle to the generative-language REST API for one model.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    model: String,
    has_api_key: bool,
    client: Client,
}

impl Models {
    /// A missing `api_key` is accepted; calls then fail at the provider.
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/json"),
        );
        if let Some(api_key) = api_key {
            let mut value = HeaderValue::from_str(api_key)
                .context("api key is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert("x-goog-api-key", value);
        }

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            has_api_key: api_key.is_some(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.has_api_key
    }

    async fn string_response(
        &self,
        request: Body,
        method: &str,
    ) -> anyhow::Result<String> {
        let url = format!("{}/models/{}:{}", self.base_url, self.model, method);
        debug!(task = "model request", url = url.as_str());

        let response = self.client.post(url).body(request).send().await?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }
}
