//! Google Gemini REST client.
//!
//! One [`GeminiClient`] serves every storyboard call. The model is picked per
//! request: an explicit `GenerateRequest.model` wins, otherwise image requests
//! go to the configured image model and everything else to the text model.
//!
//! # Example
//!
//! ```no_run
//! use storyboard_config::StoryboardConfig;
//! use storyboard_models::GeminiClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoryboardConfig::load()?;
//! let client = GeminiClient::from_config(&config.gemini)?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use std::env;
use std::time::Duration;
use tracing::{debug, error, instrument};

use storyboard_config::{GeminiConfig, StoryboardConfig};
use storyboard_core::{GenerateRequest, GenerateResponse, ResponseFormat};
use storyboard_error::{GeminiError, GeminiErrorKind, StoryboardResult};
use storyboard_interface::GenerationDriver;

use super::GeminiResult;
use super::conversion::{from_gemini_response, to_gemini_request};
use super::dto::GeminiResponse;

/// Environment variables consulted for the API key, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from the bundled configuration and the API key in the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is set or the HTTP client cannot be built.
    pub fn new() -> StoryboardResult<Self> {
        let config = StoryboardConfig::bundled()?;
        Ok(Self::from_config(&config.gemini)?)
    }

    /// Create a client from explicit settings, reading the API key from
    /// `GEMINI_API_KEY` or, failing that, `API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::MissingApiKey`] if neither variable is set.
    #[instrument(skip(config), fields(api_base = %config.api_base))]
    pub fn from_config(config: &GeminiConfig) -> GeminiResult<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::ClientCreation`] if the HTTP client fails to build.
    pub fn with_api_key(api_key: impl Into<String>, config: &GeminiConfig) -> GeminiResult<Self> {
        debug!(
            text_model = %config.text_model,
            image_model = %config.image_model,
            "Creating Gemini client"
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    /// Model that will serve the request.
    pub fn model_for<'a>(&'a self, req: &'a GenerateRequest) -> &'a str {
        match (req.model(), req.response_format()) {
            (Some(model), _) => model,
            (None, ResponseFormat::Image) => &self.image_model,
            (None, ResponseFormat::Text | ResponseFormat::StringList) => &self.text_model,
        }
    }

    #[instrument(
        skip(self, req),
        fields(
            model = %self.model_for(req),
            format = ?req.response_format(),
            parts = req.parts().len()
        )
    )]
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base,
            self.model_for(req)
        );
        let body = to_gemini_request(req);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "Gemini API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            GeminiError::new(GeminiErrorKind::MalformedResponse(e.to_string()))
        })?;

        let converted = from_gemini_response(parsed, *req.response_format())?;
        debug!(outputs = converted.outputs().len(), "Received response from Gemini");
        Ok(converted)
    }
}

#[async_trait]
impl GenerationDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}
