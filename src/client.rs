//! YandexGPT client implementation
//!
//! Main client structure aggregating text completion, asynchronous image
//! generation with a poll-until-done orchestrator, and operation status
//! queries.

use std::time::{Duration, Instant};

use reqwest::Client as HttpClient;
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{IAM_TOKEN_ENDPOINT, IamTokenProvider};
use crate::error::{Result, YandexGptError};
use crate::models::{self, ModelDescriptor};
use crate::types::{
    CompletionOptions, CompletionRequest, CompletionResponse, GenerationOptions,
    ImageGenerationRequest, ImageGenerationResult, ImagePrompt, Message, Operation,
};
use crate::utils::cancel::CancelHandle;

/// Production text completion endpoint.
pub const COMPLETION_ENDPOINT: &str =
    "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
/// Production asynchronous image generation endpoint.
pub const IMAGE_GENERATION_ASYNC_ENDPOINT: &str =
    "https://llm.api.cloud.yandex.net/foundationModels/v1/imageGenerationAsync";
/// Production long-running operations endpoint.
pub const OPERATIONS_ENDPOINT: &str = "https://operation.api.cloud.yandex.net/operations";

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_POLL_CEILING: Duration = Duration::from_secs(600);

/// Client configuration.
///
/// Endpoint URLs default to the production Yandex Cloud endpoints; tests
/// point them at a mock server. The poll cadence fields drive the image
/// generation orchestrator.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Yandex Cloud folder id used to build model URIs.
    pub folder_id: String,
    pub completion_url: String,
    pub image_generation_url: String,
    pub operations_url: String,
    pub iam_token_url: String,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Interval between operation status queries.
    pub poll_interval: Duration,
    /// Total time the image orchestrator waits before giving up.
    pub poll_ceiling: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            folder_id: String::new(),
            completion_url: COMPLETION_ENDPOINT.to_string(),
            image_generation_url: IMAGE_GENERATION_ASYNC_ENDPOINT.to_string(),
            operations_url: OPERATIONS_ENDPOINT.to_string(),
            iam_token_url: IAM_TOKEN_ENDPOINT.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_ceiling: DEFAULT_POLL_CEILING,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given folder id.
    pub fn new(folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            ..Default::default()
        }
    }

    pub fn with_completion_url(mut self, url: impl Into<String>) -> Self {
        self.completion_url = url.into();
        self
    }

    pub fn with_image_generation_url(mut self, url: impl Into<String>) -> Self {
        self.image_generation_url = url.into();
        self
    }

    pub fn with_operations_url(mut self, url: impl Into<String>) -> Self {
        self.operations_url = url.into();
        self
    }

    pub fn with_iam_token_url(mut self, url: impl Into<String>) -> Self {
        self.iam_token_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_ceiling(mut self, ceiling: Duration) -> Self {
        self.poll_ceiling = ceiling;
        self
    }
}

/// Client for the Yandex Cloud Foundation Models API.
#[derive(Debug)]
pub struct YandexGptClient {
    http: HttpClient,
    config: ClientConfig,
    token_provider: IamTokenProvider,
}

impl YandexGptClient {
    /// Create a client with default configuration.
    ///
    /// Fails with an authentication error when the OAuth token or folder id
    /// is empty.
    pub fn new(oauth_token: impl Into<String>, folder_id: impl Into<String>) -> Result<Self> {
        Self::from_config(oauth_token, ClientConfig::new(folder_id))
    }

    /// Create a client from an explicit configuration.
    pub fn from_config(oauth_token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| YandexGptError::api_with(0, "failed to build HTTP client", e))?;
        Self::with_http_client(oauth_token, config, http)
    }

    /// Create a client with a caller-supplied `reqwest` client.
    pub fn with_http_client(
        oauth_token: impl Into<String>,
        config: ClientConfig,
        http: HttpClient,
    ) -> Result<Self> {
        let oauth_token = oauth_token.into();
        if oauth_token.is_empty() {
            return Err(YandexGptError::authentication("OAuth token cannot be empty"));
        }
        if config.folder_id.is_empty() {
            return Err(YandexGptError::authentication("folder ID cannot be empty"));
        }

        let token_provider = IamTokenProvider::new(
            SecretString::from(oauth_token),
            config.iam_token_url.clone(),
            http.clone(),
        );

        Ok(Self {
            http,
            config,
            token_provider,
        })
    }

    /// The configured folder id.
    pub fn folder_id(&self) -> &str {
        &self.config.folder_id
    }

    /// Replace the folder id used for subsequent requests.
    pub fn set_folder_id(&mut self, folder_id: impl Into<String>) {
        self.config.folder_id = folder_id.into();
    }

    /// All supported text-generation models.
    pub fn available_models(&self) -> &'static [ModelDescriptor] {
        models::all_models()
    }

    /// Model id → description for every supported model.
    pub fn model_descriptions(&self) -> std::collections::HashMap<&'static str, &'static str> {
        models::model_descriptions()
    }

    /// Generate text from a single user prompt.
    ///
    /// `options` defaults to [`CompletionOptions::default`] (no streaming,
    /// temperature 0.6, 2000 output tokens).
    pub async fn generate_text(
        &self,
        prompt: impl Into<String>,
        model: &str,
        options: Option<CompletionOptions>,
    ) -> Result<CompletionResponse> {
        self.generate_from_messages(vec![Message::user(prompt)], model, options)
            .await
    }

    /// Generate text from a multi-turn message sequence.
    pub async fn generate_from_messages(
        &self,
        messages: Vec<Message>,
        model: &str,
        options: Option<CompletionOptions>,
    ) -> Result<CompletionResponse> {
        if !models::is_valid_model(model) {
            return Err(YandexGptError::api(0, format!("invalid model: {model}")));
        }

        let token = self.token_provider.token().await?;
        let request = CompletionRequest {
            model_uri: models::model_uri(model, &self.config.folder_id),
            completion_options: options.unwrap_or_default(),
            messages,
        };
        self.post_json(&self.config.completion_url, &token, &request)
            .await
    }

    /// Submit an asynchronous image-generation job and return its operation
    /// envelope without waiting for completion.
    ///
    /// `catalog_id` overrides the configured folder id in the `art://` model
    /// URI when set.
    pub async fn generate_image_async(
        &self,
        prompt: impl Into<ImagePrompt>,
        options: Option<GenerationOptions>,
        catalog_id: Option<&str>,
    ) -> Result<Operation> {
        let token = self.token_provider.token().await?;
        let catalog = catalog_id.unwrap_or(&self.config.folder_id);
        let request = ImageGenerationRequest {
            model_uri: models::art_model_uri(catalog),
            generation_options: options.unwrap_or_default(),
            messages: prompt.into().into_messages(),
        };
        self.post_json(&self.config.image_generation_url, &token, &request)
            .await
    }

    /// Fetch the current state of a long-running operation.
    pub async fn get_operation(&self, operation_id: &str) -> Result<Operation> {
        let token = self.token_provider.token().await?;
        let url = format!(
            "{}/{}",
            self.config.operations_url.trim_end_matches('/'),
            operation_id
        );
        self.get_json(&url, &token).await
    }

    /// Generate an image and wait for the job to finish.
    ///
    /// Submits the job, then polls the operation status every
    /// `poll_interval` until the server reports `done` or `poll_ceiling`
    /// elapses. On timeout the job may still complete server-side; its id is
    /// lost to the caller here, so use [`generate_image_async`] +
    /// [`get_operation`] for a follow-up-capable flow.
    ///
    /// [`generate_image_async`]: Self::generate_image_async
    /// [`get_operation`]: Self::get_operation
    pub async fn generate_image(
        &self,
        prompt: impl Into<ImagePrompt>,
        options: Option<GenerationOptions>,
        catalog_id: Option<&str>,
    ) -> Result<ImageGenerationResult> {
        let operation = self.generate_image_async(prompt, options, catalog_id).await?;
        let operation_id = Self::submitted_operation_id(operation)?;
        self.wait_for_image(operation_id, None).await
    }

    /// Like [`generate_image`](Self::generate_image), but abandonable through
    /// a [`CancelHandle`]. On cancellation the in-flight sleep or status
    /// request is dropped and [`YandexGptError::Cancelled`] is returned,
    /// distinct from the timeout error.
    pub async fn generate_image_with_cancel(
        &self,
        prompt: impl Into<ImagePrompt>,
        options: Option<GenerationOptions>,
        catalog_id: Option<&str>,
        cancel: &CancelHandle,
    ) -> Result<ImageGenerationResult> {
        let operation = tokio::select! {
            _ = cancel.cancelled() => return Err(YandexGptError::Cancelled),
            submitted = self.generate_image_async(prompt, options, catalog_id) => submitted?,
        };
        let operation_id = Self::submitted_operation_id(operation)?;
        self.wait_for_image(operation_id, Some(cancel)).await
    }

    /// A submission reply without an operation id is a server contract
    /// violation that polling cannot recover from.
    fn submitted_operation_id(operation: Operation) -> Result<String> {
        if operation.id.is_empty() {
            return Err(YandexGptError::api(0, "operation ID not found in response"));
        }
        Ok(operation.id)
    }

    /// Sleep-then-query loop. Status is never checked before the interval
    /// elapses, and two queries never run without an intervening sleep.
    async fn wait_for_image(
        &self,
        operation_id: String,
        cancel: Option<&CancelHandle>,
    ) -> Result<ImageGenerationResult> {
        let started = Instant::now();

        loop {
            if started.elapsed() >= self.config.poll_ceiling {
                tracing::warn!(operation_id = %operation_id, "image generation poll ceiling reached");
                return Err(YandexGptError::Timeout {
                    waited: started.elapsed(),
                });
            }

            let poll = async {
                tokio::time::sleep(self.config.poll_interval).await;
                self.get_operation(&operation_id).await
            };
            let operation = match cancel {
                Some(handle) => tokio::select! {
                    _ = handle.cancelled() => return Err(YandexGptError::Cancelled),
                    polled = poll => polled?,
                },
                None => poll.await?,
            };

            if !operation.done {
                continue;
            }

            if let Some(error) = operation.error {
                return Err(YandexGptError::api(
                    error.code,
                    format!("operation error: {}", error.message),
                ));
            }

            let image = operation.response.map(|r| r.image).unwrap_or_default();
            if image.is_empty() {
                return Err(YandexGptError::api(
                    0,
                    "image data not found in operation response",
                ));
            }

            tracing::debug!(operation_id = %operation_id, "image generation finished");
            return Ok(ImageGenerationResult {
                operation_id,
                image_base64: image,
            });
        }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| YandexGptError::api_with(0, "failed to send request", e))?;
        Self::read_json(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| YandexGptError::api_with(0, "failed to send request", e))?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            YandexGptError::api_with(status.as_u16(), "failed to read response body", e)
        })?;

        if !status.is_success() {
            return Err(Self::translate_api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            YandexGptError::api_with(status.as_u16(), "failed to decode response body", e)
        })
    }

    /// Prefer the server-supplied `message` field; otherwise carry the raw
    /// body verbatim.
    fn translate_api_error(code: u16, body: &str) -> YandexGptError {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                return YandexGptError::api(code, message);
            }
        }
        YandexGptError::api(code, format!("API request failed: {body}"))
    }
}
