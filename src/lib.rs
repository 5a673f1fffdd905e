//! # yandexgpt - Yandex Cloud Foundation Models SDK
//!
//! An async Rust client for the Yandex Cloud Foundation Models API, covering
//! YandexGPT text completion and YandexART image generation.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Automatic token management**: the long-lived OAuth credential is
//!   exchanged for a short-lived IAM token, cached in-memory and renewed
//!   ahead of expiry.
//! - **Text generation**: single-prompt and multi-turn dialogue requests
//!   against every supported YandexGPT model, including reasoning options.
//! - **Image generation**: asynchronous YandexART jobs with a
//!   poll-until-done orchestrator, a configurable timeout, and first-class
//!   cancellation.
//! - **Typed errors**: authentication failures and API failures are distinct
//!   types, both preserving the underlying cause.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yandexgpt::{YandexGptClient, models};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YandexGptClient::new("oauth-token", "folder-id")?;
//!
//!     let response = client
//!         .generate_text("Tell me about Rust", models::YANDEX_GPT_LITE, None)
//!         .await?;
//!     println!("{}", response.result.alternatives[0].message.text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Dialogues
//!
//! ```rust,no_run
//! use yandexgpt::{Message, YandexGptClient, models};
//!
//! # async fn dialogue(client: &YandexGptClient) -> Result<(), yandexgpt::YandexGptError> {
//! let messages = vec![
//!     Message::system("You are a helpful assistant"),
//!     Message::user("Hello!"),
//!     Message::assistant("Hi! How can I help?"),
//!     Message::user("Tell me about Rust"),
//! ];
//! let response = client
//!     .generate_from_messages(messages, models::YANDEX_GPT, None)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Image Generation
//!
//! ```rust,no_run
//! use yandexgpt::YandexGptClient;
//!
//! # async fn image(client: &YandexGptClient) -> Result<(), yandexgpt::YandexGptError> {
//! let result = client
//!     .generate_image("A beautiful landscape", None, None)
//!     .await?;
//! // result.image_base64 holds the base64-encoded image bytes.
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`YandexGptError`]: authentication failures
//! (credential and IAM token acquisition) are
//! [`YandexGptError::Authentication`]; everything else HTTP-shaped is
//! [`YandexGptError::Api`] with an HTTP-status-like code (0 when no exchange
//! occurred). The image orchestrator additionally reports
//! [`YandexGptError::Timeout`] and [`YandexGptError::Cancelled`].

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod types;
pub mod utils;

pub use client::{
    COMPLETION_ENDPOINT, ClientConfig, IMAGE_GENERATION_ASYNC_ENDPOINT, OPERATIONS_ENDPOINT,
    YandexGptClient,
};
pub use error::{Result, YandexGptError};
pub use types::{
    Alternative, ArtMessage, CompletionOptions, CompletionRequest, CompletionResponse,
    CompletionResult, GenerationOptions, ImageGenerationRequest, ImageGenerationResult,
    ImagePrompt, ImageResponse, Message, Operation, OperationError, OperationMetadata,
    ReasoningOptions, Usage,
};
pub use utils::cancel::CancelHandle;
