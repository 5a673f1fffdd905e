//! Supported model catalog and model URI builders.
//!
//! A static, process-wide table of the text-generation models this SDK
//! accepts, plus the pure functions that turn a model id and folder/catalog
//! id into the `gpt://` and `art://` URIs the API expects.

use std::collections::HashMap;

/// Lightweight tier for simple tasks.
pub const YANDEX_GPT_LITE: &str = "yandexgpt-lite";
/// Standard tier.
pub const YANDEX_GPT: &str = "yandexgpt";
/// Advanced conversational tier with 32K context.
pub const ALICE_AI: &str = "aliceai-llm";

/// Model path used in YandexART `art://` URIs.
pub const YANDEX_ART_LATEST: &str = "yandex-art/latest";

/// A supported text-generation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub description: &'static str,
}

static MODELS: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: YANDEX_GPT_LITE,
        description: "Lightweight version of YandexGPT for simple tasks",
    },
    ModelDescriptor {
        id: YANDEX_GPT,
        description: "Standard YandexGPT model",
    },
    ModelDescriptor {
        id: ALICE_AI,
        description: "Alice AI LLM - advanced conversational model with 32K context",
    },
];

/// All supported text-generation models.
pub fn all_models() -> &'static [ModelDescriptor] {
    MODELS
}

/// Look up a model by id.
pub fn find_model(id: &str) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|m| m.id == id)
}

/// Whether `id` names a supported model.
pub fn is_valid_model(id: &str) -> bool {
    find_model(id).is_some()
}

/// Model id → human-readable description for every supported model.
pub fn model_descriptions() -> HashMap<&'static str, &'static str> {
    MODELS.iter().map(|m| (m.id, m.description)).collect()
}

/// Build a text-generation model URI: `gpt://{folder_id}/{model}`.
pub fn model_uri(model: &str, folder_id: &str) -> String {
    format!("gpt://{folder_id}/{model}")
}

/// Build the YandexART model URI: `art://{catalog_id}/yandex-art/latest`.
pub fn art_model_uri(catalog_id: &str) -> String {
    format!("art://{catalog_id}/{YANDEX_ART_LATEST}")
}
