//! IAM token acquisition and caching.
//!
//! Exchanges the long-lived OAuth credential for a short-lived IAM token at
//! the Yandex Cloud IAM endpoint and caches it in-memory, renewing before the
//! reported expiry.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::{Result, YandexGptError};

/// Production IAM token exchange endpoint.
pub const IAM_TOKEN_ENDPOINT: &str = "https://iam.api.cloud.yandex.net/iam/v1/tokens";

/// Safety window (seconds) subtracted from the reported expiry so a token is
/// never used close enough to real expiry to race request transit.
const EXPIRY_SAFETY_WINDOW_SECS: i64 = 300; // 5 minutes

#[derive(Debug, Clone, Deserialize)]
struct IamTokenResponse {
    #[serde(rename = "iamToken")]
    iam_token: String,
    #[serde(rename = "expiresAt")]
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    /// Expiry with the safety window already subtracted.
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// OAuth → IAM token provider with in-memory caching.
///
/// The cache sits behind an async mutex that stays held across the exchange
/// request: readers observe either the previous token/expiry pair or the new
/// one, never a half-written state, and concurrent refreshes collapse into a
/// single network exchange whose result the waiters reuse.
pub struct IamTokenProvider {
    oauth_token: SecretString,
    token_url: String,
    http: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

impl IamTokenProvider {
    /// Create a new provider. `token_url` is normally
    /// [`IAM_TOKEN_ENDPOINT`]; tests point it at a mock server.
    pub fn new(
        oauth_token: SecretString,
        token_url: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            oauth_token,
            token_url: token_url.into(),
            http,
            cache: Mutex::new(None),
        }
    }

    /// Returns a valid IAM token, exchanging the OAuth credential when the
    /// cache is empty or inside the safety window. The cached token survives
    /// a failed exchange untouched.
    pub async fn token(&self) -> Result<String> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.token.clone());
            }
        }

        let fresh = self.exchange().await?;
        tracing::debug!(expires_at = %fresh.expires_at, "refreshed IAM token");
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    async fn exchange(&self) -> Result<CachedToken> {
        let body = serde_json::json!({
            "yandexPassportOauthToken": self.oauth_token.expose_secret(),
        });

        let response = self
            .http
            .post(&self.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                YandexGptError::authentication_with("failed to reach IAM token endpoint", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(YandexGptError::authentication(format!(
                "IAM token request failed with status {}: {}",
                status.as_u16(),
                text
            )));
        }

        let parsed: IamTokenResponse = response.json().await.map_err(|e| {
            YandexGptError::authentication_with("failed to decode IAM token response", e)
        })?;

        Ok(CachedToken {
            token: parsed.iam_token,
            expires_at: parsed.expires_at - chrono::Duration::seconds(EXPIRY_SAFETY_WINDOW_SECS),
        })
    }
}

impl std::fmt::Debug for IamTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IamTokenProvider")
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}
