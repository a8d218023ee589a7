use std::fs;
use std::path::Path;

use anyhow::{Context as _, bail};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The parts of a Google service-account key file used for token exchange.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_owned()
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Error reading {}", path.display()))?;
        Self::from_json(&raw).context("Error parsing service account key")
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let key: Self = serde_json::from_str(raw)?;
        if key.client_email.trim().is_empty() {
            bail!("client_email is empty");
        }
        Ok(key)
    }

    /// Sign the RS256 assertion that is traded for an access token.
    pub fn assertion(&self, issued_at: i64) -> anyhow::Result<String> {
        let claims = AssertionClaims {
            iss: self.client_email.clone(),
            scope: SPREADSHEETS_SCOPE.to_owned(),
            aud: self.token_uri.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .context("service account private_key is not a valid RSA PEM key")?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .context("failed to sign service account assertion")
    }

    pub async fn fetch_access_token(&self, http: &reqwest::Client) -> anyhow::Result<AccessToken> {
        let assertion = self.assertion(Utc::now().timestamp())?;
        debug!(client_email = %self.client_email, token_uri = %self.token_uri, "requesting access token");

        let response = http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .context("token request failed")?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .context("failed to read token response")?;

        if !status.is_success() {
            bail!(
                "token endpoint returned {status}: {}",
                String::from_utf8_lossy(&body).trim()
            );
        }

        serde_json::from_slice(&body).context("failed to decode token response")
    }
}
