use anyhow::Result;
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, StatusCode,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::IdentityConfig;
use crate::domain::{PasswordGrant, TokenResponse};

const TOKEN_PATH: &str = "/connect/token";

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, IdentityError>;
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity provider rejected the request: HTTP {status}")]
    Rejected { status: StatusCode, body: String },

    #[error("identity provider returned an unreadable token: {0}")]
    Decode(#[from] serde_json::Error),
}

impl IdentityError {
    /// True when the provider refused the credentials themselves.
    pub fn is_credentials_rejected(&self) -> bool {
        matches!(
            self,
            IdentityError::Rejected { status, .. }
                if *status == StatusCode::BAD_REQUEST || *status == StatusCode::UNAUTHORIZED
        )
    }
}

/// Password-grant client for the OAuth-style token endpoint.
#[derive(Clone)]
pub struct IdentityClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
}

impl IdentityClient {
    /// Builds an HTTP client with the form content type as a default header.
    pub fn new(cfg: &IdentityConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let client = Client::builder()
            .timeout(cfg.timeout())
            .default_headers(headers)
            .build()?;
        Ok(Self::with_client(client, cfg))
    }

    pub fn with_client(client: Client, cfg: &IdentityConfig) -> Self {
        Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            scope: cfg.scope.clone(),
        }
    }
}

#[async_trait]
impl Authenticator for IdentityClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, IdentityError> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        debug!(%url, username, "requesting password grant");

        let grant = PasswordGrant {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            grant_type: "password",
            scope: &self.scope,
            username,
            password,
        };

        let resp = self.client.post(&url).form(&grant).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!(%status, username, "token request rejected");
            return Err(IdentityError::Rejected { status, body });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        info!(username, "token issued");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_rejected_classification() {
        let rejected = |status| IdentityError::Rejected { status, body: String::new() };
        assert!(rejected(StatusCode::BAD_REQUEST).is_credentials_rejected());
        assert!(rejected(StatusCode::UNAUTHORIZED).is_credentials_rejected());
        assert!(!rejected(StatusCode::INTERNAL_SERVER_ERROR).is_credentials_rejected());
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let cfg = IdentityConfig { base_url: "http://idp.local/".into(), ..Default::default() };
        let client = IdentityClient::new(&cfg).unwrap();
        assert_eq!(client.base_url, "http://idp.local");
        assert_eq!(client.client_id, "ro.client");
    }
}
