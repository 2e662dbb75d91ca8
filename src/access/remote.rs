use crate::access::traits::{AccessGate, Identity, SessionCredentials};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Asks the identity provider's verification endpoint about a session token
pub struct RemoteSessionGate {
    client: Client,
    verify_url: String,
    secret_key: String,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

impl RemoteSessionGate {
    pub fn new(verify_url: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            verify_url: verify_url.into(),
            secret_key: secret_key.into(),
        })
    }

    async fn claims(&self, token: &str) -> Result<VerifyResponse> {
        let response = self
            .client
            .post(&self.verify_url)
            .bearer_auth(&self.secret_key)
            .json(&VerifyRequest { token })
            .send()
            .await
            .context("Failed to reach identity provider")?;

        if !response.status().is_success() {
            anyhow::bail!("Session rejected: {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to decode verification response")
    }
}

#[async_trait]
impl AccessGate for RemoteSessionGate {
    async fn verify(&self, credentials: &SessionCredentials) -> Identity {
        match self.claims(&credentials.token).await {
            Ok(claims) => Identity::Authenticated {
                user_id: claims.sub,
                email: claims.email,
            },
            Err(e) => {
                // Rejections are routine, transport trouble is not
                if e.chain().any(|c| c.is::<reqwest::Error>()) {
                    warn!("Session verification failed: {e:#}");
                } else {
                    debug!("Session verification failed: {e:#}");
                }
                Identity::Anonymous
            }
        }
    }

    fn gate_name(&self) -> &'static str {
        "remote"
    }
}
