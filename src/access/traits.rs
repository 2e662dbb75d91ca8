use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use serde::Serialize;

/// Cookie the identity provider stores its session token in
pub const SESSION_COOKIE: &str = "__session";

/// Who is making a request, as far as the identity provider can tell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Identity {
    Authenticated {
        user_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
    Anonymous,
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::Authenticated { user_id, .. } => Some(user_id),
            Identity::Anonymous => None,
        }
    }
}

/// Session token presented with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub token: String,
}

impl SessionCredentials {
    /// Session cookie first, then a bearer `Authorization` header
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        session_cookie(headers)
            .or_else(|| bearer_token(headers))
            .filter(|t| !t.is_empty())
            .map(|token| Self { token })
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Verifies session credentials against an identity provider.
/// Any failure to verify is reported as `Anonymous`.
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn verify(&self, credentials: &SessionCredentials) -> Identity;

    fn gate_name(&self) -> &'static str;
}

/// Gate used when no identity provider is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousGate;

#[async_trait]
impl AccessGate for AnonymousGate {
    async fn verify(&self, _credentials: &SessionCredentials) -> Identity {
        Identity::Anonymous
    }

    fn gate_name(&self) -> &'static str {
        "anonymous"
    }
}
