//! Session providers
//!
//! The link service asks a [`SessionProvider`] for the current principal
//! instead of reading ambient state, so callers decide where identity comes
//! from: a fixed user, a signed access token, or nobody at all.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SessionConfig;

pub mod jwt;

pub use jwt::JwtSession;

/// The authenticated user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Principal {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    pub fn with_email<T: Into<String>>(mut self, email: T) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The signed-in principal, or `None` for an anonymous caller.
    async fn current_principal(&self) -> Option<Principal>;
}

/// A session whose principal is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    principal: Option<Principal>,
}

impl StaticSession {
    pub fn signed_in(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn anonymous() -> Self {
        Self { principal: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn current_principal(&self) -> Option<Principal> {
        self.principal.clone()
    }
}

/// Pick a session provider from configuration.
///
/// An explicit `user_id` wins; otherwise an `access_token` is decoded; with
/// neither the session is anonymous.
pub fn session_from_config(config: &SessionConfig) -> Arc<dyn SessionProvider> {
    if let Some(user_id) = config.user_id.as_ref().filter(|id| !id.is_empty()) {
        debug!("Using static session for user {}", user_id);
        let mut principal = Principal::new(user_id.clone());
        principal.email = config.email.clone();
        return Arc::new(StaticSession::signed_in(principal));
    }

    if let Some(token) = config.access_token.as_ref().filter(|t| !t.is_empty()) {
        debug!("Using access-token session");
        return Arc::new(JwtSession::new(
            token.clone(),
            config.jwt_secret.as_deref(),
            config.audience.as_deref(),
        ));
    }

    debug!("No session configured, running anonymously");
    Arc::new(StaticSession::anonymous())
}
