use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Principal, SessionProvider};

/// Claims carried by a hosted-auth access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Session backed by an access token issued by the store's auth service.
///
/// The token is re-validated on every call so an expired token turns the
/// session anonymous. Without a secret the signature is not checked here;
/// the remote store still verifies the token it receives as bearer.
pub struct JwtSession {
    token: String,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSession {
    pub fn new(token: String, secret: Option<&str>, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        let decoding_key = match secret.filter(|s| !s.is_empty()) {
            Some(secret) => DecodingKey::from_secret(secret.as_bytes()),
            None => {
                validation.insecure_disable_signature_validation();
                DecodingKey::from_secret(&[])
            }
        };

        match audience.filter(|a| !a.is_empty()) {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            token,
            decoding_key,
            validation,
        }
    }

    pub fn decode_claims(&self) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(&self.token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
    }
}

#[async_trait]
impl SessionProvider for JwtSession {
    async fn current_principal(&self) -> Option<Principal> {
        match self.decode_claims() {
            Ok(claims) => Some(Principal {
                id: claims.sub,
                email: claims.email,
            }),
            Err(e) => {
                warn!("Access token rejected: {}", e);
                None
            }
        }
    }
}
