use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::authorization::UserContext;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub iat: usize,
    pub exp: usize,
}

/// Sign an HS256 token for `username`, valid for `ttl`
pub fn create_token(
    username: &str,
    is_admin: bool,
    secret: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp().max(0) as usize;
    let claims = Claims {
        username: username.to_string(),
        is_admin,
        iat: now,
        exp: now + ttl.as_secs() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies bearer tokens against the configured secret
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Option<UserContext> {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Some(UserContext::new(data.claims.username, data.claims.is_admin)),
            Err(e) => {
                debug!(error = %e, "Ignoring invalid bearer token");
                None
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Attach the caller's `UserContext` when a valid bearer token is present.
///
/// A missing or invalid token is not an error here; the request continues
/// anonymously and the authorization gates decide.
pub async fn authenticate_jwt(
    State(verifier): State<TokenVerifier>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = bearer_token(request.headers()).and_then(|token| verifier.verify(token));
    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_token_round_trip() {
        let token = create_token("admin", true, "secret", Duration::from_secs(60)).unwrap();
        let user = TokenVerifier::new("secret").verify(&token).unwrap();
        assert_eq!(user, UserContext::new("admin", true));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_token("u1", false, "secret", Duration::from_secs(60)).unwrap();
        assert!(TokenVerifier::new("other").verify(&token).is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            username: "u1".to_string(),
            is_admin: false,
            iat: 1,
            exp: 2,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(TokenVerifier::new("secret").verify(&token).is_none());
    }

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }
}
