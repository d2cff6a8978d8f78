//! Route gates that run after `authenticate_jwt`.
//!
//! Each gate reads the `UserContext` left in the request extensions and
//! answers 401 when the caller may not proceed. Company and job writes use
//! `ensure_admin`; `ensure_logged_in` and `ensure_current_or_admin` gate
//! per-user routes keyed by a `username` path parameter.

use std::collections::HashMap;

use axum::{
    extract::{Path, Request},
    middleware::Next,
    response::Response,
};

use crate::api::errors::ApiError;
use crate::domain::authorization::{
    require_admin, require_current_or_admin, require_user, UserContext,
};

pub async fn ensure_logged_in(request: Request, next: Next) -> Result<Response, ApiError> {
    require_user(request.extensions().get::<UserContext>())?;
    Ok(next.run(request).await)
}

pub async fn ensure_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    require_admin(request.extensions().get::<UserContext>())?;
    Ok(next.run(request).await)
}

/// Requires an admin or the user named by the `username` path parameter
pub async fn ensure_current_or_admin(
    Path(params): Path<HashMap<String, String>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let username = params.get("username").map(String::as_str).unwrap_or_default();
    require_current_or_admin(request.extensions().get::<UserContext>(), username)?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::StatusCode,
        middleware::{from_fn, from_fn_with_state},
        routing::get,
        Router,
    };
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::api::middleware::auth::{authenticate_jwt, create_token, TokenVerifier};

    const SECRET: &str = "test-secret";

    fn app() -> Router {
        Router::new()
            .route("/me", get(|| async { "ok" }).route_layer(from_fn(ensure_logged_in)))
            .route("/admin", get(|| async { "ok" }).route_layer(from_fn(ensure_admin)))
            .route(
                "/users/{username}",
                get(|| async { "ok" }).route_layer(from_fn(ensure_current_or_admin)),
            )
            .layer(from_fn_with_state(TokenVerifier::new(SECRET), authenticate_jwt))
    }

    async fn status(uri: &str, token: Option<String>) -> StatusCode {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    fn token(username: &str, is_admin: bool) -> Option<String> {
        Some(create_token(username, is_admin, SECRET, Duration::from_secs(60)).unwrap())
    }

    #[tokio::test]
    async fn test_logged_in_gate() {
        assert_eq!(status("/me", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/me", token("u1", false)).await, StatusCode::OK);
        assert_eq!(
            status("/me", Some("not-a-token".to_string())).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_admin_gate() {
        assert_eq!(status("/admin", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/admin", token("u1", false)).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/admin", token("admin", true)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_current_user_or_admin_gate() {
        assert_eq!(status("/users/u1", token("u1", false)).await, StatusCode::OK);
        assert_eq!(status("/users/u1", token("admin", true)).await, StatusCode::OK);
        assert_eq!(
            status("/users/u1", token("u2", false)).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status("/users/u1", None).await, StatusCode::UNAUTHORIZED);
    }
}
