use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Map a database error to a message safe to return to callers
pub fn sanitize_db_error(error: &sqlx::Error) -> &'static str {
    match error {
        sqlx::Error::Configuration(_) => "Database configuration error",
        sqlx::Error::Database(_) => "Database operation error",
        sqlx::Error::Io(_) => "Database connection error",
        sqlx::Error::Tls(_) => "Database TLS error",
        sqlx::Error::Protocol(_) => "Database protocol error",
        sqlx::Error::PoolTimedOut => "Database pool timeout",
        sqlx::Error::PoolClosed => "Database pool closed",
        _ => "Database error",
    }
}

/// GET /health
/// Liveness probe, no database access
pub async fn health_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "jobly",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// GET /health/ready
/// Readiness probe with database connectivity check
pub async fn readiness_handler(State(pool): State<Arc<PgPool>>) -> (StatusCode, Json<Value>) {
    let start_time = Instant::now();

    let db_check = tokio::time::timeout(
        Duration::from_secs(2),
        sqlx::query("SELECT 1 as health_check").fetch_one(pool.as_ref()),
    )
    .await;

    let response_time = start_time.elapsed();

    match db_check {
        Ok(Ok(_)) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "service": "jobly",
                "database": "connected",
                "response_time_ms": response_time.as_millis(),
            })),
        ),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "service": "jobly",
                    "database": "disconnected",
                    "error": sanitize_db_error(&e),
                    "response_time_ms": response_time.as_millis(),
                })),
            )
        }
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "service": "jobly",
                "database": "timeout",
                "error": "Database query timed out after 2 seconds",
                "response_time_ms": response_time.as_millis(),
            })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_sanitization() {
        let config_err = sqlx::Error::Configuration("host=localhost password=secret".into());
        assert_eq!(sanitize_db_error(&config_err), "Database configuration error");

        let io_err = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(sanitize_db_error(&io_err), "Database connection error");

        assert_eq!(sanitize_db_error(&sqlx::Error::PoolTimedOut), "Database pool timeout");
        assert_eq!(sanitize_db_error(&sqlx::Error::RowNotFound), "Database error");
    }

    #[tokio::test]
    async fn test_health_handler() {
        let (status, Json(body)) = health_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "jobly");
    }
}
