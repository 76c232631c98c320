//! Health check endpoint.

use std::time::Duration;

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

/// A probe slower than this counts as a failed health check.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct HealthFailure {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[cfg(feature = "postgres")]
async fn database_connected(state: &AppState) -> bool {
    match &state.db {
        Some(db) => db.is_connected().await,
        None => false,
    }
}

#[cfg(not(feature = "postgres"))]
async fn database_connected(_state: &AppState) -> bool {
    false
}

/// GET /api/health
///
/// An unreachable database is reported, not failed; only a probe that
/// does not finish yields 500.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match tokio::time::timeout(PROBE_TIMEOUT, database_connected(&state)).await {
        Ok(connected) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            database: if connected { "connected" } else { "disconnected" },
            timestamp,
        }),
        Err(_) => {
            tracing::error!("Health check timed out after {:?}", PROBE_TIMEOUT);
            HttpResponse::InternalServerError().json(HealthFailure {
                status: "error",
                message: "Health check failed",
                timestamp,
            })
        }
    }
}
