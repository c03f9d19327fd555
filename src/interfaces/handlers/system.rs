use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    version: &'static str,
    uptime: String,
    started_at: String,
    database: &'static str,
    mail: &'static str,
}

/// `GET /api/health`
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime = chrono::Utc::now().signed_duration_since(*START_TIME);
    let uptime = Duration::from_secs(uptime.num_seconds().max(0) as u64);

    let database = match state.contact_handler.contact_repo.check_connection().await {
        Ok(()) => "OK",
        Err(e) => {
            tracing::warn!("Health check database probe failed: {}", e);
            "Unavailable"
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_duration(uptime).to_string(),
        started_at: START_TIME.to_rfc3339(),
        database,
        mail: if state.contact_handler.mail_enabled() { "configured" } else { "disabled" },
    })
}
