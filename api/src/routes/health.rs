use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::state::AppState;

/// Health check endpoint handler
///
/// Probes every configured backing service; any failure answers 503.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let mut checks = Map::new();
    let mut healthy = true;

    for probe in &state.probes {
        let up = probe.is_healthy().await;
        healthy &= up;
        checks.insert(probe.name().to_string(), Value::from(if up { "up" } else { "down" }));
    }

    let body = json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": "gatekeeper",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": checks,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
