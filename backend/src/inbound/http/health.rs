//! Liveness and readiness probes.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Probe state shared between the server bootstrap and the handlers.
///
/// Starts live but not ready; the bootstrap marks it ready once the listener
/// is bound.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a state that is live but not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready for traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
