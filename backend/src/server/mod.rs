//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};
pub(crate) use state_builders::build_repository;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::routes;
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(routes::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server over the configured user store.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        repository,
    } = config;
    let http_state = web::Data::new(HttpState::over_repository(&repository));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
