mod cli;
mod handlers;

pub use cli::ServeOptions;

use crate::prelude::{eprintln, *};
use axum::{routing::get, Router};
use bfhl_core::envelope::Identity;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

/// Read-only state shared by every request
#[derive(Debug)]
pub struct AppState {
    pub identity: Identity,
    pub verbose: bool,
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    if global.verbose {
        eprintln!("Starting bfhl server on {addr}...");
    }

    let state = Arc::new(AppState {
        identity: options.identity.into(),
        verbose: global.verbose,
    });

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("bfhl server listening on http://{addr}");

    if global.verbose {
        eprintln!("Processing endpoint: POST http://{}/bfhl", addr);
        eprintln!("Test endpoint: GET http://{}/bfhl", addr);
    }

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Build the application router
///
/// CORS is fully permissive so a browser-hosted tester can reach the API, and
/// panics inside a handler surface as the generic internal-fault envelope.
pub fn router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::service_info))
        .route(
            "/bfhl",
            get(handlers::operation_code).post(handlers::process),
        );

    with_layers(routes).with_state(state)
}

fn with_layers(routes: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(cors)
}
