//! Dashboard — Axum web server hosting the game UI and JSON API.
//!
//! Serves a self-contained HTML page (the presentational layer) plus the
//! flip/cash-out/recharge API. CORS enabled for local development.

pub mod routes;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use routes::AppState;

/// The embedded game page (compiled into the binary).
const GAME_HTML: &str = include_str!("templates/index.html");
/// Cosmetic assets referenced by the page.
const LOGO_SVG: &str = include_str!("assets/logo.svg");
const BOTTLE_SVG: &str = include_str!("assets/bottle.svg");

/// Start the web server.
///
/// This spawns a background task — it doesn't block.
pub fn spawn_dashboard(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);

    tokio::spawn(async move {
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
        info!(port, "Game server starting on http://localhost:{port}");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind game server port");

        axum::serve(listener, app)
            .await
            .expect("Game server error");
    });

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin("*".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/state", get(routes::get_state))
        .route("/api/flip/start", post(routes::start_flip))
        .route("/api/flip/cashout", post(routes::cash_out))
        .route("/api/recharge", post(routes::recharge))
        .route("/health", get(routes::health))
        // Page and assets
        .route("/", get(serve_page))
        .route("/assets/logo.svg", get(serve_logo))
        .route("/assets/bottle.svg", get(serve_bottle))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded game page.
async fn serve_page() -> Html<&'static str> {
    Html(GAME_HTML)
}

async fn serve_logo() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], LOGO_SVG)
}

async fn serve_bottle() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], BOTTLE_SVG)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
