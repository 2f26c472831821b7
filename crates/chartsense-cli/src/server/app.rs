//! Axum application setup.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Analysis
        .route("/analysis", get(handlers::get_analysis))
        .route("/recommendations", get(handlers::get_recommendations))
        // Data
        .route("/data", get(handlers::get_data_page))
        .route("/dataset", post(handlers::replace_dataset))
        // Chart rules
        .route("/validate", post(handlers::validate_chart))
        .route("/suggest", post(handlers::suggest_chart))
        .route("/explore", post(handlers::explore_chart))
        .route("/chart", post(handlers::chart_data));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    info!(%addr, "server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    println!("Server stopped");
    Ok(())
}
