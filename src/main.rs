// Cinescope server - movie catalog proxy and comment store

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cinescope::{api::create_api_router, app_state::AppState, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize application state
    let app_state = AppState::new(config.clone()).await?;

    // Build main application router
    let app = Router::new()
        .nest("/api", create_api_router(app_state))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

    let addr = config.server_address();
    info!("Cinescope server starting on http://{}", addr);
    info!("  GET  /api/movies/trending           - weekly trending movies");
    info!("  GET  /api/movies/search?query=q     - search the catalog");
    info!("  GET  /api/movies/videos/{{movieId}}   - YouTube trailers for a movie");
    info!("  GET  /api/comments/{{movieId}}        - comments for a movie");
    info!("  POST /api/comments                  - add a comment (bearer token)");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
