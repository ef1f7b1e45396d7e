use blog_api::{AppConfig, AppState, router, store::MemoryPostStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_api=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::new(&config, Arc::new(MemoryPostStore::new()));
    let app = router(state, &config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET       /, /home             - Latest posts (?page=N)");
    info!("  GET       /about               - About page");
    info!("  POST      /register, /login    - Accounts");
    info!("  GET       /account             - Current user (auth)");
    info!("  GET       /user/{{username}}     - Posts by one author");
    info!("  GET|POST  /post/new            - Create post (auth)");
    info!("  GET       /post/{{id}}           - View post");
    info!("  GET|POST  /post/{{id}}/update    - Edit post (author only)");
    info!("  POST      /post/{{id}}/delete    - Delete post (author only)");

    axum::serve(listener, app).await?;

    Ok(())
}
