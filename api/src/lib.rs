//! JSON blog service: paginated post listing, public post pages, and
//! author-only editing behind bearer-token authentication.

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod forms;
pub mod lifecycle;
pub mod models;
pub mod pagination;
pub mod policy;
pub mod routes;
pub mod states;
pub mod store;

pub use config::AppConfig;
pub use states::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Every route of the service, with middleware applied.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Public pages
        .route("/", get(routes::home::home))
        .route("/home", get(routes::home::home))
        .route("/about", get(routes::home::about))
        .route("/user/{username}", get(routes::user::user_posts))
        .route("/post/{id}", get(routes::post::get_post))
        // Accounts
        .route("/register", post(routes::user::register))
        .route("/login", post(routes::user::login))
        .route("/account", get(routes::user::account))
        // Authoring (auth required)
        .route(
            "/post/new",
            get(routes::post::new_post_form).post(routes::post::create_post),
        )
        .route(
            "/post/{id}/update",
            get(routes::post::edit_post_form).post(routes::post::update_post),
        )
        .route("/post/{id}/delete", post(routes::post::delete_post))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .layer(cors)
}
