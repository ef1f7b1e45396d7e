use crate::{
    config::AppConfig,
    models::{User, UserId},
    store::PostStore,
};
use chrono::Duration;
use dashmap::DashMap;
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Cloned into every handler; all fields are cheap to clone.
///
/// Users live in `DashMap`s with two lookup indexes. Posts go through the
/// `PostStore` trait so the lifecycle code never sees the backing map.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<DashMap<UserId, User>>,
    pub email_index: Arc<DashMap<String, UserId>>, // Quick Lookup by Email
    pub username_index: Arc<DashMap<String, UserId>>,
    pub posts: Arc<dyn PostStore>,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AppState {
    pub fn new(config: &AppConfig, posts: Arc<dyn PostStore>) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            email_index: Arc::new(DashMap::new()),
            username_index: Arc::new(DashMap::new()),
            posts,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: config.token_ttl(),
        }
    }

    pub fn username_of(&self, id: &UserId) -> Option<String> {
        self.users.get(id).map(|user| user.username.clone())
    }
}
