use crate::{
    auth::create_token,
    dto::{AuthResponse, LoginRequest, PostListView, PostView, RegisterRequest, UserResponse},
    errors::ApiError,
    lifecycle,
    models::{Actor, User},
    pagination::PageParams,
    states::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// POST /register
/// Body: { "email": "...", "username": "...", "password": "..." }
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    if state.email_index.contains_key(&payload.email)
        || state.username_index.contains_key(&payload.username)
    {
        return Err(ApiError::UserAlreadyExists);
    }

    let hashed_password = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))?;

    let user = User {
        id: Uuid::new_v4(),
        email: payload.email,
        username: payload.username,
        hashed_password,
        created_at: Utc::now(),
    };

    // Claim the username first; a concurrent signup may have taken it while
    // we were hashing.
    match state.username_index.entry(user.username.clone()) {
        Entry::Occupied(_) => return Err(ApiError::UserAlreadyExists),
        Entry::Vacant(slot) => {
            slot.insert(user.id);
        }
    }
    match state.email_index.entry(user.email.clone()) {
        Entry::Occupied(_) => {
            state.username_index.remove(&user.username);
            return Err(ApiError::UserAlreadyExists);
        }
        Entry::Vacant(slot) => {
            slot.insert(user.id);
        }
    }

    let token = create_token(&user.id, &user.email, &state.jwt_secret, state.token_ttl)?;
    state.users.insert(user.id, user.clone());

    info!("New user registered: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /login
/// Body: { "email": "...", "password": "..." }
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    // Find user by email
    let user = state
        .email_index
        .get(&payload.email)
        .and_then(|user_id| state.users.get(&*user_id).map(|user| user.value().clone()))
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify(&payload.password, &user.hashed_password)
        .map_err(|e| ApiError::InternalError(format!("Password verification failed: {}", e)))?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(&user.id, &user.email, &state.jwt_secret, state.token_ttl)?;

    info!("User logged in: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// GET /account
/// Headers: Authorization: Bearer <token>
pub async fn account(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get(&actor.id()).ok_or(ApiError::NotFound)?;

    Ok(Json(user.value().clone().into()))
}

/// GET /user/{username}?page=1
pub async fn user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    params: PageParams,
) -> Result<Json<PostListView>, ApiError> {
    let author = state
        .username_index
        .get(&username)
        .map(|id| *id)
        .ok_or(ApiError::NotFound)?;

    let page = lifecycle::list_posts_by(state.posts.as_ref(), author, params.page())?
        .map(|post| PostView::new(post, Some(username.clone())));

    Ok(Json(PostListView::new(page, Some(username))))
}
