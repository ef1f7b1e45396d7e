use crate::{
    dto::{FormView, PostView, Redirect},
    errors::ApiError,
    forms::{PostForm, PostSubmission},
    lifecycle::{self, Submitted, UpdateOutcome, UpdateRequest},
    models::{Actor, PostId},
    states::AppState,
};
use axum::{
    Json,
    body::{Body, Bytes, to_bytes},
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Largest post form body read after authorization.
pub const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

/// `{id}` path segment. Anything that is not a post id is a missing post.
#[derive(Debug, Clone, Copy)]
pub struct PostPath(pub PostId);

impl<S: Send + Sync> FromRequestParts<S> for PostPath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        raw.parse().map(PostPath).map_err(|_| ApiError::NotFound)
    }
}

/// GET /post/new
/// Headers: Authorization: Bearer <token>
pub async fn new_post_form(_actor: Actor) -> FormView {
    FormView::new_post(PostForm::empty())
}

/// POST /post/new
/// Headers: Authorization: Bearer <token>
/// Body: { "title": "...", "content": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    actor: Actor,
    body: Bytes,
) -> Result<Response, ApiError> {
    let submission = PostSubmission::from_body(&body);

    match lifecycle::create_post(state.posts.as_ref(), &actor, submission)? {
        Submitted::Saved(_) => {
            Ok(Redirect::success("/", "Your post has been created!").into_response())
        }
        Submitted::Invalid(form) => Ok(FormView::new_post(form).into_response()),
    }
}

/// GET /post/{id}
pub async fn get_post(
    State(state): State<AppState>,
    PostPath(id): PostPath,
) -> Result<Json<PostView>, ApiError> {
    let post = lifecycle::get_post(state.posts.as_ref(), id)?;
    let username = state.username_of(&post.author);

    Ok(Json(PostView::new(post, username)))
}

/// GET /post/{id}/update
/// Headers: Authorization: Bearer <token>
pub async fn edit_post_form(
    State(state): State<AppState>,
    actor: Actor,
    PostPath(id): PostPath,
) -> Result<Response, ApiError> {
    let outcome = lifecycle::update_post(state.posts.as_ref(), &actor, id, UpdateRequest::Edit)?;
    Ok(update_response(outcome))
}

/// POST /post/{id}/update
/// Headers: Authorization: Bearer <token>
/// Body: { "title": "...", "content": "..." }
///
/// The body stays unread until the ownership check has passed.
pub async fn update_post(
    State(state): State<AppState>,
    actor: Actor,
    PostPath(id): PostPath,
    body: Body,
) -> Result<Response, ApiError> {
    let owned = lifecycle::authorize(state.posts.as_ref(), &actor, id)?;

    let body = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|_| ApiError::PayloadTooLarge)?;
    let submission = PostSubmission::from_body(&body);

    let outcome = lifecycle::apply_update(
        state.posts.as_ref(),
        &actor,
        owned,
        UpdateRequest::Submit(submission),
    )?;
    Ok(update_response(outcome))
}

fn update_response(outcome: UpdateOutcome) -> Response {
    match outcome {
        UpdateOutcome::Updated(post) => Redirect::success(
            format!("/post/{}", post.id),
            "Your post has been updated!",
        )
        .into_response(),
        UpdateOutcome::Form(form) => FormView::update_post(form).into_response(),
    }
}

/// POST /post/{id}/delete
/// Headers: Authorization: Bearer <token>
pub async fn delete_post(
    State(state): State<AppState>,
    actor: Actor,
    PostPath(id): PostPath,
) -> Result<Redirect, ApiError> {
    lifecycle::delete_post(state.posts.as_ref(), &actor, id)?;

    Ok(Redirect::success("/", "Your post has been deleted!"))
}
