use crate::{
    dto::{PostListView, PostView},
    errors::ApiError,
    lifecycle,
    pagination::PageParams,
    states::AppState,
};
use axum::{
    Json,
    extract::State,
};

/// GET / and GET /home?page=1
pub async fn home(
    State(state): State<AppState>,
    params: PageParams,
) -> Result<Json<PostListView>, ApiError> {
    let page = lifecycle::list_posts(state.posts.as_ref(), params.page())?
        .map(|post| {
            let username = state.username_of(&post.author);
            PostView::new(post, username)
        });

    Ok(Json(PostListView::new(page, None)))
}

/// GET /about
pub async fn about() -> Json<serde_json::Value> {
    Json(serde_json::json!({
      "title": "About"
    }))
}
