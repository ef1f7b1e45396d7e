use crate::{
    forms::PostForm,
    models::{Post, PostId, User, UserId},
    pagination::Page,
};
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorView {
    pub id: UserId,
    pub username: Option<String>,
}

/// A post as shown to readers, with the author's name resolved.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub author: AuthorView,
}

impl PostView {
    pub fn new(post: Post, username: Option<String>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            date_posted: post.date_posted,
            author: AuthorView {
                id: post.author,
                username,
            },
        }
    }
}

/// Paginated listing for the home page and per-user pages.
#[derive(Debug, Serialize)]
pub struct PostListView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub posts: Page<PostView>,
    /// Page links for the pager; `null` marks a gap.
    pub page_links: Vec<Option<usize>>,
}

impl PostListView {
    pub fn new(posts: Page<PostView>, username: Option<String>) -> Self {
        let page_links = posts.iter_pages(1, 1, 2, 1);
        Self {
            username,
            posts,
            page_links,
        }
    }
}

/// The create/update form payload.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub legend: &'static str,
    pub form: PostForm,
}

impl FormView {
    pub fn new_post(form: PostForm) -> Self {
        Self {
            title: "New Post",
            legend: "New Post",
            form,
        }
    }

    pub fn update_post(form: PostForm) -> Self {
        Self {
            title: "Update Post",
            legend: "Update Post",
            form,
        }
    }
}

/// 200 for a fresh form, 422 once it carries errors.
impl IntoResponse for FormView {
    fn into_response(self) -> Response {
        let status = if self.form.is_valid() {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct Flash {
    pub category: &'static str,
    pub message: &'static str,
}

/// `303 See Other` to `location`, carrying a one-time notice.
#[derive(Debug, Serialize)]
pub struct Redirect {
    pub location: String,
    pub flash: Flash,
}

impl Redirect {
    pub fn success(location: impl Into<String>, message: &'static str) -> Self {
        Self {
            location: location.into(),
            flash: Flash {
                category: "success",
                message,
            },
        }
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.location.clone())],
            Json(self),
        )
            .into_response()
    }
}
