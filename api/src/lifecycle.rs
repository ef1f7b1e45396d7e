//! Post lifecycle: list, view, create, update and delete.
//!
//! Every operation gets the store, the acting user and the request
//! parameters as arguments and returns a plain value. Mapping outcomes to
//! HTTP responses is left to `routes::post`.

use crate::{
    forms::{PostForm, PostSubmission, ValidationResult},
    models::{Actor, NewPost, Post, PostId, UserId},
    pagination::Page,
    policy::can_mutate,
    store::{PostStore, StoreError},
};
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

pub const POSTS_PER_PAGE: usize = 5;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post {0} not found")]
    NotFound(PostId),

    #[error("user {actor} is not the author of post {post}")]
    Forbidden { post: PostId, actor: UserId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of handling a submitted form.
#[derive(Debug)]
pub enum Submitted<T> {
    Saved(T),
    Invalid(PostForm),
}

/// Which half of the update route was requested.
#[derive(Debug)]
pub enum UpdateRequest {
    /// Safe request: show the current values.
    Edit,
    /// Unsafe request carrying new values.
    Submit(PostSubmission),
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Form(PostForm),
    Updated(Post),
}

pub fn list_posts<S: PostStore + ?Sized>(store: &S, page: i64) -> Result<Page<Post>, PostError> {
    let posts = store.newest_first(None)?;
    Ok(Page::slice(posts, page, POSTS_PER_PAGE))
}

pub fn list_posts_by<S: PostStore + ?Sized>(
    store: &S,
    author: UserId,
    page: i64,
) -> Result<Page<Post>, PostError> {
    let posts = store.newest_first(Some(author))?;
    Ok(Page::slice(posts, page, POSTS_PER_PAGE))
}

pub fn get_post<S: PostStore + ?Sized>(store: &S, id: PostId) -> Result<Post, PostError> {
    store.find(id)?.ok_or(PostError::NotFound(id))
}

pub fn create_post<S: PostStore + ?Sized>(
    store: &S,
    actor: &Actor,
    submission: PostSubmission,
) -> Result<Submitted<Post>, PostError> {
    let fields = match submission.check() {
        ValidationResult::Valid(fields) => fields,
        ValidationResult::Invalid(errors) => {
            return Ok(Submitted::Invalid(PostForm::rejected(submission, errors)));
        }
    };

    let post = store.insert(NewPost {
        title: fields.title,
        content: fields.content,
        date_posted: Utc::now(),
        author: actor.id(),
    })?;

    info!("Post created: {} by user {}", post.id, actor.id());

    Ok(Submitted::Saved(post))
}

/// A post the acting user has been checked to own. Only `authorize`
/// hands these out.
#[derive(Debug)]
pub struct OwnedPost(Post);

impl OwnedPost {
    pub fn post(&self) -> &Post {
        &self.0
    }
}

/// Fetch `id` and make sure `actor` owns it.
pub fn authorize<S: PostStore + ?Sized>(
    store: &S,
    actor: &Actor,
    id: PostId,
) -> Result<OwnedPost, PostError> {
    let post = get_post(store, id)?;

    if !can_mutate(actor, &post) {
        warn!("User {} denied access to post {}", actor.id(), id);
        return Err(PostError::Forbidden {
            post: id,
            actor: actor.id(),
        });
    }

    Ok(OwnedPost(post))
}

pub fn update_post<S: PostStore + ?Sized>(
    store: &S,
    actor: &Actor,
    id: PostId,
    request: UpdateRequest,
) -> Result<UpdateOutcome, PostError> {
    let owned = authorize(store, actor, id)?;
    apply_update(store, actor, owned, request)
}

/// The part of `update_post` after the ownership check. Callers that must
/// not touch the request body before authorizing use this directly.
pub fn apply_update<S: PostStore + ?Sized>(
    store: &S,
    actor: &Actor,
    OwnedPost(post): OwnedPost,
    request: UpdateRequest,
) -> Result<UpdateOutcome, PostError> {
    let submission = match request {
        UpdateRequest::Edit => return Ok(UpdateOutcome::Form(PostForm::prefilled(&post))),
        UpdateRequest::Submit(submission) => submission,
    };

    match submission.check() {
        ValidationResult::Valid(fields) => {
            // id and author come from the fetched row, never from the body
            let updated = store.update(post.id, fields)?;
            info!("Post updated: {} by user {}", updated.id, actor.id());
            Ok(UpdateOutcome::Updated(updated))
        }
        ValidationResult::Invalid(errors) => Ok(UpdateOutcome::Form(PostForm::rejected(
            submission, errors,
        ))),
    }
}

pub fn delete_post<S: PostStore + ?Sized>(
    store: &S,
    actor: &Actor,
    id: PostId,
) -> Result<Post, PostError> {
    let owned = authorize(store, actor, id)?;
    let removed = store.delete(owned.post().id)?;

    info!("Post deleted: {} by user {}", id, actor.id());

    Ok(removed)
}
