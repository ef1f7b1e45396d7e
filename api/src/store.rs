use crate::{
    forms::PostFields,
    models::{NewPost, Post, PostId, UserId},
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The row disappeared between fetch and write.
    #[error("post {0} no longer exists")]
    Gone(PostId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for posts.
///
/// Every write method is one commit: it either fully applies or returns an
/// error without changing anything.
pub trait PostStore: Send + Sync {
    fn find(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// All posts, newest `date_posted` first. Ties go to the higher id.
    /// `author` restricts the listing to one user's posts.
    fn newest_first(&self, author: Option<UserId>) -> Result<Vec<Post>, StoreError>;

    /// Persist a new post and assign its id.
    fn insert(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Overwrite title and content of an existing post.
    fn update(&self, id: PostId, fields: PostFields) -> Result<Post, StoreError>;

    fn delete(&self, id: PostId) -> Result<Post, StoreError>;
}

/// `DashMap` backed store. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryPostStore {
    posts: DashMap<PostId, Post>,
    next_id: AtomicI64,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore for MemoryPostStore {
    fn find(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.get(&id).map(|entry| entry.value().clone()))
    }

    fn newest_first(&self, author: Option<UserId>) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| author.is_none_or(|author| entry.value().author == author))
            .map(|entry| entry.value().clone())
            .collect();

        posts.sort_by(|a, b| {
            b.date_posted
                .cmp(&a.date_posted)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(posts)
    }

    fn insert(&self, post: NewPost) -> Result<Post, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let post = post.into_post(id);
        self.posts.insert(id, post.clone());
        Ok(post)
    }

    fn update(&self, id: PostId, fields: PostFields) -> Result<Post, StoreError> {
        let mut entry = self.posts.get_mut(&id).ok_or(StoreError::Gone(id))?;
        entry.title = fields.title;
        entry.content = fields.content;
        Ok(entry.value().clone())
    }

    fn delete(&self, id: PostId) -> Result<Post, StoreError> {
        self.posts
            .remove(&id)
            .map(|(_, post)| post)
            .ok_or(StoreError::Gone(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn draft(author: UserId, title: &str, minutes_ago: i64) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("{title} body"),
            date_posted: Utc::now() - Duration::minutes(minutes_ago),
            author,
        }
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = MemoryPostStore::new();
        let author = Uuid::new_v4();

        let first = store.insert(draft(author, "a", 0)).unwrap();
        let second = store.insert(draft(author, "b", 0)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_newest_first_orders_by_date_then_id() {
        let store = MemoryPostStore::new();
        let author = Uuid::new_v4();
        store.insert(draft(author, "old", 30)).unwrap();
        let tie_a = draft(author, "tie-a", 0);
        let mut tie_b = draft(author, "tie-b", 0);
        tie_b.date_posted = tie_a.date_posted;
        store.insert(tie_a).unwrap();
        store.insert(tie_b).unwrap();

        let titles: Vec<String> = store
            .newest_first(None)
            .unwrap()
            .into_iter()
            .map(|post| post.title)
            .collect();

        assert_eq!(titles, vec!["tie-b", "tie-a", "old"]);
    }

    #[test]
    fn test_newest_first_filters_by_author() {
        let store = MemoryPostStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.insert(draft(alice, "alice", 1)).unwrap();
        store.insert(draft(bob, "bob", 0)).unwrap();

        let posts = store.newest_first(Some(alice)).unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author, alice);
    }

    #[test]
    fn test_update_keeps_identity_fields() {
        let store = MemoryPostStore::new();
        let post = store.insert(draft(Uuid::new_v4(), "before", 5)).unwrap();

        let updated = store
            .update(
                post.id,
                PostFields {
                    title: "after".into(),
                    content: "new body".into(),
                },
            )
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.content, "new body");
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.author, post.author);
        assert_eq!(updated.date_posted, post.date_posted);
    }

    #[test]
    fn test_writes_to_missing_post_fail() {
        let store = MemoryPostStore::new();
        let fields = PostFields {
            title: "t".into(),
            content: "c".into(),
        };

        assert!(matches!(store.update(7, fields), Err(StoreError::Gone(7))));
        assert!(matches!(store.delete(7), Err(StoreError::Gone(7))));
        assert!(store.find(7).unwrap().is_none());
    }
}
