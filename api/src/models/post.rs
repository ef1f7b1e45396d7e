use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type PostId = i64;

/// A stored blog post.
///
/// `id`, `author` and `date_posted` are fixed when the store accepts the
/// post. Only `title` and `content` change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub author: UserId,
}

/// A post that has not been given an id yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub author: UserId,
}

impl NewPost {
    pub fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            date_posted: self.date_posted,
            author: self.author,
        }
    }
}
