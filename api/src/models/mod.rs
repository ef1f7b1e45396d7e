mod post;
mod user;

pub use post::{NewPost, Post, PostId};
pub use user::{Actor, User, UserId};
