use crate::models::{Actor, Post};

/// Whether `actor` may update or delete `post`. Only the author may.
pub fn can_mutate(actor: &Actor, post: &Post) -> bool {
    post.author == actor.id()
}
