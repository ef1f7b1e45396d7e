use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated identity performing a request.
///
/// Two actors are the same actor iff they wrap the same user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Actor(UserId);

impl Actor {
    pub fn new(id: UserId) -> Self {
        Self(id)
    }

    pub fn id(&self) -> UserId {
        self.0
    }
}
