pub mod health;
pub mod home;
pub mod post;
pub mod user;
