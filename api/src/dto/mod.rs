mod requests;
mod responses;

pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{
    AuthResponse, AuthorView, Flash, FormView, PostListView, PostView, Redirect, UserResponse,
};
