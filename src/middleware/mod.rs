pub mod auth;

pub use auth::{authenticate_jwt, authorize, require_capability, AuthUser};
