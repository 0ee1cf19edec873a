//! Authentication module
//!
//! JWT-style bearer tokens with bcrypt password hashing.

mod middleware;
mod password;
mod token;

pub use middleware::{AdminUser, AuthUser};
pub use password::PasswordService;
pub use token::TokenService;
