//! User Portal Shared Library
//!
//! This crate contains the wire types, the role enumeration and the
//! credential validator used by both the backend and the WASM client.
//! Everything here is pure and synchronous so it can run on either side.

pub mod role;
pub mod types;
pub mod validation;

pub use role::Role;
pub use types::{Claims, NewUser, SignInRequest, SignUpRequest, TokenResponse, UserProfile};
pub use validation::{validate_sign_up, FieldError};
