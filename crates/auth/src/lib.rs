//! `fedsvc-auth` — static bearer-token gate (no sessions, no expiry).
//!
//! This crate is intentionally decoupled from HTTP: the API layer extracts the
//! header value and hands it to [`authorize`].

pub mod authorize;
pub mod token;

pub use authorize::{authorize, AuthError};
pub use token::SharedSecret;
