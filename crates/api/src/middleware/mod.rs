//! Request middleware.
//!
//! - [`auth::require_auth`] -- Authentication gate for protected routes.
//! - [`auth::AuthUser`] -- Extracts the identity the gate attached.

pub mod auth;
