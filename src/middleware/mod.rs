//! Middleware components for HTTP request processing.
//!
//! - `auth`: bearer-token check guarding the /api routes
//! - `ip`: client address extraction through proxy headers

pub mod auth;
pub mod ip;
