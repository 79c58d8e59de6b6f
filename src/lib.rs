//! Bookmarks Backend Library
//!
//! Credential service (signup, signin, access tokens) and the HTTP surface
//! around it. Exposed as a library so the binary and integration tests share
//! one router.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;
