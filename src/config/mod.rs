//! Application configuration, loaded from environment variables.
//!
//! - [`cors`]: allowed origins for the browser client
//! - [`database`]: PostgreSQL pool initialization and migrations
//! - [`session`]: cookie signing key and session lifetime

pub mod cors;
pub mod database;
pub mod session;
