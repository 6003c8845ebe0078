//! Request middleware and extractors.
//!
//! - [`auth`]: signed-cookie session resolution ([`auth::CurrentUser`])
//! - [`role`]: pure authorization rules (coarse gates, the rank hierarchy,
//!   self-deletion protection)
//!
//! Handlers take `CurrentUser` as an extractor to require a session, then
//! call into [`role`] for anything finer than "is logged in".

pub mod auth;
pub mod role;
