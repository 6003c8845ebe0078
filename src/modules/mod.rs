pub mod activities;
pub mod auth;
pub mod resources;
pub mod users;
