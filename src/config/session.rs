use std::env;

use axum_extra::extract::cookie::Key;

/// Signed-cookie session configuration.
///
/// Sessions are three discrete signed cookies (user id, role, display name)
/// rather than a server-side session table. There is no revocation list:
/// logout only deletes the client's cookies, so a stolen cookie set remains
/// valid until `ttl_secs` elapses. Accepted trade-off, documented here rather
/// than papered over.
#[derive(Clone)]
pub struct SessionConfig {
    pub key: Key,
    pub ttl_secs: i64,
    pub secure: bool,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            "assetdesk-dev-session-secret-change-in-production".to_string()
        });

        Self {
            // derive_from requires at least 32 bytes of input
            key: Key::derive_from(secret.as_bytes()),
            ttl_secs: env::var("SESSION_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 7 days
            secure: env::var("ENVIRONMENT")
                .map(|e| e == "production")
                .unwrap_or(false),
        }
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("ttl_secs", &self.ttl_secs)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}
