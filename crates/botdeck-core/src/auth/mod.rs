//! Authentication: remote exchange, credential persistence, session lifecycle.

pub mod api;
pub mod session;
pub mod store;

pub use api::{ApiError, AuthApi, AuthExchange, HttpAuthApi, ProfileUpdate, Registration};
pub use session::SessionManager;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

/// Returns a masked version of a token for display (first 12 chars + ...).
///
/// Tokens are never logged or displayed in full.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}
