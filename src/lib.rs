pub mod auth;
pub mod handlers;
pub mod models;

use axum::Router;
use axum::routing::{get, post};
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::models::AppState;

/// Builds the application router with its cookie-session layer. SameSite
/// must stay Lax so the session cookie rides along on the provider's
/// cross-site redirect back to the callback.
pub fn app(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_expiry = Expiry::OnInactivity(Duration::hours(6));
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(session_expiry);

    Router::new()
        .route("/", get(handlers::login_page_handler))
        .route("/login", post(handlers::login_form_handler))
        .route("/auth/google", get(handlers::google_login_handler))
        .route("/auth/callback", get(handlers::callback_handler))
        .layer(session_layer)
        .with_state(state)
}
