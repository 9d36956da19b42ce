use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;

use crate::auth::{
    AuthStore, SessionAuthStore, Toast, ToastBuffer, ToastLevel, begin_authorization,
};
use crate::handlers::result_page;
use crate::models::AppState;

/// Kicks off the Google authorization-code flow and redirects the browser
/// to the provider.
pub async fn google_login_handler(
    State(app_state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let store = SessionAuthStore::new(session);

    if store.is_signed_in().await.unwrap_or(false) {
        tracing::debug!("session already signed in, skipping authorization flow");
        return Redirect::to("/").into_response();
    }

    let toasts = ToastBuffer::new();
    match begin_authorization(&app_state.config, &store, &toasts).await {
        Ok(url) => {
            tracing::info!("redirecting to authorization endpoint");
            Redirect::to(url.as_str()).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "could not store pending authorization state");
            let toasts = [Toast::new(ToastLevel::Error, "Login failed. Try again.")];
            result_page(&toasts, false).into_response()
        }
    }
}
