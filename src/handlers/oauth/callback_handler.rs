use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;

use crate::auth::{
    Completion, SessionAuthStore, Toast, ToastBuffer, ToastLevel, complete_authorization,
};
use crate::handlers::result_page;
use crate::models::AppState;
use crate::models::oauth::CallbackParams;

/// Lands every return from the provider, and any stray navigation to the
/// callback path. Completion outcomes that reached the code exchange are
/// sent home with an immediate redirect, which drops `code`/`state` from
/// the visible URL.
pub async fn callback_handler(
    Query(params): Query<CallbackParams>,
    State(app_state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    tracing::debug!(
        has_code = params.code.is_some(),
        has_error = params.error.is_some(),
        "oauth callback received"
    );

    let store = SessionAuthStore::new(session);
    let toasts = ToastBuffer::new();

    let completion =
        match complete_authorization(&params, &store, &app_state.exchanger, &toasts).await {
            Ok(completion) => completion,
            Err(err) => {
                tracing::error!(error = %err, "session failure during oauth completion");
                let toasts = [Toast::new(ToastLevel::Error, "Server error during login")];
                return result_page(&toasts, false).into_response();
            }
        };

    match completion {
        Completion::NotOAuthReturn => Redirect::to("/").into_response(),
        _ => result_page(&toasts.take(), completion.clean_url()).into_response(),
    }
}
