use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use tower_sessions::Session;

use crate::auth::validate::{valid_email, valid_password};
use crate::auth::{AuthStore, Notifier, SessionAuthStore, Toast, ToastBuffer, ToastLevel};
use crate::handlers::{escape_html, result_page, toast_markup};
use crate::models::AppState;
use crate::models::oauth::{LoginForm, UserProfile};

#[derive(Debug, Default)]
struct FieldErrors {
    email: Option<&'static str>,
    password: Option<&'static str>,
}

impl FieldErrors {
    fn any(&self) -> bool {
        self.email.is_some() || self.password.is_some()
    }
}

/// Serves the login page. A signed-in session gets a cosmetic greeting from
/// the cached profile; nothing is re-validated against the backend.
pub async fn login_page_handler(
    State(_app_state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let store = SessionAuthStore::new(session);
    let toasts = ToastBuffer::new();

    match store.is_signed_in().await {
        Ok(true) => {
            let name = store
                .signed_in_user()
                .await
                .ok()
                .flatten()
                .map(|user| user.name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "User".to_string());
            toasts.notify(ToastLevel::Info, &format!("Welcome back, {name}!"));
        }
        Ok(false) => {}
        Err(err) => tracing::warn!(error = %err, "could not read session"),
    }

    Html(login_page(&toasts.take(), &FieldErrors::default()))
}

pub async fn login_form_handler(
    State(_app_state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let store = SessionAuthStore::new(session);
    let email = form.email.trim();
    let password = form.password.trim();

    let mut errors = FieldErrors::default();
    if !valid_email(email) {
        errors.email = Some("Invalid email address");
    }
    if !valid_password(password) {
        errors.password = Some("Password must be 8+ characters");
    }
    if errors.any() {
        return Html(login_page(&[], &errors)).into_response();
    }

    if let Err(err) = store.record_sign_in(UserProfile::named(email)).await {
        tracing::error!(error = %err, "failed to persist login");
        let toasts = [Toast::new(
            ToastLevel::Error,
            "Login failed. Try again.",
        )];
        return result_page(&toasts, false).into_response();
    }

    tracing::info!("local login succeeded");
    let toasts = [Toast::new(
        ToastLevel::Success,
        "Login successful! Redirecting...",
    )];
    result_page(&toasts, true).into_response()
}

fn login_page(toasts: &[Toast], errors: &FieldErrors) -> String {
    let error_span = |message: Option<&str>| {
        message
            .map(|m| format!(r#"<span class="field-error">{}</span>"#, escape_html(m)))
            .unwrap_or_default()
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Login</title>
</head>
<body>
    {toasts}
    <form method="post" action="/login">
        <label>Email <input type="email" name="email"></label>
        {email_error}
        <label>Password <input type="password" name="password"></label>
        {password_error}
        <button type="submit" class="login-btn">Log in</button>
    </form>
    <p><a href="/auth/google">Continue with Google</a></p>
</body>
</html>"#,
        toasts = toast_markup(toasts),
        email_error = error_span(errors.email),
        password_error = error_span(errors.password),
    )
}
