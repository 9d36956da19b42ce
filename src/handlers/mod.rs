pub mod login_page;
pub mod oauth;

pub use login_page::{login_form_handler, login_page_handler};
pub use oauth::{callback_handler, google_login_handler};

use axum::response::Html;

use crate::auth::Toast;

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub(crate) fn toast_markup(toasts: &[Toast]) -> String {
    toasts
        .iter()
        .map(|toast| {
            format!(
                r#"<div class="toast {}">{}</div>"#,
                toast.level,
                escape_html(&toast.message)
            )
        })
        .collect()
}

/// Terminal page for a login attempt. With `redirect_home` the page
/// immediately navigates to `/`, which carries no query string; this is
/// what strips `code`/`state` from the visible URL.
pub(crate) fn result_page(toasts: &[Toast], redirect_home: bool) -> Html<String> {
    let refresh = if redirect_home {
        r#"<meta http-equiv="refresh" content="0;url=/">"#
    } else {
        ""
    };
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    {refresh}
    <title>Login</title>
</head>
<body>
    {toasts}
    <p><a href="/">Back to login</a></p>
</body>
</html>"#,
        refresh = refresh,
        toasts = toast_markup(toasts),
    ))
}
