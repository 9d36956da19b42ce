use std::fmt;
use std::sync::Mutex;

/// Severity of a user-facing notification, mirroring the toast styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToastLevel::Info => "info",
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications. The handshake never talks to a page
/// directly; whatever renders the UI implements this.
pub trait Notifier {
    fn notify(&self, level: ToastLevel, message: &str);
}

/// Collects the toasts raised during one request so the handler can render
/// them into the response.
#[derive(Debug, Default)]
pub struct ToastBuffer {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut toasts| std::mem::take(&mut *toasts))
            .unwrap_or_default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }
}

impl Notifier for ToastBuffer {
    fn notify(&self, level: ToastLevel, message: &str) {
        tracing::debug!(%level, message, "toast");
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(Toast::new(level, message));
        }
    }
}
