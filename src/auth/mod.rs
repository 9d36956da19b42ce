pub mod exchange;
pub mod handshake;
pub mod notify;
pub mod store;
pub mod validate;

pub use exchange::{CodeExchanger, ExchangeError, HttpExchanger};
pub use handshake::{AuthorizationRequest, Completion, begin_authorization, complete_authorization};
pub use notify::{Notifier, Toast, ToastBuffer, ToastLevel};
pub use store::{AuthStore, MemoryAuthStore, SessionAuthStore, StoreError};
