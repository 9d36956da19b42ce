mod callback_handler;
mod login_handler;

pub use callback_handler::callback_handler;
pub use login_handler::google_login_handler;
