//! HTML handlers for the demo application.

mod login;
mod pages;

pub use login::{LoginForm, login_page_handler, login_submit_handler, logout_handler};
pub use pages::{account_handler, home_handler, reports_handler};
