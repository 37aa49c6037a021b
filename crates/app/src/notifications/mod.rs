//! Purchase notifications.

mod mailer;
pub mod models;
mod render;

pub use mailer::{HttpMailer, MailerConfig, MockNotifier, Notifier, NotifyError};
pub use render::{purchase_html, purchase_subject};
