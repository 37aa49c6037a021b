//! Mail Config

use clap::Args;

/// Purchase notification settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// HTTP endpoint of the email-delivery service
    #[arg(long, env = "MAIL_ENDPOINT")]
    pub mail_endpoint: String,

    /// Sender identity on outgoing mail
    #[arg(
        long,
        env = "MAIL_SENDER",
        default_value = "Tienda <no-reply@tienda.example>"
    )]
    pub mail_sender: String,
}
