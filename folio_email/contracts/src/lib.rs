use std::future::Future;

use thiserror::Error;

/// Relays plain text messages to the configured recipient through an SMTP
/// server. Sender and recipient are part of the relay's configuration.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Open one SMTP session and deliver `email`.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), EmailSendError>> + Send;

    /// Connect and authenticate without sending anything.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub body: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    /// The relay lacks required settings, no connection was attempted.
    #[error("Email config missing: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),
    #[error(transparent)]
    Delivery(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<(), EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
