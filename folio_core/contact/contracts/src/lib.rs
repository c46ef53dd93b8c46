use std::future::Future;

use folio_email_contracts::EmailSendError;
use folio_models::contact::ContactForm;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Check a submitted contact form and relay it to the site owner.
    ///
    /// Submissions caught by the honeypot are dropped without validation and
    /// still reported as a success, so that bots cannot tell the difference.
    fn submit(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<ContactSubmitOutcome, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSubmitOutcome {
    Sent,
    DroppedAsSpam,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Invalid(#[from] ContactValidationError),
    #[error("Failed to send email: {0}")]
    Send(#[source] EmailSendError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Missing or empty field: {0}")]
    MissingField(&'static str),
    #[error("name too long")]
    NameTooLong,
    #[error("subject too long")]
    SubjectTooLong,
    #[error("message too long")]
    MessageTooLong,
    #[error("invalid email")]
    InvalidEmail,
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(
        mut self,
        form: ContactForm,
        result: Result<ContactSubmitOutcome, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
