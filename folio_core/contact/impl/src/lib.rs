use std::sync::Arc;

use folio_core_contact_contracts::{ContactService, ContactSubmitError, ContactSubmitOutcome};
use folio_email_contracts::{Email, EmailService};
use folio_models::contact::{ContactForm, ContactSubmission};
use tracing::{debug, info};

pub mod honeypot;
pub mod validate;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Email> {
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Prepended to the subject chosen by the visitor.
    pub subject_prefix: Arc<str>,
}

impl<EmailS> ContactServiceImpl<EmailS> {
    pub fn new(email: EmailS, config: ContactServiceConfig) -> Self {
        Self { email, config }
    }

    fn compose(&self, submission: ContactSubmission) -> Email {
        let ContactSubmission {
            name,
            email,
            subject,
            message,
        } = submission;

        Email {
            subject: format!("{}{}", self.config.subject_prefix, *subject),
            body: format!(
                "New contact message from your portfolio website\n\n\
                 Name: {}\n\
                 Email: {}\n\
                 Subject: {}\n\n\
                 Message:\n{}\n",
                *name, *email, *subject, *message
            ),
            reply_to: Some(email.into_inner()),
        }
    }
}

impl<EmailS> ContactService for ContactServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn submit(&self, form: ContactForm) -> Result<ContactSubmitOutcome, ContactSubmitError> {
        if honeypot::is_spam(&form) {
            debug!("Dropping contact form submission with filled honeypot");
            return Ok(ContactSubmitOutcome::DroppedAsSpam);
        }

        let submission = validate::validate(&form)?;
        info!("Relaying contact message from {}", *submission.email);

        self.email
            .send(self.compose(submission))
            .await
            .map_err(ContactSubmitError::Send)?;

        Ok(ContactSubmitOutcome::Sent)
    }
}
