use folio_core_contact_contracts::ContactValidationError;
use folio_models::contact::{
    ContactEmail, ContactForm, ContactMessage, ContactName, ContactSubject, ContactSubmission,
};

/// Checks the fields of `form` in a fixed order and reports the first problem.
///
/// Presence of all required fields is checked first, then the length limits
/// (in characters, on the untrimmed value) and finally the email address.
pub fn validate(form: &ContactForm) -> Result<ContactSubmission, ContactValidationError> {
    let required = |field: &'static str| {
        form.text(field)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_owned)
            .ok_or(ContactValidationError::MissingField(field))
    };

    let name = required("name")?;
    let email = required("email")?;
    let subject = required("subject")?;
    let message = required("message")?;

    let name = ContactName::try_new(name).map_err(|_| ContactValidationError::NameTooLong)?;
    let subject =
        ContactSubject::try_new(subject).map_err(|_| ContactValidationError::SubjectTooLong)?;
    let message =
        ContactMessage::try_new(message).map_err(|_| ContactValidationError::MessageTooLong)?;
    let email = ContactEmail::try_new(email).map_err(|_| ContactValidationError::InvalidEmail)?;

    Ok(ContactSubmission {
        name,
        email,
        subject,
        message,
    })
}
