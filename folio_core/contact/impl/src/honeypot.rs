use folio_models::contact::ContactForm;

pub const HONEYPOT_FIELD: &str = "honeypot";

/// Humans never see the honeypot field, so any text in it marks the form as
/// filled in by a bot. Non-string values are ignored.
pub fn is_spam(form: &ContactForm) -> bool {
    form.text(HONEYPOT_FIELD)
        .is_some_and(|value| !value.trim().is_empty())
}
