use nutype::nutype;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw fields of a submitted contact form as decoded from the request body.
///
/// Nothing about the content is guaranteed; see [`ContactSubmission`] for the
/// validated counterpart.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ContactForm(pub Map<String, Value>);

impl ContactForm {
    /// Returns the value of `field` if it is present and a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for ContactForm {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: ContactSubject,
    pub message: ContactMessage,
}

#[nutype(
    validate(predicate = |s: &str| !s.trim().is_empty(), len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactName(String);

/// Only a syntactic sanity check, deliverability is never verified.
#[nutype(
    validate(predicate = |s: &str| !s.trim().is_empty() && s.contains('@') && s.contains('.')),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactEmail(String);

#[nutype(
    validate(predicate = |s: &str| !s.trim().is_empty(), len_char_max = 150),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactSubject(String);

#[nutype(
    validate(predicate = |s: &str| !s.trim().is_empty(), len_char_max = 4000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref)
)]
pub struct ContactMessage(String);
