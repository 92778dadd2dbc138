//! Contact form state driven by input events.
//!
//! The form keeps each field's value and error state and decides what the
//! page should show after a blur, an input or a submit. Marking inputs and
//! rendering messages stays with the caller.

use crate::domain::field::{sanitize, FieldKind};
use crate::domain::validation::{validate, ValidationResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Label the submit button shows while the form is being sent.
pub const SENDING_LABEL: &str = "Sending...";

/// Error returned by form operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No field with this name is registered
    UnknownField(String),
    /// Submit pressed again while a submission is in flight
    AlreadySending,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField(name) => write!(f, "unknown form field: {}", name),
            FormError::AlreadySending => write!(f, "form is already being submitted"),
        }
    }
}

impl std::error::Error for FormError {}

/// One input of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    name: String,
    kind: FieldKind,
    value: String,
    required: bool,
    error: Option<String>,
}

impl FormField {
    fn new(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::from_name(name),
            value: String::new(),
            required,
            error: None,
        }
    }

    /// Input name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind derived from the name.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Current raw value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether submit checks this field.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the field is currently marked as errored.
    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }

    /// Message displayed next to the field, if errored.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validates the text that [`ContactForm::payload`] would post.
    fn revalidate(&mut self) -> ValidationResult {
        let result = validate(&self.kind, &sanitize(&self.value));
        self.error = result.message().map(str::to_string);
        if let Some(reason) = &self.error {
            debug!(field = %self.name, reason = %reason, "field rejected");
        }
        result
    }
}

/// A field's error as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFeedback {
    /// Input name
    pub field: String,
    /// Message to display next to it
    pub message: String,
}

/// What a submit attempt resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one required field failed; the submission must be cancelled
    Blocked {
        /// Every failing required field, in form order
        errors: Vec<FieldFeedback>,
    },
    /// All required fields passed; the form is now in the sending state
    Sending,
}

impl SubmitOutcome {
    /// Check if the submission may proceed.
    pub fn is_sending(&self) -> bool {
        matches!(self, SubmitOutcome::Sending)
    }
}

/// Contact form model.
///
/// # Example
/// ```
/// use form_throttle::ContactForm;
///
/// # fn main() -> Result<(), form_throttle::FormError> {
/// let mut form = ContactForm::standard();
/// form.input("name", "Ada")?;
/// form.input("email", "ada@example.com")?;
/// form.input("message", "Hi")?;
///
/// let outcome = form.submit()?;
/// assert!(!outcome.is_sending());
/// assert_eq!(form.errors().len(), 1);
/// assert_eq!(form.errors()[0].field, "message");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: Vec<FormField>,
    sending: bool,
}

impl ContactForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The site's contact form: required `name`, `email` and `message`.
    pub fn standard() -> Self {
        Self::new()
            .with_field("name", true)
            .with_field("email", true)
            .with_field("message", true)
    }

    /// Register a field. Re-registering a name replaces the earlier field.
    pub fn with_field(mut self, name: &str, required: bool) -> Self {
        self.fields.retain(|field| field.name != name);
        self.fields.push(FormField::new(name, required));
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// All fields in registration order.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    fn field_mut(&mut self, name: &str) -> Result<&mut FormField, FormError> {
        self.fields
            .iter_mut()
            .find(|field| field.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// The user typed into a field.
    ///
    /// An errored field is re-validated right away so the error clears as
    /// soon as the input becomes acceptable; a clean field is not checked
    /// until it loses focus. Returns the fresh result when a check ran.
    pub fn input(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<Option<ValidationResult>, FormError> {
        let field = self.field_mut(name)?;
        field.value = value.into();
        if field.is_errored() {
            Ok(Some(field.revalidate()))
        } else {
            Ok(None)
        }
    }

    /// A field lost focus.
    pub fn blur(&mut self, name: &str) -> Result<ValidationResult, FormError> {
        Ok(self.field_mut(name)?.revalidate())
    }

    /// The user pressed submit.
    ///
    /// Every required field is validated, not just the first failing one,
    /// so all errors show at once.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        if self.sending {
            return Err(FormError::AlreadySending);
        }

        let errors: Vec<FieldFeedback> = self
            .fields
            .iter_mut()
            .filter(|field| field.required)
            .filter_map(|field| {
                let result = field.revalidate();
                result.message().map(|message| FieldFeedback {
                    field: field.name.clone(),
                    message: message.to_string(),
                })
            })
            .collect();

        if errors.is_empty() {
            self.sending = true;
            debug!(fields = self.fields.len(), "contact form submitting");
            Ok(SubmitOutcome::Sending)
        } else {
            Ok(SubmitOutcome::Blocked { errors })
        }
    }

    /// Whether a submission is in flight.
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Label override for the submit button; `None` means keep the original.
    pub fn submit_label(&self) -> Option<&'static str> {
        self.sending.then_some(SENDING_LABEL)
    }

    /// Whether the submit button should be disabled.
    pub fn submit_disabled(&self) -> bool {
        self.sending
    }

    /// Errors currently displayed, in form order.
    pub fn errors(&self) -> Vec<FieldFeedback> {
        self.fields
            .iter()
            .filter_map(|field| {
                field.error().map(|message| FieldFeedback {
                    field: field.name.clone(),
                    message: message.to_string(),
                })
            })
            .collect()
    }

    /// Sanitized values keyed by field name, ready to post.
    pub fn payload(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), sanitize(&field.value)))
            .collect()
    }

    /// Clear values, errors and the sending state.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.error = None;
        }
        self.sending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{INVALID_EMAIL, MESSAGE_TOO_SHORT, NAME_TOO_SHORT};

    fn filled() -> ContactForm {
        let mut form = ContactForm::standard();
        form.input("name", "Ada Lovelace").unwrap();
        form.input("email", "ada@example.com").unwrap();
        form.input("message", "I would like a security audit.").unwrap();
        form
    }

    #[test]
    fn test_input_on_clean_field_does_not_validate() {
        let mut form = ContactForm::standard();
        assert_eq!(form.input("name", "A").unwrap(), None);
        assert!(!form.field("name").unwrap().is_errored());
    }

    #[test]
    fn test_blur_marks_and_clears_error() {
        let mut form = ContactForm::standard();
        form.input("email", "nope").unwrap();

        let result = form.blur("email").unwrap();
        assert!(!result.is_valid());
        assert_eq!(form.field("email").unwrap().error(), Some(INVALID_EMAIL));

        form.input("email", "ok@example.com").unwrap();
        assert!(!form.field("email").unwrap().is_errored());
    }

    #[test]
    fn test_input_on_errored_field_revalidates_live() {
        let mut form = ContactForm::standard();
        form.blur("name").unwrap();
        assert!(form.field("name").unwrap().is_errored());

        let still_bad = form.input("name", "A").unwrap().unwrap();
        assert!(!still_bad.is_valid());

        let fixed = form.input("name", "Al").unwrap().unwrap();
        assert!(fixed.is_valid());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_submit_reports_every_failing_field() {
        let mut form = ContactForm::standard();
        form.input("email", "user@example.com").unwrap();

        let outcome = form.submit().unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Blocked {
                errors: vec![
                    FieldFeedback {
                        field: "name".into(),
                        message: NAME_TOO_SHORT.into(),
                    },
                    FieldFeedback {
                        field: "message".into(),
                        message: MESSAGE_TOO_SHORT.into(),
                    },
                ]
            }
        );
        assert!(!form.is_sending());
        assert_eq!(form.submit_label(), None);
    }

    #[test]
    fn test_optional_fields_are_not_checked_on_submit() {
        let mut form = filled().with_field("phone", false);
        form.input("phone", "").unwrap();
        assert!(form.submit().unwrap().is_sending());
    }

    #[test]
    fn test_successful_submit_enters_sending_state() {
        let mut form = filled();
        assert_eq!(form.submit().unwrap(), SubmitOutcome::Sending);
        assert!(form.is_sending());
        assert!(form.submit_disabled());
        assert_eq!(form.submit_label(), Some(SENDING_LABEL));

        assert_eq!(form.submit(), Err(FormError::AlreadySending));
    }

    #[test]
    fn test_reset() {
        let mut form = filled();
        form.submit().unwrap();
        form.reset();

        assert!(!form.is_sending());
        assert!(form.fields().iter().all(|f| f.value().is_empty()));
        assert!(form.submit().unwrap() != SubmitOutcome::Sending);
    }

    #[test]
    fn test_unknown_field() {
        let mut form = ContactForm::standard();
        assert_eq!(
            form.blur("subject"),
            Err(FormError::UnknownField("subject".to_string()))
        );
        assert_eq!(
            form.input("subject", "x").unwrap_err().to_string(),
            "unknown form field: subject"
        );
    }

    #[test]
    fn test_payload_is_sanitized() {
        let mut form = filled();
        form.input("message", "  <b>Hello</b> there  ").unwrap();
        let payload = form.payload();
        assert_eq!(payload["message"], "bHello/b there");
        assert_eq!(payload["email"], "ada@example.com");
    }

    #[test]
    fn test_markup_only_values_do_not_pass() {
        let mut form = ContactForm::standard();
        form.input("name", "<>").unwrap();
        form.input("email", "a@b.co").unwrap();
        form.input("message", "<<<<<>>>>>").unwrap();

        let outcome = form.submit().unwrap();
        assert!(!outcome.is_sending());
        assert_eq!(
            form.errors()
                .iter()
                .map(|e| e.field.as_str())
                .collect::<Vec<_>>(),
            vec!["name", "message"]
        );
    }

    #[test]
    fn test_accepted_values_match_payload() {
        let mut form = filled();
        form.input("name", " <J>o ").unwrap();
        assert!(form.submit().unwrap().is_sending());
        assert_eq!(form.payload()["name"], "Jo");
    }

    #[test]
    fn test_reregistering_replaces_field() {
        let form = ContactForm::standard().with_field("email", false);
        assert_eq!(form.fields().len(), 3);
        assert!(!form.field("email").unwrap().is_required());
    }
}
