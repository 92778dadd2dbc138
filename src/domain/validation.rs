//! Field validation rules.
//!
//! Validation is a pure function of a field's kind and its text. A failed
//! check is an ordinary return value carrying the message to show next to
//! the input, never an error.

use crate::domain::field::{FieldKind, FieldValue};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Minimum trimmed length of a name.
pub const NAME_MIN_CHARS: usize = 2;

/// Minimum trimmed length of a message.
pub const MESSAGE_MIN_CHARS: usize = 10;

/// Shown when a name is too short.
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters long.";

/// Shown when an email address does not have the `local@domain.tld` shape.
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

/// Shown when a message is too short.
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters long.";

/// `local@domain.tld` with no whitespace (byte-order mark included) and no
/// extra `@` in any part.
const EMAIL_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<Cow<'static, str>>,
}

impl ValidationResult {
    /// A passing result with no message.
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing result carrying the reason.
    pub fn invalid(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    /// Whether the value was accepted.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The human-readable reason for rejection, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// The rule attached to a field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Trimmed text must be at least `min` UTF-16 code units long
    MinChars {
        /// Minimum length in UTF-16 code units
        min: usize,
        /// Message on failure
        message: &'static str,
    },
    /// Trimmed text must look like `local@domain.tld`
    EmailShape,
}

impl FieldRule {
    /// The rule for a kind, or `None` for kinds without one.
    pub fn for_kind(kind: &FieldKind) -> Option<Self> {
        match kind {
            FieldKind::Name => Some(FieldRule::MinChars {
                min: NAME_MIN_CHARS,
                message: NAME_TOO_SHORT,
            }),
            FieldKind::Email => Some(FieldRule::EmailShape),
            FieldKind::Message => Some(FieldRule::MinChars {
                min: MESSAGE_MIN_CHARS,
                message: MESSAGE_TOO_SHORT,
            }),
            FieldKind::Other(_) => None,
        }
    }

    /// Apply the rule to an already-trimmed value.
    pub fn check(&self, value: FieldValue<'_>) -> ValidationResult {
        match *self {
            FieldRule::MinChars { min, message } => {
                if value.utf16_len() >= min {
                    ValidationResult::valid()
                } else {
                    ValidationResult::invalid(message)
                }
            }
            FieldRule::EmailShape => {
                if is_email_shaped(value.as_str()) {
                    ValidationResult::valid()
                } else {
                    ValidationResult::invalid(INVALID_EMAIL)
                }
            }
        }
    }
}

/// Minimal structural email check. Not RFC 5322.
pub fn is_email_shaped(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Validate `value` as a field of the given kind.
///
/// The value is trimmed before any rule runs. Kinds without a rule are
/// always valid.
///
/// # Example
/// ```
/// use form_throttle::{validate, FieldKind};
///
/// assert!(validate(&FieldKind::Email, " user@example.com ").is_valid());
///
/// let result = validate(&FieldKind::Name, "J");
/// assert!(!result.is_valid());
/// assert_eq!(result.message(), Some("Name must be at least 2 characters long."));
/// ```
pub fn validate(kind: &FieldKind, value: &str) -> ValidationResult {
    match FieldRule::for_kind(kind) {
        Some(rule) => rule.check(FieldValue::new(value)),
        None => ValidationResult::valid(),
    }
}
