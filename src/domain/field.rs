//! Form field identity and values.
//!
//! A field's kind is derived from the `name` attribute of the input it
//! belongs to. Values are trimmed once on construction so every rule sees
//! the same text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of characters kept by [`sanitize`].
pub const MAX_INPUT_CHARS: usize = 1000;

/// The semantic role of a form input.
///
/// Unrecognised names map to [`FieldKind::Other`], which has no rule and
/// therefore always validates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Sender's name
    Name,
    /// Sender's email address
    Email,
    /// Message body
    Message,
    /// Any other input, carried by its original name
    Other(String),
}

impl FieldKind {
    /// Derive a kind from an input's `name` attribute.
    ///
    /// Matching is exact: `"Email"` is not `"email"`.
    ///
    /// # Example
    /// ```
    /// use form_throttle::FieldKind;
    ///
    /// assert_eq!(FieldKind::from_name("email"), FieldKind::Email);
    /// assert_eq!(
    ///     FieldKind::from_name("company"),
    ///     FieldKind::Other("company".to_string())
    /// );
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name {
            "name" => FieldKind::Name,
            "email" => FieldKind::Email,
            "message" => FieldKind::Message,
            other => FieldKind::Other(other.to_string()),
        }
    }

    /// The input name this kind corresponds to.
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Email => "email",
            FieldKind::Message => "message",
            FieldKind::Other(name) => name,
        }
    }
}

impl From<&str> for FieldKind {
    fn from(name: &str) -> Self {
        FieldKind::from_name(name)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characters stripped from both ends of input: Unicode whitespace and
/// the byte-order mark.
pub fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// A field value with leading and trailing whitespace removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValue<'a>(&'a str);

impl<'a> FieldValue<'a> {
    /// Wrap raw input, trimming it.
    pub fn new(raw: &'a str) -> Self {
        FieldValue(raw.trim_matches(is_trimmable))
    }

    /// The trimmed text.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Length in UTF-16 code units, the unit browsers report for input
    /// values. Characters outside the Basic Multilingual Plane count twice.
    pub fn utf16_len(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// Whether the trimmed text is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Clean free-text input before it is kept by the form model.
///
/// Trims, strips angle brackets and caps the result at
/// [`MAX_INPUT_CHARS`] characters.
///
/// # Example
/// ```
/// use form_throttle::sanitize;
///
/// let cleaned = sanitize("  <b>Hello</b> World ");
/// assert_eq!(cleaned, "bHello/b World");
/// ```
pub fn sanitize(input: &str) -> String {
    input
        .trim_matches(is_trimmable)
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_INPUT_CHARS)
        .collect()
}
