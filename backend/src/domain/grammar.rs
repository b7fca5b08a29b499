//! Grammar-check request values.

use std::fmt;

/// Language used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarValidationError {
    EmptyText,
    EmptyLanguage,
}

impl fmt::Display for GrammarValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text must not be empty"),
            Self::EmptyLanguage => write!(f, "language must not be empty"),
        }
    }
}

impl std::error::Error for GrammarValidationError {}

/// Text to check and the language tag it is written in.
///
/// # Examples
/// ```
/// use coedit::domain::GrammarCheck;
///
/// let check = GrammarCheck::try_new("Their is a typo.", None).unwrap();
/// assert_eq!(check.language(), "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarCheck {
    text: String,
    language: String,
}

impl GrammarCheck {
    /// Validate the text and resolve the language, defaulting to `en-US`.
    ///
    /// The text is forwarded untouched so match offsets line up with the
    /// editor's content.
    pub fn try_new(text: &str, language: Option<&str>) -> Result<Self, GrammarValidationError> {
        if text.trim().is_empty() {
            return Err(GrammarValidationError::EmptyText);
        }
        let language = match language {
            None => DEFAULT_LANGUAGE,
            Some(raw) if raw.trim().is_empty() => {
                return Err(GrammarValidationError::EmptyLanguage);
            }
            Some(raw) => raw.trim(),
        };
        Ok(Self {
            text: text.to_owned(),
            language: language.to_owned(),
        })
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn language(&self) -> &str {
        self.language.as_str()
    }
}
