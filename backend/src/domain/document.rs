//! Document data model: invite codes, titles and ownership.
//!
//! A document is live from creation until its owner deletes it. The invite
//! code is the public handle used to share and open a document; the UUID is
//! internal only.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Number of characters in an invite code.
pub const INVITE_CODE_LEN: usize = 8;
/// Characters an invite code may contain.
pub const INVITE_CODE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
/// Maximum allowed length for a title, in characters.
pub const DOCUMENT_TITLE_MAX: usize = 200;

/// Validation errors returned by the document value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    EmptyCode,
    InvalidCode,
    EmptyTitle,
    TitleTooLong { max: usize },
}

impl fmt::Display for DocumentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCode => write!(f, "code must not be empty"),
            Self::InvalidCode => write!(
                f,
                "code must be {INVITE_CODE_LEN} lowercase letters or digits"
            ),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
        }
    }
}

impl std::error::Error for DocumentValidationError {}

/// Internal document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Shareable invite code.
///
/// # Examples
/// ```
/// use coedit::domain::InviteCode;
///
/// assert!(InviteCode::new("ab12cd34").is_ok());
/// assert!(InviteCode::new("AB12CD34").is_err());
/// assert!(InviteCode::new("ab12cd3").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InviteCode(String);

impl InviteCode {
    /// Validate and construct an [`InviteCode`].
    ///
    /// Surrounding whitespace is ignored; case is significant.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DocumentValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DocumentValidationError::EmptyCode);
        }
        let well_formed = trimmed.chars().count() == INVITE_CODE_LEN
            && trimmed
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !well_formed {
            return Err(DocumentValidationError::InvalidCode);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Draw a code uniformly from [`INVITE_CODE_ALPHABET`] using `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let alphabet = INVITE_CODE_ALPHABET.as_bytes();
        let code = (0..INVITE_CODE_LEN)
            .filter_map(|_| alphabet.choose(rng).copied().map(char::from))
            .collect();
        Self(code)
    }
}

impl AsRef<str> for InviteCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<InviteCode> for String {
    fn from(value: InviteCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for InviteCode {
    type Error = DocumentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-text document title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentTitle(String);

impl DocumentTitle {
    /// Validate a title. The text is stored as given; blank titles are rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, DocumentValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DocumentValidationError::EmptyTitle);
        }
        if raw.chars().count() > DOCUMENT_TITLE_MAX {
            return Err(DocumentValidationError::TitleTooLong {
                max: DOCUMENT_TITLE_MAX,
            });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for DocumentTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DocumentTitle> for String {
    fn from(value: DocumentTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for DocumentTitle {
    type Error = DocumentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A live document.
///
/// ## Invariants
/// - Exactly one owner.
/// - `code` is unique across all documents; storage enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    code: InviteCode,
    title: DocumentTitle,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        id: DocumentId,
        code: InviteCode,
        title: DocumentTitle,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            title,
            owner_id,
            created_at,
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn code(&self) -> &InviteCode {
        &self.code
    }

    pub fn title(&self) -> &DocumentTitle {
        &self.title
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Identity comparison against a resolved user.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner_id.as_uuid() == user_id.as_uuid()
    }

    /// Client-facing projection without internal identifiers.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            code: self.code.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
        }
    }
}

/// Document entry returned by listing and open operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub code: InviteCode,
    pub title: DocumentTitle,
    pub created_at: DateTime<Utc>,
}

/// Newest first; ties ordered by code so listings are stable.
pub fn sort_newest_first(documents: &mut [DocumentSummary]) {
    documents.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.code.cmp(&b.code))
    });
}
