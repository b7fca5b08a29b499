//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper yields an `invalid_request` error whose `details` name the
//! offending JSON field and a machine-readable code.

use serde_json::json;

use crate::domain::{
    CredentialsValidationError, DisplayName, DocumentTitle, DocumentValidationError, EmailAddress,
    Error, GrammarValidationError, InviteCode, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    InvalidEmail,
    InvalidCode,
    TooLong,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::BlankField => "blank_field",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidCode => "invalid_code",
            Self::TooLong => "too_long",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn blank_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::BlankField,
        format!("{} must not be empty", field.as_str()),
    )
}

fn too_long_error(field: FieldName, max: usize) -> Error {
    field_error(
        field,
        ErrorCode::TooLong,
        format!("{} must be at most {max} characters", field.as_str()),
    )
}

/// Unwrap an optional request field, treating absent and blank values alike.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    if value.trim().is_empty() {
        return Err(blank_field_error(field));
    }
    Ok(value)
}

pub(crate) fn map_user_validation_error(err: UserValidationError, field: FieldName) -> Error {
    match err {
        UserValidationError::EmptyEmail | UserValidationError::EmptyDisplayName => {
            blank_field_error(field)
        }
        UserValidationError::InvalidEmail => field_error(
            field,
            ErrorCode::InvalidEmail,
            format!("{} must be an email address", field.as_str()),
        ),
        UserValidationError::DisplayNameTooLong { max }
        | UserValidationError::EmailTooLong { max } => too_long_error(field, max),
        UserValidationError::EmptyId | UserValidationError::InvalidId => {
            Error::invalid_request(err.to_string())
        }
    }
}

pub(crate) fn map_document_validation_error(
    err: DocumentValidationError,
    field: FieldName,
) -> Error {
    match err {
        DocumentValidationError::EmptyCode | DocumentValidationError::EmptyTitle => {
            blank_field_error(field)
        }
        DocumentValidationError::InvalidCode => {
            field_error(field, ErrorCode::InvalidCode, err.to_string())
        }
        DocumentValidationError::TitleTooLong { max } => too_long_error(field, max),
    }
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::Email(inner) => {
            map_user_validation_error(inner, FieldName::new("email"))
        }
        CredentialsValidationError::Name(inner) => {
            map_user_validation_error(inner, FieldName::new("name"))
        }
        CredentialsValidationError::EmptyPassword => blank_field_error(FieldName::new("password")),
    }
}

pub(crate) fn map_grammar_validation_error(err: GrammarValidationError) -> Error {
    match err {
        GrammarValidationError::EmptyText => blank_field_error(FieldName::new("text")),
        GrammarValidationError::EmptyLanguage => blank_field_error(FieldName::new("language")),
    }
}

pub(crate) fn parse_email(raw: &str, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(|err| map_user_validation_error(err, field))
}

pub(crate) fn parse_display_name(raw: String, field: FieldName) -> Result<DisplayName, Error> {
    DisplayName::new(raw).map_err(|err| map_user_validation_error(err, field))
}

pub(crate) fn parse_invite_code(raw: &str, field: FieldName) -> Result<InviteCode, Error> {
    InviteCode::new(raw).map_err(|err| map_document_validation_error(err, field))
}

pub(crate) fn parse_title(raw: String, field: FieldName) -> Result<DocumentTitle, Error> {
    DocumentTitle::new(raw).map_err(|err| map_document_validation_error(err, field))
}
