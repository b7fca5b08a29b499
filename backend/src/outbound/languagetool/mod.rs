//! LanguageTool outbound adapter.
//!
//! Implements the `GrammarChecker` port by form-posting text to a
//! LanguageTool `/v2/check` endpoint.

mod http_checker;

pub use http_checker::LanguageToolChecker;
