//! Port for credential hashing.

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing the plaintext failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// One-way password hashing with PHC-encoded output.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plain` with a fresh salt.
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;

    /// Check `plain` against a stored hash. A mismatch is `Ok(false)`.
    fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
