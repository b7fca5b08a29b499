//! Account services: sign-up, login and user directory lookups.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, USER_SEARCH_LIMIT,
    UserDirectory, UserPersistenceError, UserRepository,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, PresenceProfile, Registration, User, UserAccount,
    UserId,
};

/// Translate identity store failures into domain errors.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("a user with email {email} already exists"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

/// Account service backed by the identity store and a password hasher.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(format!(
                "a user with email {} already exists",
                registration.email()
            )));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.email().clone(),
            registration.name().clone(),
        );
        self.users
            .insert(&UserAccount::new(user.clone(), password_hash))
            .await
            .map_err(map_user_persistence_error)?;
        Ok(user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(account.into_user())
    }
}

#[async_trait]
impl<U, H> UserDirectory for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_persistence_error)?
            .map(UserAccount::into_user)
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }

    async fn search_emails(&self, text: &str) -> Result<Vec<EmailAddress>, Error> {
        self.users
            .search_emails(text, USER_SEARCH_LIMIT)
            .await
            .map_err(map_user_persistence_error)
    }

    async fn presence(&self, emails: &[EmailAddress]) -> Result<Vec<PresenceProfile>, Error> {
        let accounts = self
            .users
            .find_many_by_email(emails)
            .await
            .map_err(map_user_persistence_error)?;
        let by_email: HashMap<&EmailAddress, &User> = accounts
            .iter()
            .map(|account| (account.user().email(), account.user()))
            .collect();

        Ok(emails
            .iter()
            .filter_map(|email| by_email.get(email).map(|user| PresenceProfile::from(*user)))
            .collect())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
