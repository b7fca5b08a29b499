//! PostgreSQL-backed `UserRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{DisplayName, EmailAddress, User, UserAccount, UserId};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed identity store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(message: String) -> UserPersistenceError {
    UserPersistenceError::connection(message)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// `LIKE` pattern matching `fragment` anywhere, with wildcards escaped.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let invalid = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("stored user is invalid: {err}"))
    };
    let user = User::new(
        UserId::from_uuid(row.id),
        EmailAddress::new(&row.email).map_err(invalid)?,
        DisplayName::new(row.display_name).map_err(invalid)?,
    );
    Ok(UserAccount::new(user, row.password_hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let user = account.user();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            display_name: user.name().as_ref(),
            password_hash: account.password_hash(),
        };

        match diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(UserPersistenceError::duplicate_email(user.email().as_ref()))
            }
            Err(err) => Err(diesel_error(err)),
        }
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn search_emails(
        &self,
        fragment: &str,
        limit: usize,
    ) -> Result<Vec<EmailAddress>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let emails: Vec<String> = users::table
            .filter(users::email.like(contains_pattern(fragment)))
            .order(users::email.asc())
            .limit(limit)
            .select(users::email)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        emails
            .into_iter()
            .map(|raw| {
                EmailAddress::new(&raw).map_err(|err| {
                    UserPersistenceError::query(format!("stored email is invalid: {err}"))
                })
            })
            .collect()
    }

    async fn find_many_by_email(
        &self,
        emails: &[EmailAddress],
    ) -> Result<Vec<UserAccount>, UserPersistenceError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, connection_error))?;
        let wanted: Vec<&str> = emails.iter().map(AsRef::as_ref).collect();
        let rows: Vec<UserRow> = users::table
            .filter(users::email.eq_any(wanted))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_account).collect()
    }
}
