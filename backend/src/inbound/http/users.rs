//! Account HTTP handlers.
//!
//! ```text
//! POST /api/v1/register {"email":"ada@example.com","password":"pw","name":"Ada"}
//! POST /api/v1/login    {"email":"ada@example.com","password":"pw"}
//! POST /api/v1/logout
//! GET  /api/v1/users/me
//! GET  /api/v1/users/search?text=example
//! GET  /api/v1/users/presence?ids=ada@example.com,bob@example.com
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{EmailAddress, Error, LoginCredentials, PresenceProfile, Registration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PresenceProfileSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_credentials_error, missing_field_error, parse_email,
};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const NAME: FieldName = FieldName::new("name");
const IDS: FieldName = FieldName::new("ids");

/// Sign-up request body for `POST /api/v1/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterBody {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginBody {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Confirmation returned by registration and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponseBody {
    #[schema(example = "Login successful")]
    pub message: String,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Query string for `GET /api/v1/users/search`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in email addresses. Absent means "match all".
    pub text: Option<String>,
}

/// Query string for `GET /api/v1/users/presence`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PresenceQuery {
    /// Comma-separated email addresses.
    pub ids: Option<String>,
}

fn field(value: Option<String>, name: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(name))
}

/// Parse the comma-separated `ids` parameter, ignoring empty segments.
fn presence_ids(raw: Option<String>) -> Result<Vec<EmailAddress>, Error> {
    let raw = raw.ok_or_else(|| missing_field_error(IDS))?;
    let ids = raw
        .split(',')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| parse_email(segment, IDS))
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        return Err(missing_field_error(IDS));
    }
    Ok(ids)
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterBody,
    responses(
        (status = 200, description = "User registered", body = AccountResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<web::Json<AccountResponseBody>> {
    let RegisterBody {
        email,
        password,
        name,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(
        &field(email, EMAIL)?,
        &field(password, PASSWORD)?,
        &field(name, NAME)?,
    )
    .map_err(map_credentials_error)?;

    let user = state.within(state.registration.register(&registration)).await?;
    Ok(web::Json(AccountResponseBody {
        message: "User registered".to_owned(),
        user,
    }))
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = AccountResponseBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 404, description = "Unknown email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<AccountResponseBody>> {
    let LoginBody { email, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&field(email, EMAIL)?, &field(password, PASSWORD)?)
            .map_err(map_credentials_error)?;

    let user = state.within(state.login.authenticate(&credentials)).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(AccountResponseBody {
        message: "Login successful".to_owned(),
        user,
    }))
}

/// Forget the session user.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Profile of the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.within(state.directory.current_user(&user_id)).await?;
    Ok(web::Json(user))
}

/// Emails matching a fragment, for the share dialog's autocomplete.
#[utoipa::path(
    get,
    path = "/api/v1/users/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching emails, ascending", body = [String]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers",
    security([])
)]
#[get("/users/search")]
pub async fn search_users(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<EmailAddress>>> {
    let text = query.into_inner().text.unwrap_or_default();
    let emails = state.within(state.directory.search_emails(&text)).await?;
    Ok(web::Json(emails))
}

/// Presence profiles for the collaborators shown in an editor.
#[utoipa::path(
    get,
    path = "/api/v1/users/presence",
    params(PresenceQuery),
    responses(
        (status = 200, description = "Known users, in request order", body = [PresenceProfileSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "userPresence",
    security([])
)]
#[get("/users/presence")]
pub async fn user_presence(
    state: web::Data<HttpState>,
    query: web::Query<PresenceQuery>,
) -> ApiResult<web::Json<Vec<PresenceProfile>>> {
    let ids = presence_ids(query.into_inner().ids)?;
    let profiles = state.within(state.directory.presence(&ids)).await?;
    Ok(web::Json(profiles))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
