//! End-to-end HTTP tests over the process-local adapters.
//!
//! The app is assembled from the real services and in-memory stores. Only
//! the two upstream integrations are replaced by echoing stand-ins.

use std::sync::Arc;

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use coedit::Trace;
use coedit::domain::ports::{
    CollaborationBrokerError, CollaborationGrant, CollaborationSessionBroker, GrammarChecker,
    GrammarCheckerError,
};
use coedit::domain::{
    AccountService, CollaborationService, DEFAULT_LANGUAGE, DocumentRegistry, GrammarCheck,
    GrammarService, TRACE_ID_HEADER,
};
use coedit::inbound::http::collaboration::authorize_collaboration;
use coedit::inbound::http::documents::{
    create_document, delete_document, list_documents, open_document,
};
use coedit::inbound::http::grammar::check_grammar;
use coedit::inbound::http::state::{HttpState, HttpStatePorts};
use coedit::inbound::http::users::{
    current_user, login, logout, register, search_users, user_presence,
};
use coedit::outbound::codes::RandomInviteCodeGenerator;
use coedit::outbound::crypto::Argon2PasswordHasher;
use coedit::outbound::memory::{InMemoryDocumentRepository, InMemoryUserRepository};

struct EchoBroker;

#[async_trait]
impl CollaborationSessionBroker for EchoBroker {
    async fn authorize(&self, grant: &CollaborationGrant) -> Result<Value, CollaborationBrokerError> {
        Ok(json!({
            "token": "granted",
            "userId": grant.principal.id,
            "name": grant.principal.info.name,
            "room": grant.room.as_ref(),
        }))
    }
}

struct EchoChecker;

#[async_trait]
impl GrammarChecker for EchoChecker {
    async fn check(&self, request: &GrammarCheck) -> Result<Value, GrammarCheckerError> {
        Ok(json!({
            "language": { "code": request.language() },
            "matches": [],
            "length": request.text().chars().count(),
        }))
    }
}

fn http_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let documents = Arc::new(InMemoryDocumentRepository::new());
    let registry = Arc::new(DocumentRegistry::new(
        users.clone(),
        documents.clone(),
        Arc::new(RandomInviteCodeGenerator),
        Arc::new(DefaultClock),
    ));
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher),
    ));
    HttpState::new(HttpStatePorts {
        documents: registry.clone(),
        documents_query: registry,
        registration: accounts.clone(),
        login: accounts.clone(),
        directory: accounts,
        collaboration: Arc::new(CollaborationService::new(
            users,
            documents,
            Arc::new(EchoBroker),
        )),
        grammar: Arc::new(GrammarService::new(Arc::new(EchoChecker))),
    })
}

async fn app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let sessions = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(http_state()))
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(sessions)
                    .service(create_document)
                    .service(list_documents)
                    .service(delete_document)
                    .service(open_document)
                    .service(register)
                    .service(login)
                    .service(logout)
                    .service(current_user)
                    .service(search_users)
                    .service(user_presence)
                    .service(authorize_collaboration)
                    .service(check_grammar),
            ),
    )
    .await
}

async fn post<S>(app: &S, uri: &str, body: Value, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::post().uri(uri).set_json(body);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    actix_test::call_service(app, request.to_request()).await
}

async fn get<S>(app: &S, uri: &str) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request()).await
}

async fn register_user<S>(app: &S, email: &str, name: &str)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = post(
        app,
        "/api/v1/register",
        json!({"email": email, "password": "correct horse", "name": name}),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "register {email}");
}

async fn login_as<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = post(
        app,
        "/api/v1/login",
        json!({"email": email, "password": "correct horse"}),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login {email}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn create<S>(app: &S, owner: &str, title: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = post(
        app,
        "/api/v1/documents",
        json!({"owner": owner, "title": title}),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    body["code"].as_str().expect("code").to_owned()
}

#[rstest]
#[actix_web::test]
async fn invite_code_lifecycle_enforces_ownership() {
    let app = app().await;
    register_user(&app, "ada@example.com", "Ada").await;
    register_user(&app, "grace@example.com", "Grace").await;

    let code = create(&app, "ada@example.com", "Minutes").await;
    assert_eq!(code.len(), 8);

    let listed: Value =
        actix_test::read_body_json(get(&app, "/api/v1/documents?owner=ada@example.com").await)
            .await;
    assert_eq!(listed["documents"][0]["code"], code.as_str());
    assert_eq!(listed["documents"][0]["title"], "Minutes");
    assert!(listed["documents"][0]["createdAt"].is_string());

    let opened = get(&app, &format!("/api/v1/documents/{code}")).await;
    assert_eq!(opened.status(), StatusCode::OK);

    let stolen = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/documents")
            .set_json(json!({"owner": "grace@example.com", "code": code}))
            .to_request(),
    )
    .await;
    assert_eq!(stolen.status(), StatusCode::FORBIDDEN);

    let still_listed: Value =
        actix_test::read_body_json(get(&app, "/api/v1/documents?owner=ada@example.com").await)
            .await;
    assert_eq!(still_listed["documents"][0]["code"], code.as_str());
    let still_open = get(&app, &format!("/api/v1/documents/{code}")).await;
    assert_eq!(still_open.status(), StatusCode::OK);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/documents")
            .set_json(json!({"owner": "ada@example.com", "code": code}))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(deleted).await;
    assert_eq!(body, json!({"success": true}));

    let gone = get(&app, &format!("/api/v1/documents/{code}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let repeated = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/documents")
            .set_json(json!({"owner": "ada@example.com", "code": code}))
            .to_request(),
    )
    .await;
    assert_eq!(repeated.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(repeated).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn collaboration_tokens_name_the_signed_in_user() {
    let app = app().await;
    register_user(&app, "ada@example.com", "Ada").await;
    let code = create(&app, "ada@example.com", "Minutes").await;
    let cookie = login_as(&app, "ada@example.com").await;

    let response = post(
        &app,
        "/api/v1/collaboration/auth",
        json!({"room": code}),
        Some(&cookie),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["userId"], "ada@example.com");
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["room"], code.as_str());
}

#[rstest]
#[actix_web::test]
async fn collaboration_rejects_unknown_rooms() {
    let app = app().await;
    register_user(&app, "ada@example.com", "Ada").await;
    let cookie = login_as(&app, "ada@example.com").await;

    let response = post(
        &app,
        "/api/v1/collaboration/auth",
        json!({"room": "zz99zz99"}),
        Some(&cookie),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn directory_lookups_reflect_registered_users() {
    let app = app().await;
    register_user(&app, "ada@example.com", "Ada").await;
    register_user(&app, "grace@example.com", "Grace").await;

    let found: Value =
        actix_test::read_body_json(get(&app, "/api/v1/users/search?text=example").await).await;
    assert_eq!(found, json!(["ada@example.com", "grace@example.com"]));

    let presence: Value = actix_test::read_body_json(
        get(
            &app,
            "/api/v1/users/presence?ids=grace@example.com,nobody@example.com",
        )
        .await,
    )
    .await;
    let profiles = presence.as_array().expect("profile array");
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["id"], "grace@example.com");
    assert_eq!(profiles[0]["info"]["name"], "Grace");
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session() {
    let app = app().await;
    register_user(&app, "ada@example.com", "Ada").await;
    let cookie = login_as(&app, "ada@example.com").await;

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let me: Value = actix_test::read_body_json(me).await;
    assert_eq!(me["email"], "ada@example.com");

    let logout_response = post(&app, "/api/v1/logout", json!({}), Some(&cookie)).await;
    assert_eq!(logout_response.status(), StatusCode::NO_CONTENT);
    let cleared = logout_response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let after = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn grammar_checks_default_the_language() {
    let app = app().await;

    let response = post(&app, "/api/v1/language", json!({"text": "Helo world"}), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["language"]["code"], DEFAULT_LANGUAGE);
    assert_eq!(body["length"], 10);
}

#[rstest]
#[case::missing_owner(json!({"title": "Minutes"}), "owner")]
#[case::missing_title(json!({"owner": "ada@example.com"}), "title")]
#[actix_web::test]
async fn validation_failures_carry_a_trace_id(#[case] body: Value, #[case] field: &str) {
    let app = app().await;

    let response = post(&app, "/api/v1/documents", body, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["traceId"], header.as_str());
    assert_eq!(body["details"]["field"], field);
}
