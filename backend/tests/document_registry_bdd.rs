//! Behaviour tests for the invite-code document workflow.
//!
//! The registry runs against the process-local stores with a scripted code
//! source so collisions can be provoked deterministically.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

use std::cell::RefCell;
use std::sync::Arc;

use coedit::domain::ports::{
    CreateDocumentRequest, DeleteDocumentRequest, DocumentCommand, DocumentQuery,
    ScriptedInviteCodeGenerator, UserRepository,
};
use coedit::domain::{
    DisplayName, DocumentRegistry, DocumentSummary, DocumentTitle, EmailAddress, Error, ErrorCode,
    InviteCode, User, UserAccount, UserId,
};
use coedit::outbound::memory::{InMemoryDocumentRepository, InMemoryUserRepository};
use mockable::DefaultClock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Registry =
    DocumentRegistry<InMemoryUserRepository, InMemoryDocumentRepository, ScriptedInviteCodeGenerator>;

struct RegistryWorld {
    runtime: Runtime,
    users: Arc<InMemoryUserRepository>,
    documents: Arc<InMemoryDocumentRepository>,
    registry: RefCell<Option<Registry>>,
    created: RefCell<Option<Result<InviteCode, Error>>>,
    deleted: RefCell<Option<Result<(), Error>>>,
    listing: RefCell<Option<Vec<DocumentSummary>>>,
}

impl RegistryWorld {
    fn new() -> Self {
        Self {
            runtime: Runtime::new().expect("tokio runtime should initialize"),
            users: Arc::new(InMemoryUserRepository::new()),
            documents: Arc::new(InMemoryDocumentRepository::new()),
            registry: RefCell::new(None),
            created: RefCell::new(None),
            deleted: RefCell::new(None),
            listing: RefCell::new(None),
        }
    }

    fn with_registry<T>(&self, f: impl FnOnce(&Registry) -> T) -> T {
        let registry = self.registry.borrow();
        f(registry.as_ref().expect("registry should be configured"))
    }

    fn create(&self, owner: &str, title: &str) -> Result<InviteCode, Error> {
        let request = CreateDocumentRequest {
            owner: email(owner),
            title: DocumentTitle::new(title).expect("valid title"),
        };
        self.with_registry(|registry| {
            self.runtime
                .block_on(registry.create(request))
                .map(|response| response.code)
        })
    }

    fn list(&self, owner: &str) -> Vec<DocumentSummary> {
        let owner = email(owner);
        self.with_registry(|registry| {
            self.runtime
                .block_on(registry.list(&owner))
                .expect("listing should succeed")
        })
    }

    fn open(&self, code: &str) -> Result<DocumentSummary, Error> {
        let code = invite_code(code);
        self.with_registry(|registry| self.runtime.block_on(registry.open(&code)))
    }

    fn last_error(&self) -> ErrorCode {
        if let Some(Err(error)) = self.created.borrow().as_ref() {
            return error.code();
        }
        match self.deleted.borrow().as_ref() {
            Some(Err(error)) => error.code(),
            other => panic!("expected a failed operation, got {other:?}"),
        }
    }
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

fn invite_code(raw: &str) -> InviteCode {
    InviteCode::new(raw).expect("valid invite code")
}

#[fixture]
fn world() -> RegistryWorld {
    RegistryWorld::new()
}

#[given("a registered user {address}")]
fn a_registered_user(world: &RegistryWorld, address: String) {
    let local = address.split('@').next().unwrap_or("someone").to_owned();
    let user = User::new(
        UserId::random(),
        email(&address),
        DisplayName::new(local).expect("valid name"),
    );
    world
        .runtime
        .block_on(world.users.insert(&UserAccount::new(user, "$argon2id$stub")))
        .expect("user insert should succeed");
}

#[given("invite codes are minted from the script {code}")]
fn invite_codes_are_scripted(world: &RegistryWorld, code: String) {
    let registry = DocumentRegistry::new(
        world.users.clone(),
        world.documents.clone(),
        Arc::new(ScriptedInviteCodeGenerator::new(invite_code(&code), [])),
        Arc::new(DefaultClock),
    );
    *world.registry.borrow_mut() = Some(registry);
}

#[given("{owner} already owns a document")]
fn owner_already_owns_a_document(world: &RegistryWorld, owner: String) {
    world
        .create(&owner, "Draft")
        .expect("seed document should be created");
}

#[when("{owner} creates a document titled {title}")]
fn owner_creates_a_document(world: &RegistryWorld, owner: String, title: String) {
    let outcome = world.create(&owner, &title);
    *world.created.borrow_mut() = Some(outcome);
}

#[when("{owner} deletes {code}")]
fn owner_deletes(world: &RegistryWorld, owner: String, code: String) {
    let request = DeleteDocumentRequest {
        owner: email(&owner),
        code: invite_code(&code),
    };
    let outcome = world.with_registry(|registry| world.runtime.block_on(registry.delete(request)));
    *world.deleted.borrow_mut() = Some(outcome);
}

#[when("{owner} lists their documents")]
fn owner_lists_documents(world: &RegistryWorld, owner: String) {
    let listing = world.list(&owner);
    *world.listing.borrow_mut() = Some(listing);
}

#[then("the document is created with code {code}")]
fn the_document_is_created_with_code(world: &RegistryWorld, code: String) {
    let created = world.created.borrow();
    let created = created
        .as_ref()
        .expect("create should have run")
        .as_ref()
        .expect("create should succeed");
    assert_eq!(created.as_ref(), code);
}

#[then("opening {code} shows the title {title}")]
fn opening_shows_the_title(world: &RegistryWorld, code: String, title: String) {
    let summary = world.open(&code).expect("open should succeed");
    assert_eq!(summary.title.as_ref(), title);
    assert_eq!(summary.code.as_ref(), code);
}

#[then("opening {code} reports not found")]
fn opening_reports_not_found(world: &RegistryWorld, code: String) {
    let error = world.open(&code).expect_err("open should fail");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[then("the listing for {owner} has {count} entries")]
fn the_listing_has_entries(world: &RegistryWorld, owner: String, count: usize) {
    assert_eq!(world.list(&owner).len(), count);
}

#[then("the registry reports a conflict")]
fn the_registry_reports_a_conflict(world: &RegistryWorld) {
    assert_eq!(world.last_error(), ErrorCode::Conflict);
}

#[then("the registry reports forbidden")]
fn the_registry_reports_forbidden(world: &RegistryWorld) {
    assert_eq!(world.last_error(), ErrorCode::Forbidden);
}

#[then("the registry reports not found")]
fn the_registry_reports_not_found(world: &RegistryWorld) {
    assert_eq!(world.last_error(), ErrorCode::NotFound);
}

#[then("the deletion succeeds")]
fn the_deletion_succeeds(world: &RegistryWorld) {
    let deleted = world.deleted.borrow();
    assert!(matches!(deleted.as_ref(), Some(Ok(()))));
}

#[then("the listing is empty")]
fn the_listing_is_empty(world: &RegistryWorld) {
    let listing = world.listing.borrow();
    assert!(listing.as_ref().expect("listing should have run").is_empty());
}

#[scenario(
    path = "tests/features/document_registry.feature",
    name = "Owner creates a document and a guest opens it by code"
)]
fn owner_creates_and_guest_opens(world: RegistryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/document_registry.feature",
    name = "Exhausted invite codes are reported as a conflict"
)]
fn exhausted_codes_conflict(world: RegistryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/document_registry.feature",
    name = "Only the owner may delete a document"
)]
fn only_owner_deletes(world: RegistryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/document_registry.feature",
    name = "Deleted documents can no longer be opened"
)]
fn deleted_documents_cannot_be_opened(world: RegistryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/document_registry.feature",
    name = "Deleting a document twice reports not found"
)]
fn repeated_deletion_is_not_found(world: RegistryWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/document_registry.feature",
    name = "Unknown owners list no documents"
)]
fn unknown_owners_list_nothing(world: RegistryWorld) {
    drop(world);
}
