//! Diesel table definitions for the PostgreSQL schema.
//!
//! Keep these in step with `backend/migrations`; `diesel print-schema` against
//! a migrated database regenerates them.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login email.
        email -> Varchar,
        /// Name shown to collaborators (max 64 characters).
        display_name -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Documents addressed by invite code.
    documents (id) {
        id -> Uuid,
        /// Unique eight-character invite code.
        code -> Varchar,
        title -> Varchar,
        /// Owning user; foreign key to `users.id`.
        owner_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(documents -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(documents, users);
