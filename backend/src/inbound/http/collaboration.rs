//! Realtime collaboration handshake.
//!
//! ```text
//! POST /api/v1/collaboration/auth {"room":"ab12cd34"}
//! ```
//!
//! The editor calls this before joining a room. Only logged-in users get a
//! token; the broker's JSON answer is relayed untouched.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_invite_code, require_text};

const ROOM: FieldName = FieldName::new("room");

/// Request body for `POST /api/v1/collaboration/auth`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CollaborationAuthBody {
    /// Invite code of the document being joined.
    #[schema(example = "ab12cd34")]
    pub room: Option<String>,
}

/// Exchange the session for a collaboration token.
#[utoipa::path(
    post,
    path = "/api/v1/collaboration/auth",
    request_body = CollaborationAuthBody,
    responses(
        (status = 200, description = "Broker token", body = Object),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema),
        (status = 502, description = "Broker refused or unreachable", body = ErrorSchema),
        (status = 503, description = "Collaboration not configured", body = ErrorSchema)
    ),
    tags = ["collaboration"],
    operation_id = "authorizeCollaboration"
)]
#[post("/collaboration/auth")]
pub async fn authorize_collaboration(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CollaborationAuthBody>,
) -> ApiResult<web::Json<Value>> {
    let user_id = session.require_user_id()?;
    let room = require_text(payload.into_inner().room, ROOM)?;
    let room = parse_invite_code(&room, ROOM)?;

    let token = state
        .within(state.collaboration.authorize(&user_id, &room))
        .await?;
    Ok(web::Json(token))
}
