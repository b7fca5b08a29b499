//! Grammar-check proxy.
//!
//! ```text
//! POST /api/v1/language {"text":"Their is a typo.","language":"en-GB"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::GrammarCheck;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_grammar_validation_error, missing_field_error};

/// Request body for `POST /api/v1/language`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GrammarCheckBody {
    #[schema(example = "Their is a typo.")]
    pub text: Option<String>,
    /// Language tag; `en-US` when omitted.
    #[schema(example = "en-US")]
    pub language: Option<String>,
}

/// Check a passage of text and relay the grammar service's matches.
#[utoipa::path(
    post,
    path = "/api/v1/language",
    request_body = GrammarCheckBody,
    responses(
        (status = 200, description = "Grammar service response", body = Object),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 502, description = "Grammar service failed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["language"],
    operation_id = "checkGrammar",
    security([])
)]
#[post("/language")]
pub async fn check_grammar(
    state: web::Data<HttpState>,
    payload: web::Json<GrammarCheckBody>,
) -> ApiResult<web::Json<Value>> {
    let GrammarCheckBody { text, language } = payload.into_inner();
    let text = text.ok_or_else(|| missing_field_error(FieldName::new("text")))?;
    let request =
        GrammarCheck::try_new(&text, language.as_deref()).map_err(map_grammar_validation_error)?;

    let answer = state.within(state.grammar.check(&request)).await?;
    Ok(web::Json(answer))
}
