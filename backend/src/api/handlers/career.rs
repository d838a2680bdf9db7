//! Career tool handlers backed by the completion service.
//!
//! These endpoints answer 200 even when the completion backend is down;
//! the body is then an empty list or a fallback reply.

use axum::{extract::State, routing::post, Json, Router};
use utoipa::OpenApi;

use crate::api::SharedState;
use crate::error::Result;
use crate::models::career::{
    ChatRole, ChatTurn, ConversationRequest, ReplyResponse, ResumeRefinement, ResumeRequest,
    TranslateRequest, TranslationResult,
};

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/translate", post(translate_skills))
        .route("/resume", post(refine_resume))
        .route("/interview", post(interview_turn))
        .route("/assistant", post(assistant_turn))
}

/// Map a military specialty to civilian career paths
#[utoipa::path(
    post,
    path = "/translate",
    context_path = "/api/career",
    tag = "career",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "Up to three career paths, empty when unavailable", body = [TranslationResult]),
        (status = 400, description = "mosCode missing", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn translate_skills(
    State(state): State<SharedState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<Vec<TranslationResult>>> {
    let results = state
        .career
        .translate_skills(&req.mos_code, &req.description)
        .await?;
    Ok(Json(results))
}

/// Rewrite a resume bullet in civilian terms
#[utoipa::path(
    post,
    path = "/resume",
    context_path = "/api/career",
    tag = "career",
    request_body = ResumeRequest,
    responses(
        (status = 200, description = "Civilian versions, empty when unavailable", body = [ResumeRefinement]),
        (status = 400, description = "bullet missing", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn refine_resume(
    State(state): State<SharedState>,
    Json(req): Json<ResumeRequest>,
) -> Result<Json<Vec<ResumeRefinement>>> {
    let refinements = state.career.refine_bullet(&req.bullet).await?;
    Ok(Json(refinements))
}

/// Interview coach: feedback and the next question
#[utoipa::path(
    post,
    path = "/interview",
    context_path = "/api/career",
    tag = "career",
    request_body = ConversationRequest,
    responses(
        (status = 200, description = "Coach reply", body = ReplyResponse),
        (status = 400, description = "No user answer in history", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn interview_turn(
    State(state): State<SharedState>,
    Json(req): Json<ConversationRequest>,
) -> Result<Json<ReplyResponse>> {
    let reply = state.career.interview_reply(&req.history).await?;
    Ok(Json(ReplyResponse { reply }))
}

/// General assistant conversation turn
#[utoipa::path(
    post,
    path = "/assistant",
    context_path = "/api/career",
    tag = "career",
    request_body = ConversationRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ReplyResponse),
        (status = 400, description = "Empty history", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn assistant_turn(
    State(state): State<SharedState>,
    Json(req): Json<ConversationRequest>,
) -> Result<Json<ReplyResponse>> {
    let reply = state.career.assistant_reply(req.history).await?;
    Ok(Json(ReplyResponse { reply }))
}

#[derive(OpenApi)]
#[openapi(
    paths(translate_skills, refine_resume, interview_turn, assistant_turn),
    components(schemas(
        TranslateRequest,
        TranslationResult,
        ResumeRequest,
        ResumeRefinement,
        ConversationRequest,
        ChatTurn,
        ChatRole,
        ReplyResponse,
    ))
)]
pub struct CareerApiDoc;
