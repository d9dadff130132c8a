use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::error::AppError;
use crate::response::{BaseResponse, ErrorResponse};
use crate::AppState;

use super::dto::{ChatRequest, ChatResponse, InsightRequest, InsightResponse};

/// 상담 채팅
///
/// 메시지의 감정을 분류하고, 그 결과와 프로필로 개인화된 상담 응답을 생성합니다.
/// 응답에 포함된 체크인 기록은 호출자가 저장합니다.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "AI",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "응답 생성 성공", body = BaseResponse<ChatResponse>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 429, description = "요청 한도 초과", body = ErrorResponse),
        (status = 500, description = "서버 에러", body = ErrorResponse),
        (status = 503, description = "OpenAI 일시 장애", body = ErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<AppState>,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ChatResponse>>, AppError> {
    let Json(request) = request?;

    request.validate()?;
    state.secret_key_validator.validate(&request.secret_key)?;

    tracing::info!(
        text_length = request.text.chars().count(),
        emoji_count = request.emojis.len(),
        intensity = request.intensity,
        "Chat request received"
    );

    let response = state.chat_service.chat(&request).await?;

    tracing::info!(reply_length = response.reply.len(), "Chat reply generated");

    Ok(Json(BaseResponse::success(response)))
}

/// 감정 인사이트
///
/// 최근 체크인 기록으로 감정 패턴, 요약, 응원 메시지를 생성합니다.
#[utoipa::path(
    post,
    path = "/api/insight",
    tag = "AI",
    request_body = InsightRequest,
    responses(
        (status = 200, description = "인사이트 생성 성공", body = BaseResponse<InsightResponse>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    )
)]
pub async fn insight(
    State(state): State<AppState>,
    request: Result<Json<InsightRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<InsightResponse>>, AppError> {
    let Json(request) = request?;

    request.validate()?;
    state.secret_key_validator.validate(&request.secret_key)?;

    tracing::info!(checkin_count = request.checkins.len(), "Insight request received");

    let response = state.chat_service.insight(&request.checkins).await;

    Ok(Json(BaseResponse::success(response)))
}
