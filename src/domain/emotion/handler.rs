use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::error::AppError;
use crate::response::{BaseResponse, ErrorResponse};
use crate::AppState;

use super::dto::{ClassifyRequest, ClassifyResponse};

/// 감정 분류
///
/// 텍스트와 선택한 이모지로 감정과 감성을 분류합니다.
/// 분류 실패는 에러가 아니라 `Unknown` 결과로 반환됩니다.
#[utoipa::path(
    post,
    path = "/api/emotion/classify",
    tag = "Emotion",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "분류 성공", body = BaseResponse<ClassifyResponse>),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    )
)]
pub async fn classify_emotion(
    State(state): State<AppState>,
    request: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<ClassifyResponse>>, AppError> {
    let Json(request) = request?;

    request.validate()?;
    state.secret_key_validator.validate(&request.secret_key)?;

    tracing::info!(
        text_length = request.text.chars().count(),
        emoji_count = request.emojis.len(),
        "Classify request received"
    );

    let result = state
        .analyzer
        .classify(&request.text, &request.emojis)
        .await;

    Ok(Json(BaseResponse::success(ClassifyResponse::from(result))))
}
