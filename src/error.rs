use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("유효하지 않은 비밀 키입니다.")]
    InvalidSecretKey,

    #[error("{0}")]
    ValidationError(String),

    #[error("잘못된 요청 형식입니다: {0}")]
    JsonParseFailed(String),

    #[error("OpenAI API 인증에 실패했습니다.")]
    OpenAiAuthError,

    #[error("OpenAI API 요청 한도를 초과했습니다.")]
    OpenAiRateLimitError,

    #[error("OpenAI API가 일시적으로 응답하지 않습니다.")]
    OpenAiTemporaryError,

    #[error("OpenAI API 에러: {0}")]
    OpenAiError(String),

    #[error("서버 내부 에러: {0}")]
    Internal(String),
}

impl AppError {
    /// 에러 코드 반환
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidSecretKey => "AI_001",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::OpenAiAuthError => "AI_003",
            AppError::OpenAiRateLimitError => "AI_004",
            AppError::OpenAiTemporaryError => "AI_005",
            AppError::OpenAiError(_) => "AI_006",
            AppError::Internal(_) => "COMMON500",
        }
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidSecretKey => StatusCode::UNAUTHORIZED,
            AppError::ValidationError(_) | AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::OpenAiRateLimitError => StatusCode::TOO_MANY_REQUESTS,
            AppError::OpenAiTemporaryError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::OpenAiAuthError | AppError::OpenAiError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 클라이언트에 노출할 메시지
    ///
    /// 내부 에러의 상세 내용은 로그에만 남깁니다.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) | AppError::OpenAiError(_) => {
                "서버 에러, 관리자에게 문의 바랍니다.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "Request failed");
        } else {
            tracing::warn!(code, error = %self, "Request rejected");
        }

        let body = ErrorResponse::new(code, self.client_message());
        (status, Json(body)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

/// 입력 검증 실패를 AppError로 변환 (첫 번째 메시지 사용)
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "잘못된 요청입니다.".to_string());
        AppError::ValidationError(message)
    }
}
