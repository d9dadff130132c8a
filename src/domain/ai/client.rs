use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

use crate::error::AppError;

/// 상담 응답에 사용하는 모델
const CHAT_MODEL: &str = "gpt-4o-mini";

/// 상담 응답 한 건의 최대 대기 시간
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(25);

/// API 에러 본문의 `type`과 메시지로 분류
fn classify_api_error(err_type: &str, message: &str) -> AppError {
    let lowered = message.to_lowercase();

    match err_type {
        "invalid_request_error" if lowered.contains("api key") => AppError::OpenAiAuthError,
        "rate_limit_error" | "insufficient_quota" => AppError::OpenAiRateLimitError,
        "server_error" => AppError::OpenAiTemporaryError,
        _ if lowered.contains("rate limit") => AppError::OpenAiRateLimitError,
        _ if lowered.contains("server") => AppError::OpenAiTemporaryError,
        _ => AppError::OpenAiError(message.to_string()),
    }
}

/// HTTP 상태 코드만으로 판단 가능한 경우
fn classify_http_status(status: u16) -> Option<AppError> {
    match status {
        401 => Some(AppError::OpenAiAuthError),
        429 => Some(AppError::OpenAiRateLimitError),
        500..=599 => Some(AppError::OpenAiTemporaryError),
        _ => None,
    }
}

/// async-openai 에러를 재시도 정책이 구분할 수 있는 AppError로 변환
fn classify_openai_error(error: OpenAIError) -> AppError {
    match error {
        OpenAIError::ApiError(api_err) => {
            classify_api_error(api_err.r#type.as_deref().unwrap_or_default(), &api_err.message)
        }
        OpenAIError::Reqwest(req_err) if req_err.is_timeout() || req_err.is_connect() => {
            AppError::OpenAiTemporaryError
        }
        OpenAIError::Reqwest(req_err) => req_err
            .status()
            .and_then(|status| classify_http_status(status.as_u16()))
            .unwrap_or_else(|| AppError::OpenAiError(req_err.to_string())),
        other => AppError::OpenAiError(other.to_string()),
    }
}

/// 상담 응답과 인사이트 문구를 생성하는 LLM 경계
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// 메시지 목록(system, 이력, user)으로 응답 한 건을 생성합니다.
    async fn complete(&self, messages: Vec<ChatCompletionRequestMessage>)
        -> Result<String, AppError>;

    /// 헬스체크용 연결 확인
    async fn check_connectivity(&self) -> Result<(), AppError>;
}

pub type AiClient = Arc<dyn AiClientTrait>;

/// async-openai 기반 구현 (gpt-4o-mini)
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    pub fn new(api_key: &str) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
        }
    }
}

#[async_trait::async_trait]
impl AiClientTrait for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(CHAT_MODEL)
            .messages(messages)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let response = tokio::time::timeout(COMPLETION_TIMEOUT, self.client.chat().create(request))
            .await
            .map_err(|_| AppError::OpenAiTemporaryError)?
            .map_err(classify_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::OpenAiError("empty completion".to_string()))
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        self.client
            .models()
            .list()
            .await
            .map_err(classify_openai_error)?;
        Ok(())
    }
}

pub(crate) fn build_system_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestSystemMessageArgs::default()
        .content(content)
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?
        .into())
}

pub(crate) fn build_user_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestUserMessageArgs::default()
        .content(content)
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?
        .into())
}

pub(crate) fn build_assistant_message(
    content: &str,
) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestAssistantMessageArgs::default()
        .content(content)
        .build()
        .map_err(|e| AppError::Internal(e.to_string()))?
        .into())
}
