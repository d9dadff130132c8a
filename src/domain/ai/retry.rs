use backoff::{future::retry, ExponentialBackoff};
use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// 메시지에 포함되면 일시적 장애로 보는 표식
const TRANSIENT_MARKERS: [&str; 8] = [
    "rate limit",
    "timeout",
    "timed out",
    "connection",
    "429",
    "502",
    "503",
    "504",
];

/// Rate limit, 일시 장애, 타임아웃/연결 오류만 재시도합니다.
fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::OpenAiRateLimitError | AppError::OpenAiTemporaryError => true,
        AppError::OpenAiError(message) => {
            let lowered = message.to_lowercase();
            TRANSIENT_MARKERS.iter().any(|marker| lowered.contains(marker))
        }
        _ => false,
    }
}

/// 지수 백오프 설정 생성
fn create_backoff() -> ExponentialBackoff {
    ExponentialBackoff {
        initial_interval: Duration::from_millis(500),
        max_interval: Duration::from_secs(10),
        max_elapsed_time: Some(Duration::from_secs(30)),
        multiplier: 2.0,
        ..Default::default()
    }
}

/// 일시적 오류는 지수 백오프로 재시도하고, 영구적 오류는 즉시 반환합니다.
pub async fn with_retry<F, Fut, T>(operation: F) -> Result<T, AppError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    retry(create_backoff(), || async {
        operation().await.map_err(|e| {
            if is_retryable_error(&e) {
                tracing::warn!(error = %e, "Retryable LLM error, backing off");
                backoff::Error::transient(e)
            } else {
                tracing::error!(error = %e, "Permanent LLM error, not retrying");
                backoff::Error::permanent(e)
            }
        })
    })
    .await
}
