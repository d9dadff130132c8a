//! Rate Limiting 모듈
//!
//! LLM을 호출하는 엔드포인트에 IP 기반 요청 제한을 적용합니다.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::response::ErrorResponse;

/// quota 1개가 보충되는 간격 (초당 10회)
const REPLENISH_INTERVAL_MS: u64 = 100;
/// 버스트 허용량
const BURST_SIZE: u32 = 50;

/// 라우터에 IP 기반 Rate Limiter를 적용합니다 (X-Forwarded-For 지원).
///
/// 서버는 `into_make_service_with_connect_info::<SocketAddr>()`로 실행해야 합니다.
pub fn with_rate_limit<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let Some(config) = GovernorConfigBuilder::default()
        .per_millisecond(REPLENISH_INTERVAL_MS)
        .burst_size(BURST_SIZE)
        .key_extractor(SmartIpKeyExtractor)
        .error_handler(|err| RateLimitResponse::from(err).into_response())
        .finish()
    else {
        tracing::error!("Invalid rate limiter configuration, serving without rate limit");
        return router;
    };

    router.layer(GovernorLayer {
        config: Arc::new(config),
    })
}

/// Rate Limit 초과 시 응답
#[derive(Debug)]
struct RateLimitResponse {
    retry_after: Option<u64>,
}

impl From<GovernorError> for RateLimitResponse {
    fn from(err: GovernorError) -> Self {
        match err {
            GovernorError::TooManyRequests { wait_time, .. } => Self {
                retry_after: Some(wait_time),
            },
            _ => Self { retry_after: None },
        }
    }
}

impl IntoResponse for RateLimitResponse {
    fn into_response(self) -> Response {
        tracing::warn!(retry_after_secs = ?self.retry_after, "Rate limit exceeded");

        let body = ErrorResponse::new(
            "COMMON429",
            "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.",
        );
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

        if let Some(retry_after) = self.retry_after {
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_response_should_include_retry_after_header() {
        let response = RateLimitResponse {
            retry_after: Some(30),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "30");
    }

    #[test]
    fn rate_limit_response_without_wait_time_should_omit_header() {
        let response = RateLimitResponse { retry_after: None }.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().get("Retry-After").is_none());
    }

    #[test]
    fn too_many_requests_error_should_carry_wait_time() {
        let response = RateLimitResponse::from(GovernorError::TooManyRequests {
            wait_time: 5,
            headers: None,
        });

        assert_eq!(response.retry_after, Some(5));
    }
}
