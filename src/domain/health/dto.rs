use serde::Serialize;
use utoipa::ToSchema;

/// `GET /health` 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    pub uptime_secs: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    /// OpenAI 응답 지연 또는 감정 모델 미로딩 (텍스트 분류가 Unknown으로 수렴)
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub openai_api: CheckResult,
    pub emotion_model: CheckResult,
}

/// 의존성 하나의 점검 결과
///
/// 원격 점검은 지연 시간을 포함하고, 로컬 점검(모델 로딩 여부)은 생략합니다.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn remote(latency_ms: u64, outcome: Result<(), String>) -> Self {
        Self {
            status: outcome.is_ok(),
            latency_ms: Some(latency_ms),
            error: outcome.err(),
        }
    }

    pub fn local(ok: bool, error: &str) -> Self {
        Self {
            status: ok,
            latency_ms: None,
            error: (!ok).then(|| error.to_owned()),
        }
    }
}
