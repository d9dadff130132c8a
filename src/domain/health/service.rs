use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio::time::timeout;

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};
use crate::domain::ai::AiClient;
use crate::domain::emotion::EmotionAnalyzer;

/// 헬스체크 타임아웃 (5초)
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Degraded 상태 임계값 (2초)
const DEGRADED_THRESHOLD: Duration = Duration::from_secs(2);

/// 캐시 유효 시간 (30초)
const CACHE_DURATION: Duration = Duration::from_secs(30);

struct CachedHealth {
    result: CheckResult,
    cached_at: Instant,
}

/// 헬스 체크 서비스
///
/// OpenAI 연결 상태는 30초간 캐싱하고, 감정 모델 상태는 매번 확인합니다.
#[derive(Clone)]
pub struct HealthService {
    ai_client: AiClient,
    analyzer: EmotionAnalyzer,
    started_at: Instant,
    cache: Arc<RwLock<Option<CachedHealth>>>,
}

impl HealthService {
    pub fn new(ai_client: AiClient, analyzer: EmotionAnalyzer) -> Self {
        Self {
            ai_client,
            analyzer,
            started_at: Instant::now(),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn check(&self) -> HealthStatus {
        let openai_api = self.check_openai_cached().await;
        let emotion_model = CheckResult::local(
            self.analyzer.is_model_loaded(),
            "emotion model not loaded; text classification returns Unknown",
        );

        HealthStatus {
            status: determine_health_state(&openai_api, &emotion_model),
            version: env!("CARGO_PKG_VERSION"),
            uptime_secs: self.started_at.elapsed().as_secs(),
            checks: HealthChecks {
                openai_api,
                emotion_model,
            },
        }
    }

    async fn check_openai_cached(&self) -> CheckResult {
        {
            let cached = self.cache.read().await;
            if let Some(ref c) = *cached {
                if c.cached_at.elapsed() < CACHE_DURATION {
                    tracing::debug!(
                        cache_age_secs = c.cached_at.elapsed().as_secs(),
                        "Using cached health check result"
                    );
                    return c.result.clone();
                }
            }
        }

        let result = self.check_openai_fresh().await;

        *self.cache.write().await = Some(CachedHealth {
            result: result.clone(),
            cached_at: Instant::now(),
        });

        result
    }

    async fn check_openai_fresh(&self) -> CheckResult {
        let start = Instant::now();
        let result = timeout(HEALTH_CHECK_TIMEOUT, self.ai_client.check_connectivity()).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(())) => {
                tracing::info!(latency_ms, "OpenAI health check passed");
                CheckResult::remote(latency_ms, Ok(()))
            }
            Ok(Err(e)) => {
                tracing::warn!(latency_ms, error = %e, "OpenAI health check failed");
                CheckResult::remote(latency_ms, Err(e.to_string()))
            }
            Err(_) => {
                tracing::warn!("OpenAI health check timed out");
                CheckResult::remote(latency_ms, Err("Timeout".to_string()))
            }
        }
    }
}

fn determine_health_state(openai: &CheckResult, emotion_model: &CheckResult) -> HealthState {
    if !openai.status {
        return HealthState::Unhealthy;
    }

    let slow = openai
        .latency_ms
        .is_some_and(|latency| latency >= DEGRADED_THRESHOLD.as_millis() as u64);

    if slow || !emotion_model.status {
        return HealthState::Degraded;
    }

    HealthState::Healthy
}
