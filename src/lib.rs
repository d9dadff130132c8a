pub mod config;
pub mod domain;
pub mod error;
pub mod global;
pub mod response;
pub mod shutdown;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use domain::ai::{AiClient, AiClientTrait, ChatService};
pub use domain::emotion::{
    ClassifierError, EmotionAnalyzer, EmotionModel, TextEmotionClassifier, TranslationError,
    TranslationFallback, Translator,
};
use domain::health::HealthService;
use global::SecretKeyValidator;

/// 전체 요청 처리 제한 시간 (LLM 재시도 포함)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// 테스트 라우터의 번역 타임아웃
const TEST_TRANSLATION_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::emotion::handler::classify_emotion,
        domain::ai::handler::chat,
        domain::ai::handler::insight,
        domain::health::handler::health_check,
    ),
    components(
        schemas(
            domain::emotion::EmotionLabel,
            domain::emotion::SentimentLabel,
            domain::emotion::dto::ClassifyRequest,
            domain::emotion::dto::ClassifyResponse,
            domain::ai::dto::ChatRequest,
            domain::ai::dto::ChatResponse,
            domain::ai::dto::InsightRequest,
            domain::ai::dto::InsightResponse,
            domain::ai::dto::CheckinRecord,
            domain::ai::dto::UserProfile,
            domain::ai::pattern::MoodPattern,
            domain::health::dto::HealthStatus,
            response::ErrorResponse,
        )
    ),
    tags(
        (name = "Emotion", description = "감정/감성 분류 API"),
        (name = "AI", description = "상담 채팅 및 감정 인사이트 API"),
        (name = "Health", description = "헬스체크 API")
    )
)]
pub struct ApiDoc;

/// 핸들러 공유 상태
#[derive(Clone)]
pub struct AppState {
    pub analyzer: EmotionAnalyzer,
    pub chat_service: ChatService,
    pub health_service: HealthService,
    pub secret_key_validator: SecretKeyValidator,
    /// 테스트 라우터에서는 전역 recorder를 설치하지 않으므로 None
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        ai_client: AiClient,
        analyzer: EmotionAnalyzer,
        secret_key: &str,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            chat_service: ChatService::new(Arc::clone(&ai_client), analyzer.clone()),
            health_service: HealthService::new(ai_client, analyzer.clone()),
            analyzer,
            secret_key_validator: SecretKeyValidator::new(secret_key),
            metrics_handle,
        }
    }
}

fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(domain::ai::handler::chat))
        .route("/api/insight", post(domain::ai::handler::insight))
}

fn build_router(state: AppState, ai_routes: Router<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::health_check))
        .route("/metrics", get(global::prometheus::metrics_handler))
        .route(
            "/api/emotion/classify",
            post(domain::emotion::classify_emotion),
        )
        .merge(ai_routes)
        .layer(middleware::from_fn(global::request_tracing))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 운영용 라우터 (LLM 엔드포인트에 Rate Limit 적용)
pub fn create_router(state: AppState) -> Router {
    build_router(state, global::with_rate_limit(ai_routes()))
}

/// Mock 의존성으로 라우터 생성 (테스트용, Rate Limit 미적용)
pub fn create_test_router_with_mocks<C, T, M>(
    secret_key: &str,
    ai_client: C,
    translator: T,
    model: M,
) -> Router
where
    C: AiClientTrait + 'static,
    T: Translator + 'static,
    M: EmotionModel + 'static,
{
    let analyzer = EmotionAnalyzer::new(
        TranslationFallback::new(Arc::new(translator), TEST_TRANSLATION_TIMEOUT),
        TextEmotionClassifier::new(Arc::new(model)),
    );
    let state = AppState::new(Arc::new(ai_client), analyzer, secret_key, None);
    build_router(state, ai_routes())
}
