use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::AppState;

/// 전역 Prometheus recorder 설치 (프로세스당 한 번, main에서만 호출)
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Prometheus 텍스트 포맷으로 메트릭을 노출합니다.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics_handle {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}
