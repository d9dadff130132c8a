use std::net::SocketAddr;
use std::sync::Arc;

use mindcare_server::config::AppConfig;
use mindcare_server::domain::ai::OpenAiClient;
use mindcare_server::domain::emotion::{
    load_from_hub, EmotionAnalyzer, EmotionModel, GoogleTranslator, TextEmotionClassifier,
    TranslationFallback, UnavailableEmotionModel,
};
use mindcare_server::global::{init_logging, prometheus};
use mindcare_server::shutdown::shutdown_signal;
use mindcare_server::{create_router, AppState};

/// 감정 모델을 로드합니다. 실패하면 항상 Unknown을 반환하는 모델로 대체합니다.
async fn load_emotion_model(repo_id: String) -> Arc<dyn EmotionModel> {
    let repo = repo_id.clone();
    let loaded = tokio::task::spawn_blocking(move || load_from_hub(&repo)).await;

    match loaded {
        Ok(Ok(model)) => Arc::new(model),
        Ok(Err(e)) => {
            tracing::error!(repo_id = %repo_id, error = %e, "Emotion model unavailable, text path will return Unknown");
            Arc::new(UnavailableEmotionModel::new(e.to_string()))
        }
        Err(e) => {
            tracing::error!(repo_id = %repo_id, error = %e, "Emotion model loader panicked");
            Arc::new(UnavailableEmotionModel::new(e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = init_logging(&config.log_dir);
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    let metrics_handle = prometheus::install_recorder()?;

    let translator = GoogleTranslator::new(&config.translate_endpoint, config.translate_timeout)?;
    let model = load_emotion_model(config.emotion_model_repo.clone()).await;
    let analyzer = EmotionAnalyzer::new(
        TranslationFallback::new(Arc::new(translator), config.translate_timeout),
        TextEmotionClassifier::new(model),
    );

    let ai_client = Arc::new(OpenAiClient::new(&config.openai_api_key));
    let state = AppState::new(ai_client, analyzer, &config.app_secret_key, Some(metrics_handle));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
