use std::env;
use std::time::Duration;

/// 기본 감정 분류 모델 (7개 클래스, DistilRoBERTa)
pub const DEFAULT_EMOTION_MODEL_REPO: &str = "j-hartmann/emotion-english-distilroberta-base";

/// 기본 번역 엔드포인트
pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub openai_api_key: String,
    pub app_secret_key: String,
    pub emotion_model_repo: String,
    pub translate_endpoint: String,
    pub translate_timeout: Duration,
    pub log_dir: String,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let openai_api_key = lookup("OPENAI_API_KEY").unwrap_or_default();

        let app_secret_key = lookup("APP_SECRET_KEY")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingSecretKey)?;

        let emotion_model_repo = lookup("EMOTION_MODEL_REPO")
            .unwrap_or_else(|| DEFAULT_EMOTION_MODEL_REPO.to_string());

        let translate_endpoint = lookup("TRANSLATE_ENDPOINT")
            .unwrap_or_else(|| DEFAULT_TRANSLATE_ENDPOINT.to_string());

        let translate_timeout_secs: u64 = lookup("TRANSLATE_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout)?;
        if translate_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| "logs".to_string());

        Ok(Self {
            server_port,
            openai_api_key,
            app_secret_key,
            emotion_model_repo,
            translate_endpoint,
            translate_timeout: Duration::from_secs(translate_timeout_secs),
            log_dir,
        })
    }
}

impl AppConfig {
    /// 로깅 초기화 이후 출력할 설정 경고
    ///
    /// `LOG_DIR`이 설정에 포함되어 있어 로드 시점에는 subscriber가 없습니다.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.openai_api_key.is_empty() {
            warnings.push(
                "OPENAI_API_KEY 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요.",
            );
        }
        warnings
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("TRANSLATE_TIMEOUT_SECS must be a positive integer")]
    InvalidTimeout,
    #[error("APP_SECRET_KEY environment variable is required")]
    MissingSecretKey,
}
