//! 영어 정규화 번역
//!
//! 감정 분류 모델은 영어 텍스트로 학습되었으므로 분류 전에 영어로 번역합니다.
//! 번역은 최선 노력(best-effort)이며 실패하면 원문을 그대로 사용합니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// 번역 실패 사유
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation provider returned HTTP {0}")]
    Status(u16),

    #[error("translation timed out")]
    Timeout,

    #[error("translation result was empty")]
    EmptyResult,

    #[error("unexpected translation response shape")]
    MalformedResponse,
}

/// 번역 제공자 인터페이스
///
/// 테스트에서 Mock 객체로 대체할 수 있도록 추상화합니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// 원문 언어를 자동 감지하여 영어로 번역합니다.
    async fn translate_to_english(&self, text: &str) -> Result<String, TranslationError>;
}

/// Google 번역 웹 엔드포인트 클라이언트 (`client=gtx`)
#[derive(Clone)]
pub struct GoogleTranslator {
    endpoint: String,
    http: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TranslationError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate_to_english(&self, text: &str) -> Result<String, TranslationError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", "en"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::Timeout
                } else {
                    TranslationError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            return Err(TranslationError::Status(response.status().as_u16()));
        }

        let body: Value = response.json().await?;
        parse_translation(&body)
    }
}

/// `[[["translated","source",...], ...], null, "es", ...]` 형태에서 번역문을 이어붙입니다.
fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or(TranslationError::MalformedResponse)?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslationError::EmptyResult);
    }
    Ok(translated)
}

/// 실패해도 원문을 돌려주는 번역 단계
#[derive(Clone)]
pub struct TranslationFallback {
    translator: Arc<dyn Translator>,
    timeout: Duration,
}

impl TranslationFallback {
    pub fn new(translator: Arc<dyn Translator>, timeout: Duration) -> Self {
        Self {
            translator,
            timeout,
        }
    }

    /// 영어로 번역된 텍스트를 반환합니다. 어떤 실패든 원문으로 대체됩니다.
    pub async fn to_english(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let outcome = tokio::time::timeout(self.timeout, self.translator.translate_to_english(text))
            .await
            .unwrap_or(Err(TranslationError::Timeout));

        match outcome {
            Ok(translated) if !translated.trim().is_empty() => {
                tracing::debug!(
                    source_len = text.len(),
                    translated_len = translated.len(),
                    "Text translated to English"
                );
                translated
            }
            Ok(_) => {
                tracing::warn!(error = %TranslationError::EmptyResult, "Translation skipped, using original text");
                text.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Translation failed, using original text");
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fallback_with(mock: MockTranslator) -> TranslationFallback {
        TranslationFallback::new(Arc::new(mock), Duration::from_millis(200))
    }

    #[test]
    fn parse_translation_should_join_segments() {
        // Arrange
        let body = json!([[["I am very ", "estoy muy ", null], ["sad", "triste", null]], null, "es"]);

        // Act
        let result = parse_translation(&body).unwrap();

        // Assert
        assert_eq!(result, "I am very sad");
    }

    #[test]
    fn parse_translation_should_reject_unexpected_shape() {
        let result = parse_translation(&json!({"text": "hello"}));

        assert!(matches!(result, Err(TranslationError::MalformedResponse)));
    }

    #[test]
    fn parse_translation_should_reject_blank_result() {
        let result = parse_translation(&json!([[["   ", "x", null]]]));

        assert!(matches!(result, Err(TranslationError::EmptyResult)));
    }

    #[test]
    fn google_translator_should_build_with_timeout() {
        let translator =
            GoogleTranslator::new("https://translate.googleapis.com/translate_a/single", Duration::from_secs(5));

        assert!(translator.is_ok());
    }

    #[tokio::test]
    async fn to_english_should_return_translation_on_success() {
        // Arrange
        let mut mock = MockTranslator::new();
        mock.expect_translate_to_english()
            .returning(|_| Ok("I am very sad".to_string()));

        // Act
        let result = fallback_with(mock).to_english("estoy muy triste").await;

        // Assert
        assert_eq!(result, "I am very sad");
    }

    #[tokio::test]
    async fn to_english_should_return_original_when_provider_fails() {
        let mut mock = MockTranslator::new();
        mock.expect_translate_to_english()
            .returning(|_| Err(TranslationError::Status(503)));

        let result = fallback_with(mock).to_english("estoy muy triste").await;

        assert_eq!(result, "estoy muy triste");
    }

    #[tokio::test]
    async fn to_english_should_return_original_when_result_is_blank() {
        let mut mock = MockTranslator::new();
        mock.expect_translate_to_english()
            .returning(|_| Ok("  ".to_string()));

        let result = fallback_with(mock).to_english("bonjour").await;

        assert_eq!(result, "bonjour");
    }

    #[tokio::test]
    async fn to_english_should_skip_provider_for_blank_text() {
        let mut mock = MockTranslator::new();
        mock.expect_translate_to_english().never();

        let result = fallback_with(mock).to_english("   ").await;

        assert_eq!(result, "   ");
    }

    struct HangingTranslator;

    #[async_trait]
    impl Translator for HangingTranslator {
        async fn translate_to_english(&self, _text: &str) -> Result<String, TranslationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("never".to_string())
        }
    }

    #[tokio::test]
    async fn to_english_should_return_original_when_provider_hangs() {
        let fallback = TranslationFallback::new(Arc::new(HangingTranslator), Duration::from_millis(20));

        let result = fallback.to_english("hola").await;

        assert_eq!(result, "hola");
    }
}
