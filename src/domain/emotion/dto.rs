use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::label::{ClassificationResult, EmotionLabel, SentimentLabel};

/// 감정 분류 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    /// 분류할 텍스트 (빈 문자열 허용, 최대 5000자)
    #[serde(default)]
    #[validate(length(max = 5000, message = "텍스트는 5000자 이하여야 합니다"))]
    #[schema(example = "I am so happy today!! 😊😊😢")]
    pub text: String,

    /// 사용자가 직접 선택한 이모지 목록
    #[serde(default)]
    #[validate(length(max = 20, message = "이모지는 최대 20개까지 선택할 수 있습니다"))]
    pub emojis: Vec<String>,

    /// API 인증 키
    #[validate(length(min = 1, message = "비밀 키는 필수입니다"))]
    pub secret_key: String,
}

/// 감정 분류 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyResponse {
    #[schema(example = "Joy")]
    pub emotion: EmotionLabel,
    #[schema(example = "Positive")]
    pub sentiment: SentimentLabel,
}

impl From<ClassificationResult> for ClassifyResponse {
    fn from(result: ClassificationResult) -> Self {
        Self {
            emotion: result.emotion(),
            sentiment: result.sentiment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_missing_text_and_emojis() {
        // Arrange
        let json = r#"{"secretKey": "key"}"#;

        // Act
        let request: ClassifyRequest = serde_json::from_str(json).unwrap();

        // Assert
        assert!(request.text.is_empty());
        assert!(request.emojis.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn should_reject_empty_secret_key() {
        let request: ClassifyRequest =
            serde_json::from_str(r#"{"text": "hi", "secretKey": ""}"#).unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn response_should_mirror_classification_result() {
        let response = ClassifyResponse::from(ClassificationResult::from_emotion(EmotionLabel::Fear));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["emotion"], "Fear");
        assert_eq!(json["sentiment"], "Negative");
    }
}
