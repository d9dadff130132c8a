use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 분류기가 산출하는 감정 레이블
///
/// 텍스트 분류 모델의 7개 클래스와 실패 시 사용하는 `Unknown`으로 구성됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EmotionLabel {
    Anger,
    Disgust,
    Fear,
    Joy,
    Neutral,
    Sadness,
    Surprise,
    Unknown,
}

/// 감정 레이블에서 파생되는 3단계 감성 극성
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl EmotionLabel {
    /// 모델 출력 인덱스 순서 (0=Anger ... 6=Surprise)
    pub const MODEL_CLASSES: [EmotionLabel; 7] = [
        EmotionLabel::Anger,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Joy,
        EmotionLabel::Neutral,
        EmotionLabel::Sadness,
        EmotionLabel::Surprise,
    ];

    /// 모델 출력 인덱스를 레이블로 변환합니다. 범위를 벗어나면 `Unknown`.
    pub fn from_index(index: usize) -> Self {
        Self::MODEL_CLASSES
            .get(index)
            .copied()
            .unwrap_or(EmotionLabel::Unknown)
    }

    /// 감정 → 감성 매핑
    ///
    /// 감성 값을 만드는 유일한 경로입니다. 이모지 경로와 텍스트 경로 모두 이 함수를 거칩니다.
    pub fn sentiment(self) -> SentimentLabel {
        match self {
            EmotionLabel::Joy | EmotionLabel::Surprise => SentimentLabel::Positive,
            EmotionLabel::Neutral => SentimentLabel::Neutral,
            EmotionLabel::Anger
            | EmotionLabel::Disgust
            | EmotionLabel::Fear
            | EmotionLabel::Sadness => SentimentLabel::Negative,
            EmotionLabel::Unknown => SentimentLabel::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionLabel::Anger => "Anger",
            EmotionLabel::Disgust => "Disgust",
            EmotionLabel::Fear => "Fear",
            EmotionLabel::Joy => "Joy",
            EmotionLabel::Neutral => "Neutral",
            EmotionLabel::Sadness => "Sadness",
            EmotionLabel::Surprise => "Surprise",
            EmotionLabel::Unknown => "Unknown",
        }
    }
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 분류 결과 (감정, 감성)
///
/// 필드는 비공개이며 `from_emotion`으로만 생성되므로 감성은 항상 감정에서 파생됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ClassificationResult {
    emotion: EmotionLabel,
    sentiment: SentimentLabel,
}

impl ClassificationResult {
    pub fn from_emotion(emotion: EmotionLabel) -> Self {
        Self {
            emotion,
            sentiment: emotion.sentiment(),
        }
    }

    /// 분류 실패 시 사용하는 (Unknown, Unknown) 결과
    pub fn unknown() -> Self {
        Self::from_emotion(EmotionLabel::Unknown)
    }

    pub fn emotion(&self) -> EmotionLabel {
        self.emotion
    }

    pub fn sentiment(&self) -> SentimentLabel {
        self.sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EMOTIONS: [EmotionLabel; 8] = [
        EmotionLabel::Anger,
        EmotionLabel::Disgust,
        EmotionLabel::Fear,
        EmotionLabel::Joy,
        EmotionLabel::Neutral,
        EmotionLabel::Sadness,
        EmotionLabel::Surprise,
        EmotionLabel::Unknown,
    ];

    #[test]
    fn sentiment_should_be_negative_only_for_negative_emotions() {
        for emotion in ALL_EMOTIONS {
            let is_negative = matches!(
                emotion,
                EmotionLabel::Anger | EmotionLabel::Disgust | EmotionLabel::Fear | EmotionLabel::Sadness
            );
            assert_eq!(emotion.sentiment() == SentimentLabel::Negative, is_negative, "{emotion}");
        }
    }

    #[test]
    fn sentiment_should_be_positive_only_for_joy_and_surprise() {
        for emotion in ALL_EMOTIONS {
            let is_positive = matches!(emotion, EmotionLabel::Joy | EmotionLabel::Surprise);
            assert_eq!(emotion.sentiment() == SentimentLabel::Positive, is_positive, "{emotion}");
        }
    }

    #[test]
    fn sentiment_should_be_neutral_and_unknown_one_to_one() {
        for emotion in ALL_EMOTIONS {
            assert_eq!(
                emotion.sentiment() == SentimentLabel::Neutral,
                emotion == EmotionLabel::Neutral
            );
            assert_eq!(
                emotion.sentiment() == SentimentLabel::Unknown,
                emotion == EmotionLabel::Unknown
            );
        }
    }

    #[test]
    fn from_index_should_follow_model_ordinal_table() {
        // Arrange
        let expected = [
            (0, EmotionLabel::Anger),
            (1, EmotionLabel::Disgust),
            (2, EmotionLabel::Fear),
            (3, EmotionLabel::Joy),
            (4, EmotionLabel::Neutral),
            (5, EmotionLabel::Sadness),
            (6, EmotionLabel::Surprise),
        ];

        // Act & Assert
        for (index, label) in expected {
            assert_eq!(EmotionLabel::from_index(index), label);
        }
    }

    #[test]
    fn from_index_should_return_unknown_when_out_of_range() {
        assert_eq!(EmotionLabel::from_index(7), EmotionLabel::Unknown);
        assert_eq!(EmotionLabel::from_index(usize::MAX), EmotionLabel::Unknown);
    }

    #[test]
    fn classification_result_should_derive_sentiment_from_emotion() {
        for emotion in ALL_EMOTIONS {
            let result = ClassificationResult::from_emotion(emotion);
            assert_eq!(result.emotion(), emotion);
            assert_eq!(result.sentiment(), emotion.sentiment());
        }
    }

    #[test]
    fn unknown_result_should_pair_unknown_labels() {
        let result = ClassificationResult::unknown();

        assert_eq!(result.emotion(), EmotionLabel::Unknown);
        assert_eq!(result.sentiment(), SentimentLabel::Unknown);
    }

    #[test]
    fn labels_should_serialize_as_capitalized_names() {
        let json = serde_json::to_value(ClassificationResult::from_emotion(EmotionLabel::Joy)).unwrap();

        assert_eq!(json["emotion"], "Joy");
        assert_eq!(json["sentiment"], "Positive");
    }
}
