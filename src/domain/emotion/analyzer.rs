use std::fmt;

use super::classifier::{clean_text, ClassifierError, TextEmotionClassifier};
use super::emoji::{collect_emoji_signal, fuse_emoji_signal, EmojiEmotionTable};
use super::label::ClassificationResult;
use super::translate::TranslationFallback;

/// 분류 입력: 자유 텍스트와 사용자가 별도로 고른 이모지 목록
#[derive(Debug, Clone, Default)]
pub struct ClassificationInput {
    pub text: String,
    pub emojis: Vec<String>,
}

impl ClassificationInput {
    pub fn new(text: impl Into<String>, emojis: Vec<String>) -> Self {
        Self {
            text: text.into(),
            emojis,
        }
    }
}

/// 결과를 만든 경로
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    Emoji,
    Text,
}

impl SignalSource {
    fn as_str(self) -> &'static str {
        match self {
            SignalSource::Emoji => "emoji",
            SignalSource::Text => "text",
        }
    }
}

/// 텍스트 경로 실패 사유
#[derive(Debug)]
pub enum DegradedReason {
    Classifier(ClassifierError),
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradedReason::Classifier(e) => write!(f, "{e}"),
        }
    }
}

/// 내부 분류 결과
///
/// 실패 원인을 테스트와 로그에서 확인할 수 있도록 보존하고,
/// 외부에는 `into_result`로 (Unknown, Unknown)까지 접어서 전달합니다.
#[derive(Debug)]
pub enum ClassificationOutcome {
    Success {
        result: ClassificationResult,
        source: SignalSource,
    },
    Degraded {
        reason: DegradedReason,
    },
}

impl ClassificationOutcome {
    pub fn into_result(self) -> ClassificationResult {
        match self {
            ClassificationOutcome::Success { result, .. } => result,
            ClassificationOutcome::Degraded { .. } => ClassificationResult::unknown(),
        }
    }

    fn path(&self) -> &'static str {
        match self {
            ClassificationOutcome::Success { source, .. } => source.as_str(),
            ClassificationOutcome::Degraded { .. } => "degraded",
        }
    }
}

/// 감정 분류 오케스트레이터
///
/// 이모지 신호가 있으면 그 결과를 바로 반환하고(텍스트 분류는 건너뜀),
/// 없으면 번역 → 텍스트 분류 → 감성 파생 순서로 진행합니다.
/// 어떤 단계가 실패해도 호출자에게 에러를 전파하지 않습니다.
#[derive(Clone)]
pub struct EmotionAnalyzer {
    translation: TranslationFallback,
    classifier: TextEmotionClassifier,
    table: &'static EmojiEmotionTable,
}

impl EmotionAnalyzer {
    pub fn new(translation: TranslationFallback, classifier: TextEmotionClassifier) -> Self {
        Self {
            translation,
            classifier,
            table: EmojiEmotionTable::global(),
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_model_loaded()
    }

    /// 공개 계약: 항상 (감정, 감성) 쌍을 반환합니다.
    pub async fn classify(&self, text: &str, emojis: &[String]) -> ClassificationResult {
        let input = ClassificationInput::new(text, emojis.to_vec());
        self.analyze(&input).await.into_result()
    }

    pub async fn analyze(&self, input: &ClassificationInput) -> ClassificationOutcome {
        let outcome = self.run(input).await;

        metrics::counter!("emotion_classifications_total", "path" => outcome.path()).increment(1);

        match &outcome {
            ClassificationOutcome::Success { result, source } => {
                tracing::debug!(
                    path = source.as_str(),
                    emotion = %result.emotion(),
                    sentiment = %result.sentiment(),
                    "Emotion classified"
                );
            }
            ClassificationOutcome::Degraded { reason } => {
                tracing::warn!(reason = %reason, "Emotion classification degraded to Unknown");
            }
        }

        outcome
    }

    async fn run(&self, input: &ClassificationInput) -> ClassificationOutcome {
        let text = clean_text(&input.text);

        let glyphs = collect_emoji_signal(&text, &input.emojis);
        if let Some(emotion) = fuse_emoji_signal(&glyphs, self.table) {
            return ClassificationOutcome::Success {
                result: ClassificationResult::from_emotion(emotion),
                source: SignalSource::Emoji,
            };
        }

        let english = self.translation.to_english(&text).await;

        match self.classifier.predict(&english).await {
            Ok(prediction) => {
                tracing::debug!(
                    label = %prediction.label,
                    confidence = prediction.confidence,
                    "Text classifier prediction"
                );
                ClassificationOutcome::Success {
                    result: ClassificationResult::from_emotion(prediction.label),
                    source: SignalSource::Text,
                }
            }
            Err(e) => ClassificationOutcome::Degraded {
                reason: DegradedReason::Classifier(e),
            },
        }
    }
}
