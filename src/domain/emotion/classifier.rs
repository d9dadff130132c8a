use std::sync::Arc;

use super::label::EmotionLabel;

/// 텍스트 분류 단계의 실패 사유
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("emotion model is not loaded: {0}")]
    ModelUnavailable(String),

    #[error("failed to load emotion model: {0}")]
    ModelLoad(String),

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model returned no logits")]
    EmptyLogits,

    #[error("inference task aborted: {0}")]
    TaskJoin(String),
}

/// 사전학습된 다중 클래스 감정 분류 모델
///
/// 토큰화와 순전파를 수행하고 7개 클래스의 로짓을 반환합니다.
/// 읽기 전용으로 공유되므로 동시 호출에 안전해야 합니다.
#[cfg_attr(test, mockall::automock)]
pub trait EmotionModel: Send + Sync {
    fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError>;

    fn is_loaded(&self) -> bool {
        true
    }
}

/// 시작 시 모델 로딩에 실패했을 때 사용하는 자리표시자
///
/// 모든 호출이 실패하므로 분류 결과는 Unknown으로 수렴합니다.
pub struct UnavailableEmotionModel {
    reason: String,
}

impl UnavailableEmotionModel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl EmotionModel for UnavailableEmotionModel {
    fn logits(&self, _text: &str) -> Result<Vec<f32>, ClassifierError> {
        Err(ClassifierError::ModelUnavailable(self.reason.clone()))
    }

    fn is_loaded(&self) -> bool {
        false
    }
}

/// 최상위 클래스 예측
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPrediction {
    pub label: EmotionLabel,
    pub confidence: f32,
}

/// 분류 전 텍스트 정리: 앞뒤 공백 제거, 줄바꿈을 공백으로 치환
pub fn clean_text(text: &str) -> String {
    text.trim().replace(['\r', '\n'], " ")
}

/// 수치 안정화된 softmax
pub(crate) fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|x| x / sum).collect()
}

/// 확률이 가장 큰 인덱스. 동률이면 앞선 인덱스가 선택됩니다.
pub(crate) fn argmax(probs: &[f32]) -> Option<(usize, f32)> {
    probs
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (index, p)| match best {
            Some((_, best_p)) if best_p >= p => best,
            _ => Some((index, p)),
        })
}

/// 텍스트 감정 분류기
///
/// 모델 호출은 blocking 풀에서 실행되며, 로짓에 softmax를 적용한 뒤
/// argmax 인덱스를 고정 순서표로 레이블에 매핑합니다.
#[derive(Clone)]
pub struct TextEmotionClassifier {
    model: Arc<dyn EmotionModel>,
}

impl TextEmotionClassifier {
    pub fn new(model: Arc<dyn EmotionModel>) -> Self {
        Self { model }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    pub async fn predict(&self, text: &str) -> Result<TextPrediction, ClassifierError> {
        let model = Arc::clone(&self.model);
        let text_owned = text.to_string();

        let logits = tokio::task::spawn_blocking(move || model.logits(&text_owned))
            .await
            .map_err(|e| ClassifierError::TaskJoin(e.to_string()))??;

        Self::predict_from_logits(&logits)
    }

    fn predict_from_logits(logits: &[f32]) -> Result<TextPrediction, ClassifierError> {
        if logits.iter().any(|x| !x.is_finite()) {
            return Err(ClassifierError::Inference("non-finite logits".to_string()));
        }

        let probs = softmax(logits);
        if probs.iter().any(|p| !p.is_finite()) {
            return Err(ClassifierError::Inference("non-finite probabilities".to_string()));
        }
        let (index, confidence) = argmax(&probs).ok_or(ClassifierError::EmptyLogits)?;

        Ok(TextPrediction {
            label: EmotionLabel::from_index(index),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_should_trim_and_collapse_newlines() {
        assert_eq!(clean_text("  first line\nsecond line\r\n"), "first line second line");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn softmax_should_sum_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0, 0.5, -1.0, 0.0, 4.0]);

        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs.iter().all(|p| *p > 0.0));
    }

    #[test]
    fn softmax_should_be_stable_for_large_logits() {
        let probs = softmax(&[1000.0, 1001.0]);

        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[1] > probs[0]);
    }

    #[test]
    fn argmax_should_prefer_first_index_on_tie() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some((1, 0.4)));
        assert_eq!(argmax(&[]), None);
    }

    #[tokio::test]
    async fn predict_should_map_argmax_to_label() {
        // Arrange
        let mut model = MockEmotionModel::new();
        model
            .expect_logits()
            .returning(|_| Ok(vec![0.1, 0.0, 0.2, 0.3, 0.5, 4.2, 0.0]));
        let classifier = TextEmotionClassifier::new(Arc::new(model));

        // Act
        let prediction = classifier.predict("I am very sad").await.unwrap();

        // Assert
        assert_eq!(prediction.label, EmotionLabel::Sadness);
        assert!(prediction.confidence > 0.5);
    }

    #[tokio::test]
    async fn predict_should_propagate_model_error() {
        let mut model = MockEmotionModel::new();
        model
            .expect_logits()
            .returning(|_| Err(ClassifierError::Inference("boom".to_string())));
        let classifier = TextEmotionClassifier::new(Arc::new(model));

        let result = classifier.predict("anything").await;

        assert!(matches!(result, Err(ClassifierError::Inference(_))));
    }

    #[tokio::test]
    async fn predict_should_fail_on_empty_logits() {
        let mut model = MockEmotionModel::new();
        model.expect_logits().returning(|_| Ok(vec![]));
        let classifier = TextEmotionClassifier::new(Arc::new(model));

        let result = classifier.predict("anything").await;

        assert!(matches!(result, Err(ClassifierError::EmptyLogits)));
    }

    #[tokio::test]
    async fn predict_should_fail_on_nan_logits() {
        let mut model = MockEmotionModel::new();
        model.expect_logits().returning(|_| Ok(vec![f32::NAN; 7]));
        let classifier = TextEmotionClassifier::new(Arc::new(model));

        let result = classifier.predict("anything").await;

        assert!(matches!(result, Err(ClassifierError::Inference(_))));
    }

    #[tokio::test]
    async fn predict_should_fail_on_infinite_logit() {
        let mut model = MockEmotionModel::new();
        model
            .expect_logits()
            .returning(|_| Ok(vec![0.0, 0.0, f32::INFINITY, 0.0, 0.0, 0.0, 0.0]));
        let classifier = TextEmotionClassifier::new(Arc::new(model));

        let result = classifier.predict("anything").await;

        assert!(matches!(result, Err(ClassifierError::Inference(_))));
    }

    #[tokio::test]
    async fn predict_should_return_unknown_for_extra_classes() {
        let mut model = MockEmotionModel::new();
        model
            .expect_logits()
            .returning(|_| Ok(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0]));
        let classifier = TextEmotionClassifier::new(Arc::new(model));

        let prediction = classifier.predict("anything").await.unwrap();

        assert_eq!(prediction.label, EmotionLabel::Unknown);
    }

    #[tokio::test]
    async fn unavailable_model_should_always_fail() {
        let classifier =
            TextEmotionClassifier::new(Arc::new(UnavailableEmotionModel::new("download failed")));

        let result = classifier.predict("hello").await;

        assert!(!classifier.is_model_loaded());
        assert!(matches!(result, Err(ClassifierError::ModelUnavailable(_))));
    }
}
