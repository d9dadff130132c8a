//! 감정/감성 분류 파이프라인
//!
//! 이모지 신호 → (없으면) 번역 → 텍스트 분류 → 감성 파생 순서로 동작하며,
//! 공개 진입점인 [`EmotionAnalyzer::classify`]는 어떤 입력에도 실패하지 않습니다.

pub mod analyzer;
pub mod classifier;
pub mod dto;
pub mod emoji;
pub mod handler;
pub mod label;
pub mod roberta;
pub mod translate;

pub use analyzer::{
    ClassificationInput, ClassificationOutcome, DegradedReason, EmotionAnalyzer, SignalSource,
};
pub use classifier::{
    clean_text, ClassifierError, EmotionModel, TextEmotionClassifier, TextPrediction,
    UnavailableEmotionModel,
};
pub use emoji::{collect_emoji_signal, extract_emojis, fuse_emoji_signal, EmojiEmotionTable};
pub use handler::classify_emotion;
pub use label::{ClassificationResult, EmotionLabel, SentimentLabel};
pub use roberta::{load_from_hub, RobertaEmotionModel};
pub use translate::{GoogleTranslator, TranslationError, TranslationFallback, Translator};
