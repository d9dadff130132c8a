use std::sync::Arc;

use async_openai::types::ChatCompletionRequestMessage;
use chrono::Utc;

use super::client::{build_assistant_message, build_system_message, build_user_message, AiClient};
use super::dto::{ChatRequest, ChatResponse, ChatRole, ChatTurn, CheckinRecord, InsightResponse};
use super::pattern::MoodPattern;
use super::prompt::{
    insight_user_prompt, motivation_user_prompt, CounselorPrompt, INSIGHT_SYSTEM_PROMPT,
    MOTIVATION_SYSTEM_PROMPT,
};
use super::retry::with_retry;
use crate::domain::emotion::EmotionAnalyzer;
use crate::error::AppError;

/// LLM에 전달하는 최대 대화 이력 (최근 턴)
const MAX_HISTORY_TURNS: usize = 10;

const LOW_INTENSITY_BELOW: u8 = 33;
const HIGH_INTENSITY_ABOVE: u8 = 66;

const ONBOARDING_INSIGHT: &str = "Start tracking your emotions to see personalized AI insights here!";
const ONBOARDING_MOTIVATION: &str = "Welcome! Begin your emotional wellness journey today.";
const FALLBACK_INSIGHT: &str = "Your emotions are valid. Keep tracking to understand yourself better.";
const FALLBACK_MOTIVATION: &str = "Every step forward is progress. You're doing great!";

/// 감정 분류용 텍스트 보강
///
/// 선택한 이모지를 덧붙이고, 감정 강도가 낮거나 높으면 그 정보를 함께 전달합니다.
pub fn enrich_message(text: &str, emojis: &[String], intensity: u8) -> String {
    let mut enriched = text.to_string();

    if !emojis.is_empty() {
        enriched.push(' ');
        enriched.push_str(&emojis.join(" "));
    }

    if intensity < LOW_INTENSITY_BELOW {
        enriched.push_str(" (emotion intensity: low)");
    } else if intensity > HIGH_INTENSITY_ABOVE {
        enriched.push_str(" (emotion intensity: high)");
    }

    enriched
}

/// LLM 응답의 앞뒤 공백과 따옴표 제거
fn strip_quotes(text: &str) -> String {
    text.trim().replace('"', "")
}

/// 상담 채팅 / 감정 인사이트 서비스
#[derive(Clone)]
pub struct ChatService {
    ai_client: AiClient,
    analyzer: EmotionAnalyzer,
}

impl ChatService {
    pub fn new(ai_client: AiClient, analyzer: EmotionAnalyzer) -> Self {
        Self {
            ai_client,
            analyzer,
        }
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let enriched = enrich_message(&request.text, &request.emojis, request.intensity);
        let classification = self.analyzer.classify(&enriched, &[]).await;

        tracing::info!(
            emotion = %classification.emotion(),
            sentiment = %classification.sentiment(),
            history_turns = request.history.len(),
            "Message classified"
        );

        let system_prompt = CounselorPrompt::system_prompt(&classification, &request.profile);
        let messages = build_chat_messages(&system_prompt, &request.history, &request.text)?;

        let reply = self.complete_with_retry(messages).await?;

        Ok(ChatResponse {
            reply,
            emotion: classification.emotion(),
            sentiment: classification.sentiment(),
            checkin: CheckinRecord {
                emotion: classification.emotion(),
                sentiment: classification.sentiment(),
                emoji: request.emojis.first().cloned(),
                recorded_at: Utc::now(),
            },
        })
    }

    /// 체크인 기록으로 감정 인사이트를 생성합니다.
    ///
    /// LLM 호출이 실패해도 고정 문구와 패턴을 반환합니다.
    pub async fn insight(&self, checkins: &[CheckinRecord]) -> InsightResponse {
        let Some(pattern) = MoodPattern::from_checkins(checkins) else {
            return InsightResponse {
                insight: ONBOARDING_INSIGHT.to_string(),
                motivation: ONBOARDING_MOTIVATION.to_string(),
                patterns: None,
            };
        };

        match self.generate_insight_texts(&pattern).await {
            Ok((insight, motivation)) => InsightResponse {
                insight,
                motivation,
                patterns: Some(pattern),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Insight generation failed, using fallback texts");
                InsightResponse {
                    insight: FALLBACK_INSIGHT.to_string(),
                    motivation: FALLBACK_MOTIVATION.to_string(),
                    patterns: Some(pattern),
                }
            }
        }
    }

    async fn generate_insight_texts(&self, pattern: &MoodPattern) -> Result<(String, String), AppError> {
        let insight_messages = vec![
            build_system_message(INSIGHT_SYSTEM_PROMPT)?,
            build_user_message(&insight_user_prompt(pattern))?,
        ];
        let motivation_messages = vec![
            build_system_message(MOTIVATION_SYSTEM_PROMPT)?,
            build_user_message(&motivation_user_prompt(pattern))?,
        ];

        let (insight, motivation) = tokio::try_join!(
            self.complete_with_retry(insight_messages),
            self.complete_with_retry(motivation_messages),
        )?;

        Ok((strip_quotes(&insight), strip_quotes(&motivation)))
    }

    async fn complete_with_retry(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, AppError> {
        with_retry(|| {
            let client = Arc::clone(&self.ai_client);
            let messages = messages.clone();
            async move { client.complete(messages).await }
        })
        .await
    }
}

/// System → 최근 이력(시간순) → 현재 사용자 메시지 순서로 메시지를 구성합니다.
fn build_chat_messages(
    system_prompt: &str,
    history: &[ChatTurn],
    user_text: &str,
) -> Result<Vec<ChatCompletionRequestMessage>, AppError> {
    let recent = &history[history.len().saturating_sub(MAX_HISTORY_TURNS)..];

    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(build_system_message(system_prompt)?);
    for turn in recent {
        messages.push(match turn.role {
            ChatRole::User => build_user_message(&turn.content)?,
            ChatRole::Assistant => build_assistant_message(&turn.content)?,
        });
    }
    messages.push(build_user_message(user_text)?);

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use crate::domain::ai::client::MockAiClientTrait;
    use crate::domain::ai::dto::UserProfile;
    use crate::domain::emotion::classifier::MockEmotionModel;
    use crate::domain::emotion::translate::MockTranslator;
    use crate::domain::emotion::{
        EmotionLabel, EmotionModel, SentimentLabel, TextEmotionClassifier, TranslationFallback,
        UnavailableEmotionModel,
    };

    fn analyzer_with_model(model: Arc<dyn EmotionModel>) -> EmotionAnalyzer {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate_to_english()
            .returning(|text| Ok(text.to_string()));
        EmotionAnalyzer::new(
            TranslationFallback::new(Arc::new(translator), Duration::from_millis(200)),
            TextEmotionClassifier::new(model),
        )
    }

    fn offline_analyzer() -> EmotionAnalyzer {
        analyzer_with_model(Arc::new(UnavailableEmotionModel::new("offline")))
    }

    fn request(text: &str, emojis: &[&str], history: Vec<ChatTurn>) -> ChatRequest {
        ChatRequest {
            text: text.to_string(),
            emojis: emojis.iter().map(|e| e.to_string()).collect(),
            intensity: 50,
            history,
            profile: UserProfile::default(),
            secret_key: "key".to_string(),
        }
    }

    fn turn(role: ChatRole, content: &str) -> ChatTurn {
        ChatTurn {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn enrich_message_should_append_emojis_and_intensity() {
        let emojis = vec!["😢".to_string(), "😭".to_string()];

        assert_eq!(
            enrich_message("rough day", &emojis, 80),
            "rough day 😢 😭 (emotion intensity: high)"
        );
        assert_eq!(enrich_message("ok", &[], 10), "ok (emotion intensity: low)");
        assert_eq!(enrich_message("ok", &[], 50), "ok");
    }

    #[test]
    fn enrich_message_should_keep_boundaries_neutral() {
        assert_eq!(enrich_message("ok", &[], 33), "ok");
        assert_eq!(enrich_message("ok", &[], 66), "ok");
    }

    #[test]
    fn strip_quotes_should_remove_quotes_and_whitespace() {
        assert_eq!(strip_quotes("  \"Keep going.\"\n"), "Keep going.");
    }

    #[test]
    fn build_chat_messages_should_keep_last_ten_turns_in_order() {
        // Arrange
        let history: Vec<ChatTurn> = (0..12)
            .map(|i| {
                let role = if i % 2 == 0 { ChatRole::User } else { ChatRole::Assistant };
                turn(role, &format!("turn {i}"))
            })
            .collect();

        // Act
        let messages = build_chat_messages("system", &history, "now").unwrap();

        // Assert
        assert_eq!(messages.len(), 12);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(messages[11], ChatCompletionRequestMessage::User(_)));
    }

    #[tokio::test]
    async fn chat_should_use_emoji_emotion_and_record_checkin() {
        // Arrange
        let captured: Arc<Mutex<Vec<ChatCompletionRequestMessage>>> = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&captured);
        let mut client = MockAiClientTrait::new();
        client.expect_complete().times(1).returning(move |messages| {
            *sink.lock().unwrap() = messages;
            Ok("That sounds really hard.".to_string())
        });
        let mut model = MockEmotionModel::new();
        model.expect_logits().never();
        let service = ChatService::new(Arc::new(client), analyzer_with_model(Arc::new(model)));

        // Act
        let response = service
            .chat(&request("exams tomorrow", &["😭", "😊"], vec![turn(ChatRole::User, "hi")]))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.reply, "That sounds really hard.");
        assert_eq!(response.emotion, EmotionLabel::Sadness);
        assert_eq!(response.sentiment, SentimentLabel::Negative);
        assert_eq!(response.checkin.emoji.as_deref(), Some("😭"));
        assert_eq!(response.checkin.emotion, EmotionLabel::Sadness);
        assert_eq!(captured.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn chat_should_continue_with_unknown_when_classifier_is_down() {
        let mut client = MockAiClientTrait::new();
        client
            .expect_complete()
            .returning(|_| Ok("I'm here for you.".to_string()));
        let service = ChatService::new(Arc::new(client), offline_analyzer());

        let response = service.chat(&request("hello", &[], vec![])).await.unwrap();

        assert_eq!(response.emotion, EmotionLabel::Unknown);
        assert_eq!(response.sentiment, SentimentLabel::Unknown);
        assert!(response.checkin.emoji.is_none());
    }

    #[tokio::test]
    async fn chat_should_propagate_permanent_llm_error() {
        let mut client = MockAiClientTrait::new();
        client
            .expect_complete()
            .times(1)
            .returning(|_| Err(AppError::OpenAiAuthError));
        let service = ChatService::new(Arc::new(client), offline_analyzer());

        let result = service.chat(&request("hello", &[], vec![])).await;

        assert!(matches!(result, Err(AppError::OpenAiAuthError)));
    }

    #[tokio::test]
    async fn insight_should_return_onboarding_without_calling_llm() {
        let mut client = MockAiClientTrait::new();
        client.expect_complete().never();
        let service = ChatService::new(Arc::new(client), offline_analyzer());

        let response = service.insight(&[]).await;

        assert_eq!(response.insight, ONBOARDING_INSIGHT);
        assert_eq!(response.motivation, ONBOARDING_MOTIVATION);
        assert!(response.patterns.is_none());
    }

    #[tokio::test]
    async fn insight_should_strip_quotes_from_llm_texts() {
        let mut client = MockAiClientTrait::new();
        client
            .expect_complete()
            .times(2)
            .returning(|_| Ok(" \"You are doing well.\" ".to_string()));
        let service = ChatService::new(Arc::new(client), offline_analyzer());
        let checkins = vec![CheckinRecord {
            emotion: EmotionLabel::Joy,
            sentiment: SentimentLabel::Positive,
            emoji: None,
            recorded_at: Utc::now(),
        }];

        let response = service.insight(&checkins).await;

        assert_eq!(response.insight, "You are doing well.");
        assert_eq!(response.motivation, "You are doing well.");
        assert_eq!(response.patterns.unwrap().total_checkins, 1);
    }

    #[tokio::test]
    async fn insight_should_fall_back_when_llm_fails() {
        let mut client = MockAiClientTrait::new();
        client
            .expect_complete()
            .returning(|_| Err(AppError::OpenAiAuthError));
        let service = ChatService::new(Arc::new(client), offline_analyzer());
        let checkins = vec![CheckinRecord {
            emotion: EmotionLabel::Anger,
            sentiment: SentimentLabel::Negative,
            emoji: Some("😡".to_string()),
            recorded_at: Utc::now(),
        }];

        let response = service.insight(&checkins).await;

        assert_eq!(response.insight, FALLBACK_INSIGHT);
        assert_eq!(response.motivation, FALLBACK_MOTIVATION);
        let patterns = response.patterns.unwrap();
        assert_eq!(patterns.most_common_emotion, EmotionLabel::Anger);
        assert_eq!(patterns.sentiment_distribution.negative, 100.0);
    }
}
