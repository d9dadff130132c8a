//! 감정 인사이트 프롬프트

use crate::domain::ai::pattern::MoodPattern;

/// 감정 패턴 요약 System Prompt
pub const INSIGHT_SYSTEM_PROMPT: &str = r#"You are an emotional wellness analyst. Summarize the user's emotional pattern in simple, everyday language.
Format: "Your emotions show [pattern]. [One simple observation]."
At most 2 sentences and 30 words. Be warm and clear."#;

/// 응원 메시지 System Prompt
pub const MOTIVATION_SYSTEM_PROMPT: &str = r#"Write an original, uplifting message that fits the user's emotional state.
Do not include an author attribution or quotation marks.
Keep it under 25 words."#;

pub fn insight_user_prompt(pattern: &MoodPattern) -> String {
    let dist = &pattern.sentiment_distribution;
    format!(
        "Pattern: {} is most common. Sentiment: {}% positive, {}% neutral, {}% negative.",
        pattern.most_common_emotion, dist.positive, dist.neutral, dist.negative
    )
}

pub fn motivation_user_prompt(pattern: &MoodPattern) -> String {
    format!(
        "User feels {} most often. {}% positive emotions overall.",
        pattern.most_common_emotion, pattern.sentiment_distribution.positive
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ai::pattern::SentimentDistribution;
    use crate::domain::emotion::EmotionLabel;

    fn pattern() -> MoodPattern {
        MoodPattern {
            total_checkins: 4,
            most_common_emotion: EmotionLabel::Sadness,
            sentiment_distribution: SentimentDistribution {
                positive: 25.0,
                neutral: 0.0,
                negative: 75.0,
            },
            emotion_breakdown: vec![],
        }
    }

    #[test]
    fn insight_prompt_should_describe_distribution() {
        let prompt = insight_user_prompt(&pattern());

        assert_eq!(
            prompt,
            "Pattern: Sadness is most common. Sentiment: 25% positive, 0% neutral, 75% negative."
        );
    }

    #[test]
    fn motivation_prompt_should_mention_most_common_emotion() {
        assert!(motivation_user_prompt(&pattern()).starts_with("User feels Sadness most often."));
    }
}
