use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::pattern::MoodPattern;
use crate::domain::emotion::{EmotionLabel, SentimentLabel};

/// 감정 강도 기본값 (0~100)
pub const DEFAULT_INTENSITY: u8 = 50;

fn default_intensity() -> u8 {
    DEFAULT_INTENSITY
}

/// 상담 프롬프트 개인화에 사용하는 사용자 프로필
///
/// 비어 있는 필드는 기본값으로 대체됩니다.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[schema(example = "Alex")]
    pub name: Option<String>,
    #[schema(example = "female")]
    pub gender: Option<String>,
    #[schema(example = "Computer Science")]
    pub course: Option<String>,
    #[schema(example = "university")]
    pub education_level: Option<String>,
}

fn non_blank<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}

impl UserProfile {
    pub fn name(&self) -> &str {
        non_blank(&self.name, "Student")
    }

    pub fn gender(&self) -> &str {
        non_blank(&self.gender, "unknown")
    }

    pub fn course(&self) -> &str {
        non_blank(&self.course, "unknown")
    }

    pub fn education_level(&self) -> &str {
        non_blank(&self.education_level, "university")
    }
}

/// 대화 이력 메시지 작성자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// 이전 대화 한 턴
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct ChatTurn {
    pub role: ChatRole,
    #[validate(length(max = 5000, message = "대화 이력 메시지는 5000자 이하여야 합니다"))]
    pub content: String,
}

/// 상담 채팅 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// 사용자 메시지 (1 ~ 5000자)
    #[validate(length(min = 1, max = 5000, message = "메시지는 1자 이상 5000자 이하여야 합니다"))]
    #[schema(example = "I have three exams this week and can't sleep")]
    pub text: String,

    /// 사용자가 선택한 이모지
    #[serde(default)]
    #[validate(length(max = 20, message = "이모지는 최대 20개까지 선택할 수 있습니다"))]
    pub emojis: Vec<String>,

    /// 감정 강도 (0 ~ 100, 기본 50)
    #[serde(default = "default_intensity")]
    #[validate(range(max = 100, message = "감정 강도는 0 이상 100 이하여야 합니다"))]
    #[schema(example = 70)]
    pub intensity: u8,

    /// 이전 대화 (시간순)
    #[serde(default)]
    #[validate(nested)]
    pub history: Vec<ChatTurn>,

    #[serde(default)]
    pub profile: UserProfile,

    /// API 인증 키
    #[validate(length(min = 1, message = "비밀 키는 필수입니다"))]
    pub secret_key: String,
}

/// 체크인 기록
///
/// 저장은 호출자의 영속 계층이 담당하며, 인사이트 요청 시 그대로 돌려받습니다.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRecord {
    pub emotion: EmotionLabel,
    pub sentiment: SentimentLabel,
    /// 첫 번째로 선택한 이모지
    pub emoji: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// 상담 채팅 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub emotion: EmotionLabel,
    pub sentiment: SentimentLabel,
    pub checkin: CheckinRecord,
}

/// 감정 인사이트 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    /// 최근 체크인 (최대 50개)
    #[serde(default)]
    #[validate(length(max = 50, message = "체크인은 최대 50개까지 분석할 수 있습니다"))]
    pub checkins: Vec<CheckinRecord>,

    /// API 인증 키
    #[validate(length(min = 1, message = "비밀 키는 필수입니다"))]
    pub secret_key: String,
}

/// 감정 인사이트 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    pub insight: String,
    pub motivation: String,
    /// 체크인이 없으면 null
    pub patterns: Option<MoodPattern>,
}
