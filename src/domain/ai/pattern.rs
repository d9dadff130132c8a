use serde::Serialize;
use utoipa::ToSchema;

use super::dto::CheckinRecord;
use crate::domain::emotion::{EmotionLabel, SentimentLabel};

/// 감성 분포 (%, 소수점 첫째 자리)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmotionCount {
    pub emotion: EmotionLabel,
    pub count: usize,
}

/// 체크인 기록에서 계산한 감정 패턴
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodPattern {
    pub total_checkins: usize,
    pub most_common_emotion: EmotionLabel,
    pub sentiment_distribution: SentimentDistribution,
    /// 상위 3개 감정
    pub emotion_breakdown: Vec<EmotionCount>,
}

const BREAKDOWN_SIZE: usize = 3;

fn percent(count: usize, total: usize) -> f64 {
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

impl MoodPattern {
    /// 체크인이 없으면 `None`
    pub fn from_checkins(checkins: &[CheckinRecord]) -> Option<Self> {
        if checkins.is_empty() {
            return None;
        }
        let total = checkins.len();

        // 처음 등장한 순서를 유지한 집계
        let mut tally: Vec<EmotionCount> = Vec::new();
        for checkin in checkins {
            match tally.iter_mut().find(|c| c.emotion == checkin.emotion) {
                Some(entry) => entry.count += 1,
                None => tally.push(EmotionCount {
                    emotion: checkin.emotion,
                    count: 1,
                }),
            }
        }
        // 안정 정렬이므로 동률은 먼저 등장한 감정이 앞에 옵니다.
        tally.sort_by(|a, b| b.count.cmp(&a.count));

        let most_common_emotion = tally
            .first()
            .map(|c| c.emotion)
            .unwrap_or(EmotionLabel::Unknown);
        tally.truncate(BREAKDOWN_SIZE);

        // 저장된 sentiment 필드 대신 감정에서 다시 파생
        let count_of = |sentiment: SentimentLabel| {
            checkins
                .iter()
                .filter(|c| c.emotion.sentiment() == sentiment)
                .count()
        };

        Some(Self {
            total_checkins: total,
            most_common_emotion,
            sentiment_distribution: SentimentDistribution {
                positive: percent(count_of(SentimentLabel::Positive), total),
                neutral: percent(count_of(SentimentLabel::Neutral), total),
                negative: percent(count_of(SentimentLabel::Negative), total),
            },
            emotion_breakdown: tally,
        })
    }
}
