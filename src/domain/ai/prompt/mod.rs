//! AI 프롬프트 모듈
//!
//! ## 구조
//! - `counselor`: 상담 챗봇 페르소나
//! - `insight`: 감정 패턴 요약과 응원 메시지

mod counselor;
mod insight;

pub use counselor::CounselorPrompt;
pub use insight::{
    insight_user_prompt, motivation_user_prompt, INSIGHT_SYSTEM_PROMPT, MOTIVATION_SYSTEM_PROMPT,
};
