pub mod client;
pub mod dto;
pub mod handler;
pub mod pattern;
pub mod prompt;
pub mod retry;
pub mod service;

pub use client::{AiClient, AiClientTrait, OpenAiClient};
pub use dto::{ChatRequest, ChatResponse, CheckinRecord, InsightRequest, InsightResponse, UserProfile};
pub use pattern::MoodPattern;
pub use service::ChatService;
