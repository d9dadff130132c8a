pub mod ai;
pub mod emotion;
pub mod health;
