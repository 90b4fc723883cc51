//! Empathy profile questionnaire: question bank, scoring engine, respondent
//! sessions, and the narrative adapter that turns composite scores into prose.

pub mod config;
pub mod error;
pub mod questionnaire;
pub mod telemetry;
