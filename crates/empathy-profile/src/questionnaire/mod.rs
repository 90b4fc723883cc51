//! Empathy profile questionnaire: the fixed item catalogue, answer validation,
//! scoring, respondent sessions, result narratives, and the HTTP surface.

pub mod answers;
pub mod bank;
pub mod domain;
pub mod import;
pub mod narrative;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use answers::{AnswerError, AnswerSet};
pub use bank::{BankError, QuestionBank};
pub use domain::{likert_options, Category, Item, ItemId, Likert, LikertOption, ScoreBounds};
pub use import::{AnswerImportError, AnswerSheetImporter};
pub use narrative::{
    describe_or_fallback, DisabledNarrator, GeminiNarrator, Narrative, NarrativeError,
    NarrativeGenerator, NarrativeRequest, NarrativeSource, ResultDescriptions,
};
pub use report::{ProfileReport, RadarAxis, ResultSection};
pub use router::questionnaire_router;
pub use scoring::{
    derive_composites, effective_score, select_dominant_profile, CombinedScores, Composite,
    DominantProfile, ScoreError, ScoreOutcome, Scores, ScoringEngine,
};
pub use service::{AssessmentError, AssessmentRequest, AssessmentService};
pub use session::{Advance, Session, SessionError, SessionState};

/// Begin a session over the standard catalogue.
pub fn start_session() -> Result<Session, SessionError> {
    let mut session = Session::new(QuestionBank::standard());
    session.start()?;
    Ok(session)
}

/// Category totals for `answers` against the standard catalogue.
pub fn finalize(answers: &AnswerSet) -> Scores {
    ScoringEngine::new(QuestionBank::standard()).finalize(answers)
}
