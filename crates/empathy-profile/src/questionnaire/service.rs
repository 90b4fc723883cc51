use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use super::answers::{AnswerError, AnswerSet};
use super::bank::QuestionBank;
use super::import::{AnswerImportError, AnswerSheetImporter};
use super::narrative::{describe_or_fallback, NarrativeGenerator, NarrativeRequest};
use super::report::ProfileReport;
use super::scoring::{ScoreOutcome, ScoringEngine};

/// Answers as submitted over the API: a JSON map or an inline CSV sheet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub answers: BTreeMap<u16, i64>,
    #[serde(default)]
    pub answers_csv: Option<String>,
}

/// Service composing the question bank, scoring engine, and narrative generator.
pub struct AssessmentService<G: ?Sized> {
    engine: ScoringEngine,
    narrator: Arc<G>,
}

impl<G> AssessmentService<G>
where
    G: NarrativeGenerator + ?Sized + 'static,
{
    pub fn new(bank: QuestionBank, narrator: Arc<G>) -> Self {
        Self {
            engine: ScoringEngine::new(bank),
            narrator,
        }
    }

    pub fn bank(&self) -> QuestionBank {
        self.engine.bank()
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Validate a submitted request into an answer set.
    pub fn validate(&self, request: AssessmentRequest) -> Result<AnswerSet, AssessmentError> {
        let bank = self.bank();
        match request.answers_csv {
            Some(_) if !request.answers.is_empty() => Err(AssessmentError::AmbiguousInput),
            Some(csv) => Ok(AnswerSheetImporter::from_reader(
                Cursor::new(csv.into_bytes()),
                &bank,
            )?),
            None => Ok(AnswerSet::from_raw(&bank, request.answers)?),
        }
    }

    /// Score an answer set and attach descriptions. Never fails.
    pub async fn assess(&self, answers: AnswerSet) -> ProfileReport {
        if !answers.is_complete(&self.bank()) {
            warn!(
                answered = answers.len(),
                total = self.bank().item_count(),
                "scoring incomplete answer set; unanswered items count as neutral"
            );
        }

        let outcome = self.engine.evaluate(&answers);
        drop(answers);
        self.report(outcome).await
    }

    /// Build the report for scores computed elsewhere (e.g. a finished session).
    pub async fn report(&self, outcome: ScoreOutcome) -> ProfileReport {
        let range = self.engine.composite_range();
        let request = NarrativeRequest {
            combined: outcome.combined,
            range,
        };
        let narrative = describe_or_fallback(self.narrator.as_ref(), &request).await;

        info!(
            profile = outcome.dominant.label,
            score = outcome.dominant.score,
            narrative = ?narrative.source,
            "assessment scored"
        );

        ProfileReport::new(outcome, narrative, range.max)
    }
}

/// Error raised while turning a request into an answer set.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Import(#[from] AnswerImportError),
    #[error("provide either `answers` or `answers_csv`, not both")]
    AmbiguousInput,
}
