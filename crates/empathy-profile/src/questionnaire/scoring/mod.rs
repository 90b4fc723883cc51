mod profile;
mod rules;

pub use profile::{
    derive_composites, select_dominant_profile, CombinedScores, Composite, DominantProfile,
};
pub use rules::effective_score;

use super::answers::AnswerSet;
use super::bank::QuestionBank;
use super::domain::{Category, ScoreBounds};
use serde::{Deserialize, Serialize};

/// Category totals for one completed questionnaire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(rename = "self")]
    pub oneself: u16,
    pub others: u16,
    pub object: u16,
    pub situation: u16,
}

impl Scores {
    pub fn get(&self, category: Category) -> u16 {
        match category {
            Category::Oneself => self.oneself,
            Category::Others => self.others,
            Category::Object => self.object,
            Category::Situation => self.situation,
        }
    }

    pub(crate) fn add(&mut self, category: Category, score: u16) {
        let slot = match category {
            Category::Oneself => &mut self.oneself,
            Category::Others => &mut self.others,
            Category::Object => &mut self.object,
            Category::Situation => &mut self.situation,
        };
        *slot += score;
    }
}

/// Stateless engine turning answer sets into totals, composites, and a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    bank: QuestionBank,
}

impl ScoringEngine {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> QuestionBank {
        self.bank
    }

    /// Category totals; unanswered items count as neutral.
    pub fn finalize(&self, answers: &AnswerSet) -> Scores {
        rules::aggregate(&self.bank, answers)
    }

    pub fn evaluate(&self, answers: &AnswerSet) -> ScoreOutcome {
        let scores = self.finalize(answers);
        let combined = derive_composites(&scores);
        let dominant = select_dominant_profile(&combined);
        let answered = answers.len();

        ScoreOutcome {
            scores,
            combined,
            dominant,
            answered,
            unanswered: self.bank.item_count().saturating_sub(answered),
        }
    }

    /// Reject category totals no answer set over this bank could produce.
    pub fn check_scores(&self, scores: &Scores) -> Result<(), ScoreError> {
        for category in Category::ordered() {
            let value = scores.get(category);
            let bounds = self.category_bounds(category);
            if !bounds.contains(value) {
                return Err(ScoreError::OutOfBounds {
                    category,
                    value,
                    bounds,
                });
            }
        }
        Ok(())
    }

    pub fn category_bounds(&self, category: Category) -> ScoreBounds {
        self.bank.category_bounds(category)
    }

    pub fn composite_bounds(&self, composite: Composite) -> ScoreBounds {
        let (first, second) = composite.categories();
        self.category_bounds(first)
            .combine(self.category_bounds(second))
    }

    /// Smallest minimum and largest maximum across all composites.
    pub fn composite_range(&self) -> ScoreBounds {
        Composite::ordered()
            .into_iter()
            .map(|composite| self.composite_bounds(composite))
            .fold(
                ScoreBounds {
                    min: u16::MAX,
                    max: 0,
                },
                |acc, bounds| ScoreBounds {
                    min: acc.min.min(bounds.min),
                    max: acc.max.max(bounds.max),
                },
            )
    }
}

/// Category totals supplied from outside the engine that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error(
        "{} score {value} is outside the attainable range {}-{}",
        .category.key(),
        .bounds.min,
        .bounds.max
    )]
    OutOfBounds {
        category: Category,
        value: u16,
        bounds: ScoreBounds,
    },
}

/// Everything derived from one answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub scores: Scores,
    pub combined: CombinedScores,
    pub dominant: DominantProfile,
    pub answered: usize,
    pub unanswered: usize,
}
