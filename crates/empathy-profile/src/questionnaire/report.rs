use chrono::{DateTime, Utc};
use serde::Serialize;

use super::narrative::{Narrative, NarrativeSource, ResultDescriptions};
use super::scoring::{CombinedScores, Composite, DominantProfile, ScoreOutcome, Scores};

/// Radar chart axes, in display order.
const RADAR_ORDER: [Composite; 4] = [
    Composite::SelfObject,
    Composite::OthersObject,
    Composite::OthersSituation,
    Composite::SelfSituation,
];

/// One spoke of the results radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RadarAxis {
    pub composite: Composite,
    pub label: &'static str,
    pub score: u16,
    pub full_mark: u16,
}

pub fn radar_axes(combined: &CombinedScores, full_mark: u16) -> Vec<RadarAxis> {
    RADAR_ORDER
        .into_iter()
        .map(|composite| RadarAxis {
            composite,
            label: axis_label(composite),
            score: combined.get(composite),
            full_mark,
        })
        .collect()
}

fn axis_label(composite: Composite) -> &'static str {
    match composite {
        Composite::SelfObject => "Self-Object",
        Composite::OthersObject => "Others-Object",
        Composite::SelfSituation => "Self-Situation",
        Composite::OthersSituation => "Others-Situation",
    }
}

/// Result card: composite title with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSection {
    pub composite: Composite,
    pub title: &'static str,
    pub score: u16,
    pub description: String,
}

/// Complete result of one assessment.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub scores: Scores,
    pub combined: CombinedScores,
    pub dominant: DominantProfile,
    pub radar: Vec<RadarAxis>,
    pub descriptions: ResultDescriptions,
    pub narrative_source: NarrativeSource,
    pub answered: usize,
    pub unanswered: usize,
    pub completed_at: DateTime<Utc>,
}

impl ProfileReport {
    pub fn new(outcome: ScoreOutcome, narrative: Narrative, full_mark: u16) -> Self {
        Self {
            scores: outcome.scores,
            combined: outcome.combined,
            dominant: outcome.dominant,
            radar: radar_axes(&outcome.combined, full_mark),
            descriptions: narrative.descriptions,
            narrative_source: narrative.source,
            answered: outcome.answered,
            unanswered: outcome.unanswered,
            completed_at: Utc::now(),
        }
    }

    /// Result cards in declaration order.
    pub fn sections(&self) -> Vec<ResultSection> {
        Composite::ordered()
            .into_iter()
            .map(|composite| ResultSection {
                composite,
                title: composite.title(),
                score: self.combined.get(composite),
                description: self.descriptions.get(composite).to_string(),
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unanswered == 0
    }
}
