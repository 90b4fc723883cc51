use serde::{Deserialize, Serialize};

use super::super::domain::Category;
use super::Scores;

/// Pairing of one "who" category with one "what" category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Composite {
    SelfObject,
    OthersObject,
    SelfSituation,
    OthersSituation,
}

impl Composite {
    /// Declaration order; earlier composites win ties.
    pub const fn ordered() -> [Self; 4] {
        [
            Self::SelfObject,
            Self::OthersObject,
            Self::SelfSituation,
            Self::OthersSituation,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::SelfObject => "selfObject",
            Self::OthersObject => "othersObject",
            Self::SelfSituation => "selfSituation",
            Self::OthersSituation => "othersSituation",
        }
    }

    /// Profile label reported when this composite dominates.
    pub const fn profile_label(self) -> &'static str {
        match self {
            Self::SelfObject => "self-object type",
            Self::OthersObject => "others-object type",
            Self::SelfSituation => "self-situation type",
            Self::OthersSituation => "others-situation type",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::SelfObject => "Self & Object",
            Self::OthersObject => "Others & Object",
            Self::SelfSituation => "Self & Situation",
            Self::OthersSituation => "Others & Situation",
        }
    }

    pub const fn categories(self) -> (Category, Category) {
        match self {
            Self::SelfObject => (Category::Oneself, Category::Object),
            Self::OthersObject => (Category::Others, Category::Object),
            Self::SelfSituation => (Category::Oneself, Category::Situation),
            Self::OthersSituation => (Category::Others, Category::Situation),
        }
    }
}

/// Pairwise sums of category totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedScores {
    pub self_object: u16,
    pub others_object: u16,
    pub self_situation: u16,
    pub others_situation: u16,
}

impl CombinedScores {
    pub fn get(&self, composite: Composite) -> u16 {
        match composite {
            Composite::SelfObject => self.self_object,
            Composite::OthersObject => self.others_object,
            Composite::SelfSituation => self.self_situation,
            Composite::OthersSituation => self.others_situation,
        }
    }

    /// `(composite, value)` pairs in declaration order.
    pub fn entries(&self) -> [(Composite, u16); 4] {
        Composite::ordered().map(|composite| (composite, self.get(composite)))
    }
}

/// The composite with the highest value and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DominantProfile {
    pub composite: Composite,
    pub label: &'static str,
    pub score: u16,
}

pub fn derive_composites(scores: &Scores) -> CombinedScores {
    let pair = |first: Category, second: Category| {
        scores.get(first).saturating_add(scores.get(second))
    };
    CombinedScores {
        self_object: pair(Category::Oneself, Category::Object),
        others_object: pair(Category::Others, Category::Object),
        self_situation: pair(Category::Oneself, Category::Situation),
        others_situation: pair(Category::Others, Category::Situation),
    }
}

/// Pick the strictly greatest composite, scanning in declaration order.
pub fn select_dominant_profile(combined: &CombinedScores) -> DominantProfile {
    let mut best: Option<(Composite, u16)> = None;

    for (composite, value) in combined.entries() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((composite, value)),
        }
    }

    let (composite, score) = best.unwrap_or((Composite::SelfObject, combined.self_object));
    DominantProfile {
        composite,
        label: composite.profile_label(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined(values: [u16; 4]) -> CombinedScores {
        CombinedScores {
            self_object: values[0],
            others_object: values[1],
            self_situation: values[2],
            others_situation: values[3],
        }
    }

    #[test]
    fn composites_are_pairwise_sums() {
        let scores = Scores {
            oneself: 30,
            others: 25,
            object: 20,
            situation: 12,
        };
        let combined = derive_composites(&scores);
        assert_eq!(combined.self_object, 50);
        assert_eq!(combined.others_object, 45);
        assert_eq!(combined.self_situation, 42);
        assert_eq!(combined.others_situation, 37);
    }

    #[test]
    fn composites_saturate_at_the_type_limit() {
        let scores = Scores {
            oneself: u16::MAX,
            others: 0,
            object: 1,
            situation: 0,
        };
        let combined = derive_composites(&scores);
        assert_eq!(combined.self_object, u16::MAX);
        assert_eq!(combined.others_object, 1);
    }

    #[test]
    fn ties_resolve_to_the_earliest_declared_composite() {
        let dominant = select_dominant_profile(&combined([40, 40, 10, 10]));
        assert_eq!(dominant.composite, Composite::SelfObject);
        assert_eq!(dominant.label, "self-object type");

        let dominant = select_dominant_profile(&combined([10, 20, 20, 20]));
        assert_eq!(dominant.composite, Composite::OthersObject);
    }

    #[test]
    fn strict_maximum_wins_regardless_of_position() {
        let dominant = select_dominant_profile(&combined([30, 31, 29, 32]));
        assert_eq!(dominant.composite, Composite::OthersSituation);
        assert_eq!(dominant.score, 32);
        assert_eq!(dominant.label, "others-situation type");
    }

    #[test]
    fn derivation_is_idempotent() {
        let scores = Scores {
            oneself: 22,
            others: 24,
            object: 24,
            situation: 18,
        };
        let first = derive_composites(&scores);
        let second = derive_composites(&scores);
        assert_eq!(first, second);
        assert_eq!(
            select_dominant_profile(&first),
            select_dominant_profile(&second)
        );
    }

    #[test]
    fn combined_scores_use_camel_case_keys() {
        let json = serde_json::to_value(combined([1, 2, 3, 4])).expect("serializes");
        assert_eq!(json["selfObject"], 1);
        assert_eq!(json["othersSituation"], 4);
    }
}
