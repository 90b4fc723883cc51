use std::collections::BTreeMap;

use serde::Serialize;

use super::bank::QuestionBank;
use super::domain::{ItemId, Likert};

/// Rejection raised at the input boundary; invalid answers never enter an [`AnswerSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("answer {value} for item {item} is outside the 1-5 scale")]
    InvalidAnswerValue { item: ItemId, value: i64 },
    #[error("item {0} is not part of the questionnaire")]
    UnknownItem(ItemId),
}

/// Validated answers keyed by item id.
///
/// Items missing from the set score as the neutral midpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<ItemId, Likert>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw `(item id, value)` pairs against the catalogue.
    pub fn from_raw<I>(bank: &QuestionBank, raw: I) -> Result<Self, AnswerError>
    where
        I: IntoIterator<Item = (u16, i64)>,
    {
        let mut answers = Self::new();
        for (item, value) in raw {
            answers.record(bank, ItemId(item), value)?;
        }
        Ok(answers)
    }

    /// Record or overwrite the answer for `item`.
    pub fn record(
        &mut self,
        bank: &QuestionBank,
        item: ItemId,
        value: i64,
    ) -> Result<Likert, AnswerError> {
        if !bank.contains(item) {
            return Err(AnswerError::UnknownItem(item));
        }
        let answer = Likert::new(value).ok_or(AnswerError::InvalidAnswerValue { item, value })?;
        self.answers.insert(item, answer);
        Ok(answer)
    }

    pub fn get(&self, item: ItemId) -> Option<Likert> {
        self.answers.get(&item).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, Likert)> + '_ {
        self.answers.iter().map(|(id, answer)| (*id, *answer))
    }

    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        bank.all_items().all(|item| self.answers.contains_key(&item.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rejects_unknown_items() {
        let bank = QuestionBank::standard();
        let mut answers = AnswerSet::new();
        assert_eq!(
            answers.record(&bank, ItemId(31), 3),
            Err(AnswerError::UnknownItem(ItemId(31)))
        );
        assert!(answers.is_empty());
    }

    #[test]
    fn record_rejects_values_off_the_scale() {
        let bank = QuestionBank::standard();
        let mut answers = AnswerSet::new();
        assert_eq!(
            answers.record(&bank, ItemId(2), 6),
            Err(AnswerError::InvalidAnswerValue {
                item: ItemId(2),
                value: 6
            })
        );
        assert_eq!(answers.get(ItemId(2)), None);
    }

    #[test]
    fn record_overwrites_previous_answer() {
        let bank = QuestionBank::standard();
        let mut answers = AnswerSet::new();
        answers.record(&bank, ItemId(4), 1).expect("valid answer");
        answers.record(&bank, ItemId(4), 5).expect("valid answer");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(ItemId(4)).map(Likert::value), Some(5));
    }

    #[test]
    fn from_raw_stops_at_first_invalid_pair() {
        let bank = QuestionBank::standard();
        let err = AnswerSet::from_raw(&bank, [(1, 4), (2, 0), (99, 3)]).unwrap_err();
        assert_eq!(
            err,
            AnswerError::InvalidAnswerValue {
                item: ItemId(2),
                value: 0
            }
        );
    }

    #[test]
    fn completeness_tracks_every_catalogue_item() {
        let bank = QuestionBank::standard();
        let partial = AnswerSet::from_raw(&bank, [(1, 3)]).expect("valid");
        assert!(!partial.is_complete(&bank));
        let full = AnswerSet::from_raw(&bank, (1..=30).map(|id| (id, 2))).expect("valid");
        assert!(full.is_complete(&bank));
    }
}
