use super::super::answers::AnswerSet;
use super::super::bank::QuestionBank;
use super::super::domain::{Item, Likert};
use super::Scores;

/// Score an item contributes: the answer (neutral when missing), mirrored for reversed items.
pub fn effective_score(item: &Item, answer: Option<Likert>) -> u8 {
    let answer = answer.unwrap_or(Likert::NEUTRAL);
    if item.is_reversed {
        answer.reversed().value()
    } else {
        answer.value()
    }
}

pub(crate) fn aggregate(bank: &QuestionBank, answers: &AnswerSet) -> Scores {
    let mut scores = Scores::default();

    for item in bank.all_items() {
        let score = effective_score(item, answers.get(item.id));
        scores.add(item.category, u16::from(score));
    }

    scores
}
