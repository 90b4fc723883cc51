use serde::Serialize;

use super::answers::{AnswerError, AnswerSet};
use super::bank::{BankError, QuestionBank};
use super::domain::{Item, ItemId, Likert};
use super::scoring::{ScoreOutcome, ScoringEngine};

/// Lifecycle of one respondent's pass through the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Completed,
}

impl SessionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("operation requires a session in progress (current state: {})", .0.label())]
    NotInProgress(SessionState),
    #[error("only a completed session can be retaken (current state: {})", .0.label())]
    NotCompleted(SessionState),
    #[error("item {answered} is not the current item {current}")]
    NotCurrentItem { answered: ItemId, current: ItemId },
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// What happened after an answer was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(&'static Item),
    Completed(ScoreOutcome),
}

/// Single-respondent session owning the answer set and the current position.
#[derive(Debug, Clone)]
pub struct Session {
    engine: ScoringEngine,
    state: SessionState,
    index: usize,
    answers: AnswerSet,
    outcome: Option<ScoreOutcome>,
}

impl Session {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            engine: ScoringEngine::new(bank),
            state: SessionState::NotStarted,
            index: 0,
            answers: AnswerSet::new(),
            outcome: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn bank(&self) -> QuestionBank {
        self.engine.bank()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Begin (or restart) answering from the first item with an empty answer set.
    pub fn start(&mut self) -> Result<&'static Item, SessionError> {
        self.reset();
        let first = self.bank().item_at(0)?;
        self.state = SessionState::InProgress;
        Ok(first)
    }

    pub fn current_item(&self) -> Result<&'static Item, SessionError> {
        self.require_in_progress()?;
        Ok(self.bank().item_at(self.index)?)
    }

    /// Record the answer for the current item and move to the next one.
    ///
    /// Answering the last item completes the session and computes scores once.
    pub fn record_answer(&mut self, item: ItemId, value: i64) -> Result<Advance, SessionError> {
        let current = self.current_item()?;
        if current.id != item {
            return Err(SessionError::NotCurrentItem {
                answered: item,
                current: current.id,
            });
        }

        let bank = self.bank();
        self.answers.record(&bank, item, value)?;

        if self.index + 1 < bank.item_count() {
            self.index += 1;
            return Ok(Advance::Next(bank.item_at(self.index)?));
        }

        let answers = std::mem::take(&mut self.answers);
        let outcome = self.engine.evaluate(&answers);
        self.outcome = Some(outcome);
        self.state = SessionState::Completed;
        Ok(Advance::Completed(outcome))
    }

    /// Step back one item; never below the first. Recorded answers are kept.
    pub fn go_to_previous(&mut self) -> Result<&'static Item, SessionError> {
        self.require_in_progress()?;
        self.index = self.index.saturating_sub(1);
        Ok(self.bank().item_at(self.index)?)
    }

    /// Answer previously recorded for `item`, if any.
    pub fn answer_for(&self, item: ItemId) -> Option<Likert> {
        self.answers.get(item)
    }

    /// Fraction of the questionnaire passed, based on the current position.
    pub fn progress(&self) -> f32 {
        match self.state {
            SessionState::NotStarted => 0.0,
            SessionState::InProgress => self.index as f32 / self.bank().item_count() as f32,
            SessionState::Completed => 1.0,
        }
    }

    pub fn outcome(&self) -> Option<&ScoreOutcome> {
        self.outcome.as_ref()
    }

    /// Discard the completed result and return to the start screen.
    pub fn retake(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Completed {
            return Err(SessionError::NotCompleted(self.state));
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.index = 0;
        self.answers = AnswerSet::new();
        self.outcome = None;
    }

    fn require_in_progress(&self) -> Result<(), SessionError> {
        if self.state == SessionState::InProgress {
            Ok(())
        } else {
            Err(SessionError::NotInProgress(self.state))
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(QuestionBank::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_current(session: &mut Session, value: i64) -> Advance {
        let item = session.current_item().expect("session in progress").id;
        session.record_answer(item, value).expect("answer accepted")
    }

    #[test]
    fn new_session_is_not_started() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(
            session.current_item(),
            Err(SessionError::NotInProgress(SessionState::NotStarted))
        );
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn answering_advances_to_next_item() {
        let mut session = Session::default();
        let first = session.start().expect("session starts");
        assert_eq!(first.id, ItemId(1));

        match answer_current(&mut session, 4) {
            Advance::Next(item) => assert_eq!(item.id, ItemId(2)),
            other => panic!("expected next item, got {other:?}"),
        }
        assert_eq!(session.current_index(), 1);
        assert!((session.progress() - 1.0 / 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn previous_keeps_answers_and_floors_at_zero() {
        let mut session = Session::default();
        session.start().expect("session starts");
        answer_current(&mut session, 5);

        let back = session.go_to_previous().expect("can go back");
        assert_eq!(back.id, ItemId(1));
        assert_eq!(session.answer_for(ItemId(1)).map(Likert::value), Some(5));

        let still_first = session.go_to_previous().expect("floor at first item");
        assert_eq!(still_first.id, ItemId(1));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn rejects_answers_for_other_items() {
        let mut session = Session::default();
        session.start().expect("session starts");
        assert_eq!(
            session.record_answer(ItemId(5), 3),
            Err(SessionError::NotCurrentItem {
                answered: ItemId(5),
                current: ItemId(1)
            })
        );
    }

    #[test]
    fn invalid_values_do_not_advance() {
        let mut session = Session::default();
        session.start().expect("session starts");
        let err = session.record_answer(ItemId(1), 9).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Answer(AnswerError::InvalidAnswerValue { value: 9, .. })
        ));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answer_for(ItemId(1)), None);
    }

    #[test]
    fn answering_last_item_completes_once() {
        let mut session = Session::default();
        session.start().expect("session starts");

        let mut completed = None;
        for _ in 0..30 {
            if let Advance::Completed(outcome) = answer_current(&mut session, 3) {
                completed = Some(outcome);
            }
        }

        let outcome = completed.expect("last answer completes the session");
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(session.outcome(), Some(&outcome));
        assert_eq!(outcome.answered, 30);
        assert_eq!(outcome.scores.oneself, 24);
        assert_eq!(session.answer_for(ItemId(1)), None, "answers discarded");
        assert!(matches!(
            session.record_answer(ItemId(30), 3),
            Err(SessionError::NotInProgress(SessionState::Completed))
        ));
    }

    #[test]
    fn retake_clears_result_and_requires_completion() {
        let mut session = Session::default();
        assert_eq!(
            session.retake(),
            Err(SessionError::NotCompleted(SessionState::NotStarted))
        );

        session.start().expect("session starts");
        for _ in 0..30 {
            answer_current(&mut session, 2);
        }
        session.retake().expect("completed session can be retaken");
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.outcome().is_none());
        assert_eq!(session.current_index(), 0);
    }
}
