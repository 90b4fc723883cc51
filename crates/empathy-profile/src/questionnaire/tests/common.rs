use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::questionnaire::bank::QuestionBank;
use crate::questionnaire::narrative::{
    NarrativeError, NarrativeGenerator, NarrativeRequest, ResultDescriptions,
};
use crate::questionnaire::scoring::CombinedScores;
use crate::questionnaire::service::AssessmentService;

/// Generator returning canned descriptions and remembering what it was asked.
#[derive(Default)]
pub(super) struct RecordingNarrator {
    calls: AtomicUsize,
    last: Mutex<Option<NarrativeRequest>>,
}

impl RecordingNarrator {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn last_combined(&self) -> Option<CombinedScores> {
        self.last
            .lock()
            .expect("narrator mutex poisoned")
            .map(|request| request.combined)
    }
}

#[async_trait]
impl NarrativeGenerator for RecordingNarrator {
    async fn describe(
        &self,
        request: &NarrativeRequest,
    ) -> Result<ResultDescriptions, NarrativeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("narrator mutex poisoned") = Some(*request);
        Ok(generated_descriptions())
    }
}

/// Generator that always times out.
pub(super) struct TimeoutNarrator;

#[async_trait]
impl NarrativeGenerator for TimeoutNarrator {
    async fn describe(
        &self,
        _request: &NarrativeRequest,
    ) -> Result<ResultDescriptions, NarrativeError> {
        Err(NarrativeError::Http("operation timed out".to_string()))
    }
}

pub(super) fn generated_descriptions() -> ResultDescriptions {
    ResultDescriptions {
        self_object: "You reflect carefully on yourself and the things you care for.".to_string(),
        others_object: "Your care for others extends to the world around you.".to_string(),
        self_situation: "You read your own role in a situation well.".to_string(),
        others_situation: "You notice how others feel when things get tense.".to_string(),
    }
}

pub(super) fn build_service() -> (
    Arc<AssessmentService<RecordingNarrator>>,
    Arc<RecordingNarrator>,
) {
    let narrator = Arc::new(RecordingNarrator::default());
    let service = Arc::new(AssessmentService::new(
        QuestionBank::standard(),
        narrator.clone(),
    ));
    (service, narrator)
}

pub(super) fn failing_service() -> Arc<AssessmentService<dyn NarrativeGenerator>> {
    let narrator: Arc<dyn NarrativeGenerator> = Arc::new(TimeoutNarrator);
    Arc::new(AssessmentService::new(QuestionBank::standard(), narrator))
}

/// Every item answered 3 except item 7 (reversed) answered 5.
pub(super) fn reference_answers() -> Vec<(u16, i64)> {
    (1..=30)
        .map(|id| if id == 7 { (id, 5) } else { (id, 3) })
        .collect()
}
