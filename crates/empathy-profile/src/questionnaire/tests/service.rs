use super::common::*;
use crate::questionnaire::answers::{AnswerError, AnswerSet};
use crate::questionnaire::domain::ItemId;
use crate::questionnaire::import::AnswerImportError;
use crate::questionnaire::narrative::{NarrativeSource, ResultDescriptions};
use crate::questionnaire::scoring::Composite;
use crate::questionnaire::service::{AssessmentError, AssessmentRequest};

#[tokio::test]
async fn assess_scores_reference_scenario() {
    let (service, narrator) = build_service();
    let answers =
        AnswerSet::from_raw(&service.bank(), reference_answers()).expect("valid answers");

    let report = service.assess(answers).await;

    assert_eq!(report.scores.oneself, 22);
    assert_eq!(report.scores.others, 24);
    assert_eq!(report.scores.object, 24);
    assert_eq!(report.scores.situation, 18);
    assert_eq!(report.combined.self_object, 46);
    assert_eq!(report.combined.others_object, 48);
    assert_eq!(report.combined.self_situation, 40);
    assert_eq!(report.combined.others_situation, 42);
    assert_eq!(report.dominant.composite, Composite::OthersObject);
    assert_eq!(report.dominant.label, "others-object type");
    assert_eq!(report.narrative_source, NarrativeSource::Generated);
    assert_eq!(report.descriptions, generated_descriptions());
    assert!(report.is_complete());
    assert_eq!(narrator.calls(), 1);
    assert_eq!(narrator.last_combined(), Some(report.combined));
}

#[tokio::test]
async fn assess_accepts_incomplete_answer_sets() {
    let (service, _) = build_service();

    let report = service.assess(AnswerSet::new()).await;

    assert_eq!(report.scores.oneself, 24);
    assert_eq!(report.scores.situation, 18);
    assert_eq!(report.answered, 0);
    assert_eq!(report.unanswered, 30);
    assert!(!report.is_complete());
}

#[tokio::test]
async fn narrative_failures_still_produce_a_report() {
    let service = failing_service();
    let answers =
        AnswerSet::from_raw(&service.bank(), reference_answers()).expect("valid answers");

    let report = service.assess(answers).await;

    assert_eq!(report.narrative_source, NarrativeSource::Fallback);
    assert_eq!(report.descriptions, ResultDescriptions::fallback());
    assert_eq!(report.dominant.composite, Composite::OthersObject);
    assert_eq!(report.sections().len(), 4);
}

#[tokio::test]
async fn radar_full_mark_is_the_largest_composite_maximum() {
    let (service, _) = build_service();
    let report = service.assess(AnswerSet::new()).await;
    assert!(report.radar.iter().all(|axis| axis.full_mark == 80));
}

#[test]
fn validate_reads_json_answers() {
    let (service, _) = build_service();
    let request = AssessmentRequest {
        answers: reference_answers().into_iter().collect(),
        answers_csv: None,
    };
    let answers = service.validate(request).expect("valid request");
    assert_eq!(answers.len(), 30);
}

#[test]
fn validate_reads_csv_answers() {
    let (service, _) = build_service();
    let request = AssessmentRequest {
        answers: Default::default(),
        answers_csv: Some("item_id,value\n7,5\n8,4\n".to_string()),
    };
    let answers = service.validate(request).expect("valid sheet");
    assert_eq!(answers.len(), 2);
}

#[test]
fn validate_rejects_out_of_range_answers() {
    let (service, _) = build_service();
    let request = AssessmentRequest {
        answers: [(3, 0)].into_iter().collect(),
        answers_csv: None,
    };
    match service.validate(request) {
        Err(AssessmentError::Answer(AnswerError::InvalidAnswerValue { item, value })) => {
            assert_eq!(item, ItemId(3));
            assert_eq!(value, 0);
        }
        other => panic!("expected invalid answer, got {other:?}"),
    }
}

#[test]
fn validate_rejects_bad_csv_rows() {
    let (service, _) = build_service();
    let request = AssessmentRequest {
        answers: Default::default(),
        answers_csv: Some("item_id,value\n31,2\n".to_string()),
    };
    assert!(matches!(
        service.validate(request),
        Err(AssessmentError::Import(AnswerImportError::Answer(
            AnswerError::UnknownItem(ItemId(31))
        )))
    ));
}

#[test]
fn validate_rejects_mixed_inputs() {
    let (service, _) = build_service();
    let request = AssessmentRequest {
        answers: [(1, 3)].into_iter().collect(),
        answers_csv: Some("item_id,value\n2,3\n".to_string()),
    };
    assert!(matches!(
        service.validate(request),
        Err(AssessmentError::AmbiguousInput)
    ));
}
