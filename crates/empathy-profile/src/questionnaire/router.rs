use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{likert_options, Item, LikertOption};
use super::narrative::NarrativeGenerator;
use super::scoring::{
    derive_composites, select_dominant_profile, CombinedScores, DominantProfile, Scores,
};
use super::service::{AssessmentError, AssessmentRequest, AssessmentService};

/// Catalogue as presented to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogueView {
    pub item_count: usize,
    pub items: Vec<Item>,
    pub likert_options: Vec<LikertOption>,
}

/// Composite totals and the resulting profile for client-side scores.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeView {
    pub combined: CombinedScores,
    pub dominant: DominantProfile,
}

/// Router builder exposing the questionnaire and scoring endpoints.
pub fn questionnaire_router<G>(service: Arc<AssessmentService<G>>) -> Router
where
    G: NarrativeGenerator + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire/items", get(catalogue_handler::<G>))
        .route("/api/v1/questionnaire/items/:index", get(item_handler::<G>))
        .route(
            "/api/v1/questionnaire/assessments",
            post(assessment_handler::<G>),
        )
        .route(
            "/api/v1/questionnaire/composites",
            post(composites_handler::<G>),
        )
        .with_state(service)
}

pub(crate) async fn catalogue_handler<G>(
    State(service): State<Arc<AssessmentService<G>>>,
) -> Response
where
    G: NarrativeGenerator + ?Sized + 'static,
{
    let bank = service.bank();
    let view = CatalogueView {
        item_count: bank.item_count(),
        items: bank.all_items().copied().collect(),
        likert_options: likert_options(),
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn item_handler<G>(
    State(service): State<Arc<AssessmentService<G>>>,
    Path(index): Path<usize>,
) -> Response
where
    G: NarrativeGenerator + ?Sized + 'static,
{
    match service.bank().item_at(index) {
        Ok(item) => (StatusCode::OK, axum::Json(*item)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn assessment_handler<G>(
    State(service): State<Arc<AssessmentService<G>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    G: NarrativeGenerator + ?Sized + 'static,
{
    let answers = match service.validate(request) {
        Ok(answers) => answers,
        Err(error @ (AssessmentError::Answer(_) | AssessmentError::Import(_))) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
        }
        Err(error @ AssessmentError::AmbiguousInput) => {
            let payload = json!({
                "error": error.to_string(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let report = service.assess(answers).await;
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn composites_handler<G>(
    State(service): State<Arc<AssessmentService<G>>>,
    axum::Json(scores): axum::Json<Scores>,
) -> Response
where
    G: NarrativeGenerator + ?Sized + 'static,
{
    if let Err(error) = service.engine().check_scores(&scores) {
        let payload = json!({
            "error": error.to_string(),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let combined = derive_composites(&scores);
    let dominant = select_dominant_profile(&combined);
    (StatusCode::OK, axum::Json(CompositeView { combined, dominant })).into_response()
}
