use empathy_profile::config::NarrativeConfig;
use empathy_profile::error::AppError;
use empathy_profile::questionnaire::{
    AssessmentService, Category, DisabledNarrator, GeminiNarrator, NarrativeGenerator,
    QuestionBank,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SharedAssessmentService = Arc<AssessmentService<dyn NarrativeGenerator>>;

/// Gemini when a key is configured and `offline` is not requested, otherwise the fallback texts.
pub(crate) fn build_narrator(
    config: &NarrativeConfig,
    offline: bool,
) -> Result<Arc<dyn NarrativeGenerator>, AppError> {
    if offline {
        info!("narrative generation switched off; fallback descriptions will be used");
        return Ok(Arc::new(DisabledNarrator));
    }

    match GeminiNarrator::from_config(config)? {
        Some(narrator) => {
            info!(model = narrator.model(), "narrative generation enabled");
            Ok(Arc::new(narrator))
        }
        None => {
            info!("no narrative API key configured; fallback descriptions will be used");
            Ok(Arc::new(DisabledNarrator))
        }
    }
}

pub(crate) fn build_service(narrator: Arc<dyn NarrativeGenerator>) -> SharedAssessmentService {
    Arc::new(AssessmentService::new(QuestionBank::standard(), narrator))
}

pub(crate) fn parse_answer_pair(raw: &str) -> Result<(u16, i64), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<u16>()
        .map_err(|err| format!("failed to parse item id in '{raw}' ({err})"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("failed to parse answer value in '{raw}' ({err})"))?;
    Ok((id, value))
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, String> {
    let key = raw.trim().to_ascii_lowercase();
    Category::ordered()
        .into_iter()
        .find(|category| category.key() == key)
        .ok_or_else(|| {
            format!("unknown category '{raw}' (expected self, others, object, or situation)")
        })
}
