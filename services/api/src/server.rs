use crate::cli::ServeArgs;
use crate::infra::{build_narrator, build_service, AppState};
use crate::routes::with_questionnaire_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use empathy_profile::config::{AppConfig, NarrativeConfig};
use empathy_profile::error::AppError;
use empathy_profile::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    config.server.host = args.host.unwrap_or(config.server.host);
    config.server.port = args.port.unwrap_or(config.server.port);

    telemetry::init(&config.telemetry)?;

    let questionnaire = build_service(build_narrator(&config.narrative, false)?);
    let item_count = questionnaire.bank().item_count();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let ready = Arc::new(AtomicBool::new(false));
    let app = with_questionnaire_routes(questionnaire)
        .layer(Extension(AppState {
            readiness: ready.clone(),
            metrics: Arc::new(prometheus_handle),
        }))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    ready.store(true, Ordering::Release);

    info!(
        env = ?config.environment,
        %addr,
        items = item_count,
        narrative = narrative_mode(&config.narrative),
        "empathy profile questionnaire listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Model name when descriptions are generated, otherwise `fallback`.
fn narrative_mode(config: &NarrativeConfig) -> &str {
    if config.is_enabled() {
        &config.model
    } else {
        "fallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn narrative(api_key: Option<&str>) -> NarrativeConfig {
        NarrativeConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-2.5-flash".to_string(),
            endpoint: NarrativeConfig::DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(20),
        }
    }

    #[test]
    fn narrative_mode_names_the_model_only_with_a_key() {
        assert_eq!(narrative_mode(&narrative(Some("key"))), "gemini-2.5-flash");
        assert_eq!(narrative_mode(&narrative(None)), "fallback");
    }
}
