//! Prose descriptions of composite scores.
//!
//! Generation is delegated to an external service behind [`NarrativeGenerator`].
//! [`describe_or_fallback`] never fails: any generator error is logged and replaced
//! by fixed descriptions so a result can always be shown.

mod gemini;

pub use gemini::GeminiNarrator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::ScoreBounds;
use super::scoring::{CombinedScores, Composite};

/// One description per composite, keyed like [`CombinedScores`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDescriptions {
    pub self_object: String,
    pub others_object: String,
    pub self_situation: String,
    pub others_situation: String,
}

impl ResultDescriptions {
    /// Neutral text shown when no generated descriptions are available.
    pub fn fallback() -> Self {
        Self {
            self_object: "A personalised analysis could not be generated right now. \
                          Exploring how you relate to the things around you is an \
                          important part of understanding yourself."
                .to_string(),
            others_object: "A personalised analysis could not be generated right now. \
                            Caring for your surroundings together with others is the \
                            foundation of a sense of community."
                .to_string(),
            self_situation: "A personalised analysis could not be generated right now. \
                             Understanding yourself across different situations is a \
                             driving force for growth."
                .to_string(),
            others_situation: "A personalised analysis could not be generated right now. \
                               Trying to understand others in complex situations makes \
                               relationships deeper."
                .to_string(),
        }
    }

    pub fn get(&self, composite: Composite) -> &str {
        match composite {
            Composite::SelfObject => &self.self_object,
            Composite::OthersObject => &self.others_object,
            Composite::SelfSituation => &self.self_situation,
            Composite::OthersSituation => &self.others_situation,
        }
    }

    fn is_complete(&self) -> bool {
        Composite::ordered()
            .into_iter()
            .all(|composite| !self.get(composite).trim().is_empty())
    }
}

/// Payload handed to a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NarrativeRequest {
    pub combined: CombinedScores,
    pub range: ScoreBounds,
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative generation is not configured")]
    Disabled,
    #[error("narrative request failed: {0}")]
    Http(String),
    #[error("narrative service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("narrative response was empty")]
    EmptyResponse,
    #[error("invalid narrative response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        NarrativeError::Http(err.to_string())
    }
}

/// External service turning composite scores into descriptions.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn describe(
        &self,
        request: &NarrativeRequest,
    ) -> Result<ResultDescriptions, NarrativeError>;
}

/// Generator used when no service is configured; always defers to the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrator;

#[async_trait]
impl NarrativeGenerator for DisabledNarrator {
    async fn describe(
        &self,
        _request: &NarrativeRequest,
    ) -> Result<ResultDescriptions, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}

/// Whether the descriptions came from the generator or the fixed fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub descriptions: ResultDescriptions,
    pub source: NarrativeSource,
}

pub async fn describe_or_fallback<G>(generator: &G, request: &NarrativeRequest) -> Narrative
where
    G: NarrativeGenerator + ?Sized,
{
    let result = match generator.describe(request).await {
        Ok(descriptions) if descriptions.is_complete() => Ok(descriptions),
        Ok(_) => Err(NarrativeError::InvalidResponse(
            "one or more descriptions were blank".to_string(),
        )),
        Err(err) => Err(err),
    };

    match result {
        Ok(descriptions) => Narrative {
            descriptions,
            source: NarrativeSource::Generated,
        },
        Err(NarrativeError::Disabled) => {
            debug!("narrative generation disabled; using fallback descriptions");
            Narrative {
                descriptions: ResultDescriptions::fallback(),
                source: NarrativeSource::Fallback,
            }
        }
        Err(err) => {
            warn!(error = %err, "narrative generation failed; using fallback descriptions");
            Narrative {
                descriptions: ResultDescriptions::fallback(),
                source: NarrativeSource::Fallback,
            }
        }
    }
}
