use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{NarrativeError, NarrativeGenerator, NarrativeRequest, ResultDescriptions};
use crate::config::NarrativeConfig;
use crate::questionnaire::scoring::Composite;

/// Google Gemini `generateContent` client producing result descriptions as JSON.
pub struct GeminiNarrator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiNarrator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NarrativeError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &NarrativeConfig) -> Result<Option<Self>, NarrativeError> {
        match &config.api_key {
            Some(api_key) => Self::new(
                api_key.clone(),
                config.model.clone(),
                config.endpoint.clone(),
                config.timeout,
            )
            .map(Some),
            None => Ok(None),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl std::fmt::Debug for GeminiNarrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiNarrator")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
}

fn composite_guidance(composite: Composite) -> &'static str {
    match composite {
        Composite::SelfObject => {
            "Analysis of the self and object relationship: how self-reflection \
             interacts with empathy toward things and the environment."
        }
        Composite::OthersObject => {
            "Analysis of the others and object relationship: how empathy for other \
             people extends to care for surroundings and things."
        }
        Composite::SelfSituation => {
            "Analysis of the self and situation relationship: how the respondent \
             recognises and handles their own feelings and role in specific situations."
        }
        Composite::OthersSituation => {
            "Analysis of the others and situation relationship: the ability to understand \
             others' feelings in social situations and act accordingly."
        }
    }
}

fn response_schema() -> Value {
    let mut properties = serde_json::Map::new();
    for composite in Composite::ordered() {
        properties.insert(
            composite.key().to_string(),
            json!({ "type": "STRING", "description": composite_guidance(composite) }),
        );
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": Composite::ordered().map(Composite::key),
    })
}

pub(crate) fn build_prompt(request: &NarrativeRequest) -> String {
    let mut prompt = format!(
        "The following are the results of an empathy profile questionnaire. \
         Each score ranges from {} to {}; a higher score means stronger empathy in that area.\n\
         For each area, write a 1-2 sentence psychological interpretation based on the score, \
         in a positive and encouraging tone.\n\nScores:\n",
        request.range.min, request.range.max
    );

    for (composite, value) in request.combined.entries() {
        prompt.push_str(&format!("- {} ({}): {}\n", composite.title(), composite.key(), value));
    }

    prompt.push_str("\nRespond with JSON matching the provided schema.");
    prompt
}

fn parse_descriptions(
    response: GenerateContentResponse,
) -> Result<ResultDescriptions, NarrativeError> {
    let text = response
        .candidates
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .ok_or(NarrativeError::EmptyResponse)?;

    let trimmed = strip_code_fence(text.trim());
    if trimmed.is_empty() {
        return Err(NarrativeError::EmptyResponse);
    }

    serde_json::from_str(trimmed).map_err(|err| {
        NarrativeError::InvalidResponse(format!("descriptions were not valid JSON: {err}"))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[async_trait]
impl NarrativeGenerator for GeminiNarrator {
    async fn describe(
        &self,
        request: &NarrativeRequest,
    ) -> Result<ResultDescriptions, NarrativeError> {
        let prompt = build_prompt(request);
        let body = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            NarrativeError::InvalidResponse(format!("failed to parse response: {err}"))
        })?;

        parse_descriptions(parsed)
    }
}
