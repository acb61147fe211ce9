pub mod fallback;
pub mod gemini;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;

/// AI-written review of one app. Lives only as long as the details view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawReview")]
pub struct ReviewRecord {
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// 0–100
    pub safety_score: u8,
    pub alternative_apps: Vec<String>,
    pub technical_opinion: String,
}

// Every field required; a score outside 0-100 is clamped rather than rejected.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReview {
    summary: String,
    pros: Vec<String>,
    cons: Vec<String>,
    safety_score: i64,
    alternative_apps: Vec<String>,
    technical_opinion: String,
}

impl From<RawReview> for ReviewRecord {
    fn from(raw: RawReview) -> Self {
        Self {
            summary: raw.summary,
            pros: raw.pros,
            cons: raw.cons,
            safety_score: raw.safety_score.clamp(0, 100) as u8,
            alternative_apps: raw.alternative_apps,
            technical_opinion: raw.technical_opinion,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("no response text from AI")]
    EmptyResponse,
    #[error("malformed review: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Connection details for the review service.
#[derive(Debug, Clone)]
pub struct ReviewSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl ReviewSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            api_key: cfg.resolve_api_key(),
            model: cfg.model.clone(),
            api_url: cfg.api_url.clone(),
            timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }
}

/// Fetches reviews from the Gemini API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ReviewClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

impl ReviewClient {
    pub fn new(settings: ReviewSettings) -> Result<Self, ReviewError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ReviewError::Client)?;
        Ok(Self {
            http,
            api_key: settings.api_key.filter(|k| !k.trim().is_empty()),
            model: settings.model,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ReviewError> {
        Self::new(ReviewSettings::from_config(cfg))
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_url, self.model)
    }

    /// Always resolves to a usable review. Without a credential no request is
    /// made; on any failure the error is logged and a fallback returned.
    pub async fn fetch(&self, app_name: &str, platform: &str) -> ReviewRecord {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!("No API key configured, using local review for {app_name}");
            return fallback::unconfigured(app_name, platform);
        };

        match self.request(api_key, app_name, platform).await {
            Ok(review) => review,
            Err(e) => {
                tracing::warn!("AI review for {app_name} failed: {e}");
                fallback::unavailable(app_name)
            }
        }
    }

    async fn request(
        &self,
        api_key: &str,
        app_name: &str,
        platform: &str,
    ) -> Result<ReviewRecord, ReviewError> {
        let body = gemini::review_request(app_name, platform);
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ReviewError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: gemini::GenerateResponse = resp.json().await?;
        let text = parsed.text().ok_or(ReviewError::EmptyResponse)?;
        parse_review(&text)
    }
}

/// Parse the structured-output text into a review.
pub fn parse_review(text: &str) -> Result<ReviewRecord, ReviewError> {
    Ok(serde_json::from_str(text.trim())?)
}
