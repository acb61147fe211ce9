//! Wire types for the `generateContent` endpoint with structured output.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const REQUIRED_FIELDS: [&str; 6] = [
    "summary",
    "pros",
    "cons",
    "safetyScore",
    "alternativeApps",
    "technicalOpinion",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate, if any text came back.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

pub fn prompt(app_name: &str, platform: &str) -> String {
    format!(
        "Write a software review for \"{app_name}\" on {platform}. Include a summary, pros, cons, a safety score (0-100), alternative apps, and a technical opinion."
    )
}

pub fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "pros": { "type": "ARRAY", "items": { "type": "STRING" } },
            "cons": { "type": "ARRAY", "items": { "type": "STRING" } },
            "safetyScore": { "type": "INTEGER" },
            "alternativeApps": { "type": "ARRAY", "items": { "type": "STRING" } },
            "technicalOpinion": { "type": "STRING" },
        },
        "required": REQUIRED_FIELDS,
    })
}

pub fn review_request(app_name: &str, platform: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: Some("user".into()),
            parts: vec![Part {
                text: Some(prompt(app_name, platform)),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: review_schema(),
        },
    }
}
