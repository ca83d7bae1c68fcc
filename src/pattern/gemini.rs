use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_pattern_response, GenerationError, PatternInterpreter, PatternPatch};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pattern interpreter backed by the Gemini `generateContent` endpoint.
pub struct GeminiInterpreter {
    client: reqwest::blocking::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiInterpreter {
    pub fn new(api_base: &str, model: &str, api_key: Option<String>) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("matrix-radar/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, self.model)
    }
}

impl PatternInterpreter for GeminiInterpreter {
    fn interpret(&self, prompt: &str, unit_count: usize) -> Result<PatternPatch, GenerationError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GenerationError::MissingApiKey);
        };

        tracing::debug!(model = %self.model, "sending pattern request");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request_body(prompt, unit_count))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| GenerationError::Malformed(e.to_string()))?;
        parse_pattern_response(&parsed.text())
    }
}

pub fn request_body(prompt: &str, unit_count: usize) -> Value {
    let instruction = format!(
        "You control a matrix of {unit_count} numeric displays with IDs 1 to {unit_count}, \
         laid out as 10 rows (A-J) of 20 columns, row-major.\n\
         The user wants this pattern: \"{prompt}\".\n\
         Return JSON listing which IDs to switch on and, optionally, which value each \
         should show (00-99 or the letter 'F')."
    );
    json!({
        "contents": [{ "parts": [{ "text": instruction }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "activeIndices": {
                        "type": "ARRAY",
                        "items": { "type": "INTEGER" },
                        "description": format!("Display IDs (1-{unit_count}) to switch ON.")
                    },
                    "values": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "id": { "type": "INTEGER" },
                                "val": { "type": "STRING", "description": "Value to show: '00'-'99' or 'F'" }
                            }
                        },
                        "description": "Optional per-display values."
                    }
                },
                "required": ["activeIndices"]
            }
        }
    })
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate; empty when there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().filter_map(|p| p.text.as_deref()).collect())
            .unwrap_or_default()
    }
}
