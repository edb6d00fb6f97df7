use super::ApiClient;
use crate::error::{FetchError, FetchResult};
use serde::{Deserialize, Serialize};

const SERVICE: &str = "Gemini";

pub const NO_GENERATION: &str = "I'm sorry, I couldn't generate a response.";
pub const GENERATION_UNAVAILABLE: &str =
    "I apologize, but I'm having trouble processing your request right now.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                parts: [RequestPart { text }],
            }],
        }
    }
}

// Only the first candidate and its first part are decoded; siblings may be
// malformed. A missing level is an absent answer, not an error.
#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl ApiClient {
    /// Free-text answer from the configured Gemini model
    pub async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!("Gemini response carried no candidate text");
                NO_GENERATION.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, model = %self.model, "Gemini request failed");
                GENERATION_UNAVAILABLE.to_string()
            }
        }
    }

    async fn try_generate(&self, prompt: &str) -> FetchResult<Option<String>> {
        let api_key = self
            .gemini_api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential("Gemini API key"))?;

        let url = format!(
            "{}/v1/models/{}:generateContent",
            self.endpoints.gemini_base_url, self.model
        );
        let request = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&GenerateRequest::new(prompt));

        let body = self.send(SERVICE, request).await?;
        Ok(first_candidate_text(&body))
    }
}

/// Text of the first part of the first candidate, if there is one.
///
/// A body that is not JSON at all counts as absent, same as an empty envelope.
fn first_candidate_text(body: &str) -> Option<String> {
    let response: GenerateResponse = serde_json::from_str(body).ok()?;
    let first = response.candidates?.into_iter().next()?;
    let candidate: Candidate = serde_json::from_value(first).ok()?;
    let part = candidate.content?.parts?.into_iter().next()?;
    let part: ResponsePart = serde_json::from_value(part).ok()?;
    part.text.filter(|text| !text.is_empty())
}
