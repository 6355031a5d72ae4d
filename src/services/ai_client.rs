use crate::error::{AppError, AppResult};
use crate::models::settings::{AiProvider, AiSettings};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Create an HTTP client with appropriate timeout
fn create_client() -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Send a single prompt to the configured provider and return its text
/// completion. An empty completion is an upstream failure, never a silent
/// success.
pub async fn generate_text(settings: &AiSettings, prompt: &str) -> AppResult<String> {
    if !settings.is_configured() {
        return Err(AppError::AiConfiguration(format!(
            "API key for provider '{}' is not set",
            settings.provider.as_str()
        )));
    }

    let text = match settings.provider {
        AiProvider::Gemini => generate_with_gemini(settings, prompt).await?,
        AiProvider::OpenAiCompatible => generate_with_openai_compatible(settings, prompt).await?,
        AiProvider::Mock => mock_completion(),
    };

    if text.trim().is_empty() {
        return Err(AppError::AiUpstream(format!(
            "Empty response from provider '{}'",
            settings.provider.as_str()
        )));
    }

    Ok(text)
}

async fn generate_with_gemini(settings: &AiSettings, prompt: &str) -> AppResult<String> {
    let client = create_client()?;
    let url = format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        settings.base_url.trim_end_matches('/'),
        settings.model,
        settings.api_key
    );

    #[derive(Serialize)]
    struct GeminiRequest {
        contents: Vec<Content>,
    }

    #[derive(Serialize)]
    struct Content {
        parts: Vec<Part>,
    }

    #[derive(Serialize)]
    struct Part {
        text: String,
    }

    #[derive(Deserialize)]
    struct GeminiResponse {
        candidates: Option<Vec<Candidate>>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Option<CandidateContent>,
    }

    #[derive(Deserialize)]
    struct CandidateContent {
        parts: Option<Vec<CandidatePart>>,
    }

    #[derive(Deserialize)]
    struct CandidatePart {
        text: Option<String>,
    }

    let request = GeminiRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    };

    debug!(model = %settings.model, prompt_len = prompt.len(), "Sending generation request to Gemini");

    let response = client
        .post(&url)
        .json(&request)
        .send()
        .await
        .map_err(|e| AppError::AiUpstream(format!("Gemini request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::AiUpstream(format!(
            "Gemini returned {}: {}",
            status, body
        )));
    }

    let gemini_response: GeminiResponse = response
        .json()
        .await
        .map_err(|e| AppError::AiUpstream(format!("Failed to parse Gemini response: {}", e)))?;

    let text = gemini_response
        .candidates
        .unwrap_or_default()
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.as_ref())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    Ok(text)
}

async fn generate_with_openai_compatible(settings: &AiSettings, prompt: &str) -> AppResult<String> {
    let client = create_client()?;
    let url = format!(
        "{}/chat/completions",
        settings.base_url.trim_end_matches('/')
    );

    #[derive(Serialize)]
    struct Message {
        role: String,
        content: String,
    }

    #[derive(Serialize)]
    struct OpenAiRequest {
        model: String,
        messages: Vec<Message>,
        temperature: f64,
    }

    #[derive(Deserialize)]
    struct OpenAiResponse {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: ChoiceMessage,
    }

    #[derive(Deserialize)]
    struct ChoiceMessage {
        content: String,
    }

    let request = OpenAiRequest {
        model: settings.model.clone(),
        messages: vec![Message {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
        temperature: 0.3,
    };

    debug!(model = %settings.model, prompt_len = prompt.len(), "Sending generation request to OpenAI-compatible API");

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", settings.api_key))
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|e| AppError::AiUpstream(format!("OpenAI request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::AiUpstream(format!(
            "OpenAI API returned {}: {}",
            status, body
        )));
    }

    let openai_response: OpenAiResponse = response
        .json()
        .await
        .map_err(|e| AppError::AiUpstream(format!("Failed to parse OpenAI response: {}", e)))?;

    let content = openai_response
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .unwrap_or_default();

    Ok(content)
}

/// Deterministic completion for development and tests: a short lead-in plus
/// three bullet recommendations with varied wording so the downstream parser
/// and categorizer have something realistic to chew on.
fn mock_completion() -> String {
    "Based on your spending data, here is what stands out.\n\
     \n\
     \u{2022} Reduce dining out to twice a week for a significant cut in food spending\n\
     \u{2022} Set a weekly shopping budget and review it every Sunday\n\
     \u{2022} Cancel unused streaming services for a moderate monthly gain\n"
        .to_string()
}
