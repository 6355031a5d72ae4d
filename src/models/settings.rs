use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub monthly_budget: f64,
    pub budget_alerts: bool,
    pub alert_email: String,
    pub pro_tier: bool,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monthly_budget: 0.0,
            budget_alerts: false,
            alert_email: String::new(),
            pro_tier: false,
            currency: "USD".into(),
        }
    }
}

impl Settings {
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            monthly_budget: map
                .get("monthly_budget")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            budget_alerts: map
                .get("budget_alerts")
                .map(|s| s == "true")
                .unwrap_or(false),
            alert_email: map.get("alert_email").cloned().unwrap_or_default(),
            pro_tier: map.get("pro_tier").map(|s| s == "true").unwrap_or(false),
            currency: map.get("currency").cloned().unwrap_or_else(|| "USD".into()),
        }
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("monthly_budget".into(), self.monthly_budget.to_string());
        map.insert("budget_alerts".into(), self.budget_alerts.to_string());
        map.insert("alert_email".into(), self.alert_email.clone());
        map.insert("pro_tier".into(), self.pro_tier.to_string());
        map.insert("currency".into(), self.currency.clone());
        map
    }
}

/// Generative AI provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AiProvider {
    #[default]
    Gemini,
    OpenAiCompatible,
    /// Deterministic canned completions for development and tests.
    Mock,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAiCompatible => "openai",
            Self::Mock => "mock",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::OpenAiCompatible => "https://api.openai.com/v1",
            Self::Mock => "",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        match self {
            Self::Gemini | Self::OpenAiCompatible => true,
            Self::Mock => false,
        }
    }
}

impl FromStr for AiProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAiCompatible),
            "mock" => Ok(Self::Mock),
            _ => Err(()),
        }
    }
}

/// AI settings stored in the settings table
#[derive(Debug, Clone, Default)]
pub struct AiSettings {
    pub provider: AiProvider,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AiSettings {
    pub fn from_settings(settings: &HashMap<String, String>) -> Self {
        let provider: AiProvider = settings
            .get("ai_provider")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        let base_url = settings
            .get("ai_base_url")
            .cloned()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| provider.default_base_url().to_string());

        let api_key = settings.get("ai_api_key").cloned().unwrap_or_default();

        let model = settings
            .get("ai_model")
            .cloned()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_model_for_provider(provider).to_string());

        Self {
            provider,
            base_url,
            api_key,
            model,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.provider.requires_api_key() || !self.api_key.is_empty()
    }
}

fn default_model_for_provider(provider: AiProvider) -> &'static str {
    match provider {
        AiProvider::Gemini => "gemini-pro",
        AiProvider::OpenAiCompatible => "gpt-4o-mini",
        AiProvider::Mock => "mock",
    }
}
