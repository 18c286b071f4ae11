use std::sync::Arc;

use guide_core::model::AdviceSettings;
use tracing::{debug, warn};

use super::{AdviceClient, AdviceRequest, GeminiClient};
use crate::error::AdviceError;

/// Reply shown when the advice backend is unreachable or not configured.
pub const CONNECTION_FALLBACK: &str = "I'm having trouble connecting to the JAMB help database. \
Please ensure your internet is active and try again.";

/// Reply shown when the backend answers with nothing.
pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't process that. Try again.";

/// Turns a free-text question into exactly one reply string.
#[derive(Clone)]
pub struct AdviceRelay {
    settings: AdviceSettings,
    client: Option<Arc<dyn AdviceClient>>,
}

impl AdviceRelay {
    /// Build a relay from settings. Without an API key the relay answers every
    /// question with the connection fallback.
    #[must_use]
    pub fn from_settings(settings: AdviceSettings) -> Self {
        let client = settings.api_key().map(|key| {
            Arc::new(GeminiClient::new(settings.base_url(), key)) as Arc<dyn AdviceClient>
        });
        Self { settings, client }
    }

    #[must_use]
    pub fn with_client(settings: AdviceSettings, client: Arc<dyn AdviceClient>) -> Self {
        Self {
            settings,
            client: Some(client),
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.client.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &AdviceSettings {
        &self.settings
    }

    /// Ask the advice model. Never fails: errors map to fixed fallback replies.
    pub async fn get_advice(&self, query: &str) -> String {
        let request = AdviceRequest {
            model: self.settings.model().to_string(),
            system_instruction: self.settings.system_instruction().to_string(),
            prompt: query.to_string(),
        };

        let result = match self.client.as_ref() {
            Some(client) => client.generate(&request).await,
            None => Err(AdviceError::Disabled),
        };

        match result {
            Ok(text) if text.trim().is_empty() => EMPTY_REPLY_FALLBACK.to_string(),
            Ok(text) => text,
            Err(AdviceError::Disabled) => {
                debug!("advice disabled; returning connection fallback");
                CONNECTION_FALLBACK.to_string()
            }
            Err(err) => {
                warn!(error = %err, "advice request failed");
                CONNECTION_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relay_without_key_returns_connection_fallback() {
        let relay = AdviceRelay::from_settings(AdviceSettings::default());
        assert!(!relay.enabled());
        assert_eq!(relay.get_advice("When does registration end?").await, CONNECTION_FALLBACK);
    }
}
