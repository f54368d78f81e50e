use crate::core::{ChatSink, ConfigProvider, GoogleChatMessage};
use crate::utils::error::{AdapterError, Result};
use reqwest::{Client, StatusCode};

/// Posts messages to a Google Chat incoming webhook.
#[derive(Debug, Clone)]
pub struct GoogleChatClient {
    client: Client,
    webhook_url: String,
}

impl GoogleChatClient {
    pub fn new(client: Client, webhook_url: impl Into<String>) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(client_build_error)?;
        Ok(Self::new(client, config.webhook_url()))
    }
}

fn client_build_error(e: reqwest::Error) -> AdapterError {
    AdapterError::ConfigError {
        message: format!("Failed to build HTTP client: {}", e),
    }
}

#[async_trait::async_trait]
impl ChatSink for GoogleChatClient {
    async fn send(&self, message: &GoogleChatMessage) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error forwarding to Google Chat: {}", e);
                AdapterError::Forward(e)
            })?;

        // Google Chat answers 200 on success; anything else is a failed delivery
        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!("Google Chat webhook failed with status: {}", status);
            return Err(AdapterError::WebhookStatus {
                status: status.as_u16(),
            });
        }

        tracing::debug!("Google Chat webhook accepted message");
        Ok(())
    }
}
