use crate::domain::model::{AlertmanagerPayload, GoogleChatMessage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn webhook_url(&self) -> &str;
    fn listen_addr(&self) -> SocketAddr;
    fn request_timeout(&self) -> Duration;
}

/// Destination for rendered chat messages.
#[async_trait]
pub trait ChatSink: Send + Sync {
    async fn send(&self, message: &GoogleChatMessage) -> Result<()>;
}

/// One pass of the adapter: decode the webhook body, render it, forward it.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, body: &[u8]) -> Result<AlertmanagerPayload>;
    async fn transform(&self, payload: AlertmanagerPayload) -> Result<GoogleChatMessage>;
    async fn load(&self, message: GoogleChatMessage) -> Result<()>;
}
