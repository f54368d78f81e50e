use crate::core::format::render_message;
use crate::core::{AlertmanagerPayload, ChatSink, GoogleChatMessage, Pipeline};
use crate::utils::error::{AdapterError, Result};

/// Alertmanager → Google Chat pipeline over any [`ChatSink`].
pub struct AlertPipeline<S: ChatSink> {
    sink: S,
}

impl<S: ChatSink> AlertPipeline<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

/// Decode the first JSON value in `body`. Anything after it is ignored.
///
/// The body goes through [`serde_json::Value`] first, so a repeated key keeps
/// its last value before field lookup happens.
pub fn decode_payload(body: &[u8]) -> Result<AlertmanagerPayload> {
    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<serde_json::Value>();

    match stream.next() {
        Some(Ok(value)) => AlertmanagerPayload::from_json(&value),
        Some(Err(e)) => Err(AdapterError::InvalidPayload {
            message: e.to_string(),
        }),
        None => Err(AdapterError::InvalidPayload {
            message: "empty request body".to_string(),
        }),
    }
}

#[async_trait::async_trait]
impl<S: ChatSink> Pipeline for AlertPipeline<S> {
    async fn extract(&self, body: &[u8]) -> Result<AlertmanagerPayload> {
        tracing::debug!("Decoding Alertmanager payload ({} bytes)", body.len());
        decode_payload(body)
    }

    async fn transform(&self, payload: AlertmanagerPayload) -> Result<GoogleChatMessage> {
        Ok(render_message(&payload))
    }

    async fn load(&self, message: GoogleChatMessage) -> Result<()> {
        self.sink.send(&message).await
    }
}
