use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs one webhook delivery through a [`Pipeline`].
pub struct RelayEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RelayEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, body: &[u8]) -> Result<()> {
        // Extract
        let payload = self.pipeline.extract(body).await?;
        tracing::info!(
            status = %payload.status,
            alerts = payload.alerts.len(),
            "Received Alertmanager notification"
        );

        // Transform
        let message = self.pipeline.transform(payload).await?;
        tracing::debug!("Rendered chat message ({} chars)", message.text.chars().count());

        // Load
        self.pipeline.load(message).await?;
        tracing::info!("Alert forwarded to Google Chat");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AlertmanagerPayload, GoogleChatMessage};
    use crate::utils::error::AdapterError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPipeline {
        loads: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Pipeline for CountingPipeline {
        async fn extract(&self, body: &[u8]) -> Result<AlertmanagerPayload> {
            if body.is_empty() {
                return Err(AdapterError::InvalidPayload {
                    message: "empty".to_string(),
                });
            }
            Ok(AlertmanagerPayload::default())
        }

        async fn transform(&self, _payload: AlertmanagerPayload) -> Result<GoogleChatMessage> {
            Ok(GoogleChatMessage::text("rendered"))
        }

        async fn load(&self, _message: GoogleChatMessage) -> Result<()> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_run_executes_all_phases() {
        let engine = RelayEngine::new(CountingPipeline::default());
        engine.run(b"{}").await.unwrap();
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_extract_failure_skips_load() {
        let engine = RelayEngine::new(CountingPipeline::default());
        assert!(engine.run(b"").await.is_err());
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }
}
