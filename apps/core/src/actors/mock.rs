use crate::actors::messages::AppError;
use crate::actors::traits::{Latency, Responder};
use crate::brain;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Latency backed by the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct SleepLatency(pub Duration);

#[async_trait]
impl Latency for SleepLatency {
    async fn wait(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn wait(&self) {}
}

/// The demo responder: waits out a simulated network delay, then answers from the canned rules.
pub struct MockResponder<L: Latency = SleepLatency> {
    latency: L,
}

impl MockResponder<SleepLatency> {
    pub fn with_delay(delay: Duration) -> Self {
        Self::new(SleepLatency(delay))
    }
}

impl<L: Latency> MockResponder<L> {
    pub fn new(latency: L) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl<L: Latency> Responder for MockResponder<L> {
    async fn respond(&self, question: String) -> Result<String, AppError> {
        self.latency.wait().await;
        let answer = brain::respond(&question);
        debug!(question_len = question.len(), "Mock answer generated");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_mock_waits_for_latency() {
        let responder = MockResponder::with_delay(Duration::from_millis(30));
        let started = Instant::now();
        let answer = responder.respond("What is AI?".to_string()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert_eq!(answer, brain::answers::AI_DEFINITION);
    }

    #[tokio::test]
    async fn test_no_latency_answers_immediately() {
        let responder = MockResponder::new(NoLatency);
        let answer = responder.respond("ok".to_string()).await.unwrap();
        assert_eq!(answer, brain::answers::MORE_DETAIL);
    }
}
