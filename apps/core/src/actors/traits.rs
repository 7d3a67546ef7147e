use crate::actors::messages::AppError;
use async_trait::async_trait;

/// Defines the public interface for whatever produces answers to questions.
///
/// The controller only ever talks to this trait, so the canned demo generator
/// can be swapped for a remote backend without touching the store or the views.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
    /// Produces the answer for an already trimmed, non-empty question.
    async fn respond(&self, question: String) -> Result<String, AppError>;
}

/// The suspension point standing in for network latency.
///
/// Production uses a timer; tests substitute an immediate resolution.
#[async_trait]
pub trait Latency: Send + Sync + 'static {
    async fn wait(&self);
}
