use crate::actors::messages::AppError;
use crate::brain::AIResponse;
use async_trait::async_trait;

/// Defines the public interface for the reply generator behind the conversation shell.
///
/// This trait abstracts the implementation that turns user text into a reply, allowing
/// the rule-based engine to be swapped for a mock in tests or a real model later.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
    /// Generates a reply for one user input.
    async fn respond(&self, input: String) -> Result<AIResponse, AppError>;
}
