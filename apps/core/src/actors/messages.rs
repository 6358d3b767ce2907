use serde::Serialize;
use tokio::sync::oneshot;

use crate::brain::AIResponse;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// The actor's mailbox or reply channel was closed.
    #[error("Actor channel closed: {0}")]
    ChannelClosed(String),
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `EngineActor`.
#[derive(Debug)]
pub enum EngineMessage {
    /// A request to generate a reply for one user input.
    Respond {
        input: String,
        /// A channel to send the generated reply back.
        responder: oneshot::Sender<AIResponse>,
    },
}

/// Messages that can be sent to the `SupervisorActor`.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// A request to run one conversation turn.
    ProcessUserMessage {
        content: String,
        /// A channel to send the assistant reply back.
        responder: oneshot::Sender<Result<AIResponse, AppError>>,
    },
    /// A command to stop the supervisor. The transcript is dropped with it.
    Shutdown,
}
