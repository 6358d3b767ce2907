use crate::actors::messages::{ActorError, AppError, EngineMessage};
use crate::actors::traits::Responder;
use crate::brain::{AIResponse, ResponseEngine};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info};

/// A handle to the `EngineActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running engine actor. The `ResponseEngine` itself needs exclusive access for its
/// random source, so it lives inside the actor task.
#[derive(Clone)]
pub struct EngineActorHandle {
    sender: mpsc::Sender<EngineMessage>,
    reply_timeout: Duration,
}

impl EngineActorHandle {
    /// Spawns the engine actor in a new Tokio task and returns a handle to it.
    ///
    /// `reply_timeout` bounds how long `respond` waits for the actor.
    pub fn new(engine: ResponseEngine, reply_timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = EngineActorRunner { receiver, engine };
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            reply_timeout,
        }
    }
}

#[async_trait]
impl Responder for EngineActorHandle {
    async fn respond(&self, input: String) -> Result<AIResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = EngineMessage::Respond {
            input,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| ActorError::ChannelClosed(e.to_string()))?;
        let reply = timeout(self.reply_timeout, recv)
            .await?
            .map_err(|e| ActorError::ChannelClosed(e.to_string()))?;
        Ok(reply)
    }
}

// --- Actor Runner (Internal Logic) ---
struct EngineActorRunner {
    receiver: mpsc::Receiver<EngineMessage>,
    engine: ResponseEngine,
}

impl EngineActorRunner {
    async fn run(mut self) {
        info!(
            tokens = self.engine.knowledge().len(),
            "EngineActor started"
        );
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }
        info!("EngineActor stopped");
    }

    fn handle_message(&mut self, msg: EngineMessage) {
        match msg {
            EngineMessage::Respond { input, responder } => {
                let reply = self.engine.respond(&input);
                debug!(
                    category = %reply.category,
                    confidence = reply.confidence,
                    "Generated reply"
                );
                let _ = responder.send(reply);
            }
        }
    }
}
