use crate::actors::engine::EngineActorHandle;
use crate::actors::messages::{ActorError, AppError, SupervisorMessage};
use crate::actors::traits::Responder;
use crate::brain::{AIResponse, Category, KnowledgeBase, ResponseEngine};
use crate::config::AppConfig;
use crate::models::{Message, Sender, Transcript};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, error, info, instrument};

pub const WALLET_REQUIRED_RESPONSE: &str =
    "I'm sorry, but you need to connect your wallet first to use the terminal.";

/// Timing and gating knobs for the conversation shell.
#[derive(Debug, Clone)]
pub struct SupervisorOptions {
    /// Artificial "typing" pause before the assistant reply is appended.
    pub typing_delay: Duration,
    /// Upper bound on the responder call of a single turn.
    pub reply_timeout: Duration,
    /// Answer every turn with the wallet notice instead of consulting the responder.
    pub require_wallet: bool,
}

impl Default for SupervisorOptions {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(1000),
            reply_timeout: Duration::from_secs(30),
            require_wallet: false,
        }
    }
}

impl From<&AppConfig> for SupervisorOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            typing_delay: Duration::from_millis(config.typing_delay_ms),
            reply_timeout: Duration::from_secs(config.reply_timeout_secs),
            require_wallet: config.require_wallet,
        }
    }
}

/// A handle to the `SupervisorActor`.
///
/// This is the conversation shell: it owns the session transcript and the composing
/// indicator, and runs one turn at a time. Both are published through `watch`
/// channels, so they can be read while a turn is still in flight. The transcript
/// lives only as long as the actor.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
    composing: watch::Receiver<bool>,
    transcript: watch::Receiver<Transcript>,
}

impl SupervisorHandle {
    /// Creates the production shell backed by the rule-based engine actor.
    pub fn new(config: &AppConfig, knowledge: KnowledgeBase) -> Self {
        let options = SupervisorOptions::from(config);
        let engine = ResponseEngine::with_seed(knowledge, config.sentiment_seed);
        let responder = Arc::new(EngineActorHandle::new(engine, options.reply_timeout));
        Self::spawn(responder, options)
    }

    /// Spawns a shell around any `Responder` implementation.
    pub fn spawn<R: Responder>(responder: Arc<R>, options: SupervisorOptions) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let (composing_tx, composing_rx) = watch::channel(false);
        let (transcript_tx, transcript_rx) = watch::channel(Transcript::new());

        let runner = SupervisorRunner {
            receiver,
            responder,
            transcript: transcript_tx,
            composing: composing_tx,
            options,
        };
        tokio::spawn(async move { runner.run().await });

        Self {
            sender,
            composing: composing_rx,
            transcript: transcript_rx,
        }
    }

    /// Runs one conversation turn.
    ///
    /// 1. Appends the user message.
    /// 2. Raises the composing indicator and waits out the typing delay.
    /// 3. Asks the responder for a reply (or answers with the wallet notice).
    /// 4. Appends the assistant message and clears the indicator.
    ///
    /// Time spent queued behind other turns is not bounded. Only the responder
    /// call is, inside the actor, so an error here always means no reply was
    /// appended.
    #[instrument(skip(self))]
    pub async fn process_message(&self, content: String) -> Result<AIResponse, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::ProcessUserMessage {
            content,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| ActorError::ChannelClosed(e.to_string()))?;
        recv.await
            .map_err(|e| ActorError::ChannelClosed(e.to_string()))?
    }

    /// Returns a snapshot of the transcript, in chronological order.
    ///
    /// Does not wait for an in-flight turn: the user message of that turn is
    /// already visible.
    pub fn transcript(&self) -> Result<Vec<Message>, AppError> {
        if self.sender.is_closed() {
            return Err(ActorError::ChannelClosed("supervisor stopped".to_string()).into());
        }
        Ok(self.transcript.borrow().messages().to_vec())
    }

    /// Whether the assistant is currently composing a reply.
    #[allow(dead_code)]
    pub fn is_composing(&self) -> bool {
        *self.composing.borrow()
    }

    /// Subscribes to changes of the composing indicator.
    pub fn subscribe_composing(&self) -> watch::Receiver<bool> {
        self.composing.clone()
    }

    /// Stops the shell. The transcript is discarded.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(SupervisorMessage::Shutdown)
            .await
            .map_err(|e| ActorError::ChannelClosed(e.to_string()))?;
        Ok(())
    }
}

// --- Actor Runner ---
struct SupervisorRunner<R>
where
    R: Responder,
{
    receiver: mpsc::Receiver<SupervisorMessage>,
    responder: Arc<R>,
    transcript: watch::Sender<Transcript>,
    composing: watch::Sender<bool>,
    options: SupervisorOptions,
}

impl<R> SupervisorRunner<R>
where
    R: Responder,
{
    async fn run(mut self) {
        info!("Supervisor started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SupervisorMessage::ProcessUserMessage { content, responder } => {
                    let result = self.handle_user_message(content).await;
                    if let Err(e) = &result {
                        error!("Error processing user message: {:?}", e);
                    }
                    let _ = responder.send(result);
                }
                SupervisorMessage::Shutdown => {
                    info!("Supervisor shutting down...");
                    break;
                }
            }
        }
        info!(messages = self.transcript.borrow().len(), "Supervisor stopped");
    }

    fn append(&self, sender: Sender, content: String) {
        self.transcript.send_modify(|transcript| {
            transcript.push(sender, content);
        });
    }

    #[instrument(skip(self, content))]
    async fn handle_user_message(&mut self, content: String) -> Result<AIResponse, AppError> {
        self.append(Sender::User, content.clone());
        self.composing.send_replace(true);

        if !self.options.typing_delay.is_zero() {
            sleep(self.options.typing_delay).await;
        }

        let result = if self.options.require_wallet {
            Ok(AIResponse::new(WALLET_REQUIRED_RESPONSE, Category::System, 1.0))
        } else {
            match timeout(self.options.reply_timeout, self.responder.respond(content)).await {
                Ok(reply) => reply,
                Err(elapsed) => Err(elapsed.into()),
            }
        };

        let reply = match result {
            Ok(reply) => reply,
            Err(e) => {
                self.composing.send_replace(false);
                return Err(e);
            }
        };

        self.append(Sender::Assistant, reply.content.clone());
        self.composing.send_replace(false);
        debug!(category = %reply.category, "Turn complete");
        Ok(reply)
    }
}
