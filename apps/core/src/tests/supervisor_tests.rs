//! Conversation shell tests against the real engine actor.

use crate::actors::engine::EngineActorHandle;
use crate::actors::supervisor::{SupervisorHandle, SupervisorOptions, WALLET_REQUIRED_RESPONSE};
use crate::brain::generators::{SYSTEM_RESPONSE, THERAPY_RESPONSE};
use crate::brain::{Category, FixedSignal, IntentClassifier, KnowledgeBase, ResponseEngine};
use crate::config::AppConfig;
use crate::models::Sender;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

fn shell(typing_delay: Duration) -> SupervisorHandle {
    let engine = ResponseEngine::new(
        IntentClassifier::new(),
        KnowledgeBase::new(),
        Box::new(FixedSignal(0.5)),
        StdRng::seed_from_u64(0),
    );
    let options = SupervisorOptions {
        typing_delay,
        ..SupervisorOptions::default()
    };
    SupervisorHandle::spawn(
        Arc::new(EngineActorHandle::new(engine, options.reply_timeout)),
        options,
    )
}

#[tokio::test]
async fn test_reference_conversation() {
    let handle = shell(Duration::ZERO);

    let reply = handle.process_message("Buy SOL now".to_string()).await.unwrap();
    assert_eq!(reply.category, Category::Trade);
    assert_eq!(reply.confidence, 0.9);
    assert!(reply.content.contains("Solana"));

    let reply = handle
        .process_message("I'm scared about my position".to_string())
        .await
        .unwrap();
    assert_eq!(reply.category, Category::Therapy);
    assert_eq!(reply.confidence, 0.9);
    assert_eq!(reply.content, THERAPY_RESPONSE);

    let reply = handle.process_message("hello".to_string()).await.unwrap();
    assert_eq!(reply.category, Category::System);
    assert_eq!(reply.confidence, 0.8);
    assert_eq!(reply.content, SYSTEM_RESPONSE);
}

#[tokio::test]
async fn test_transcript_has_two_messages_per_turn() {
    let handle = shell(Duration::ZERO);
    let inputs = ["hello", "buy sol", "price?", "I'm worried", "sell bonk"];

    for (i, input) in inputs.iter().enumerate() {
        let reply = handle.process_message(input.to_string()).await.unwrap();
        let transcript = handle.transcript().unwrap();

        assert_eq!(transcript.len(), 2 * (i + 1));
        let last = &transcript[transcript.len() - 1];
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.content, reply.content);
    }

    let transcript = handle.transcript().unwrap();
    for (i, pair) in transcript.chunks(2).enumerate() {
        assert_eq!(pair[0].sender, Sender::User);
        assert_eq!(pair[0].content, inputs[i]);
        assert_eq!(pair[1].sender, Sender::Assistant);
    }
    for window in transcript.windows(2) {
        assert!(window[0].timestamp <= window[1].timestamp);
    }
}

#[tokio::test]
async fn test_composing_indicator_during_delay() {
    let handle = shell(Duration::from_millis(300));
    assert!(!handle.is_composing());

    let turn = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.process_message("hello".to_string()).await })
    };

    sleep(Duration::from_millis(100)).await;
    assert!(handle.is_composing());

    let reply = turn.await.unwrap().unwrap();
    assert_eq!(reply.category, Category::System);
    assert!(!handle.is_composing());
}

#[tokio::test]
async fn test_composing_subscription_sees_both_edges() {
    let handle = shell(Duration::from_millis(50));
    let mut composing = handle.subscribe_composing();

    let turn = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.process_message("hi".to_string()).await })
    };

    composing.changed().await.unwrap();
    assert!(*composing.borrow_and_update());
    composing.changed().await.unwrap();
    assert!(!*composing.borrow_and_update());

    turn.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_concurrent_turns_are_serialized() {
    let handle = shell(Duration::from_millis(20));

    let mut tasks = Vec::new();
    for i in 0..5 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            handle.process_message(format!("message {}", i)).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    // Each user message is immediately followed by its own reply.
    let transcript = handle.transcript().unwrap();
    assert_eq!(transcript.len(), 10);
    for pair in transcript.chunks(2) {
        assert_eq!(pair[0].sender, Sender::User);
        assert_eq!(pair[1].sender, Sender::Assistant);
    }
}

#[tokio::test]
async fn test_production_constructor_with_wallet_gate() {
    let config = AppConfig {
        typing_delay_ms: 0,
        require_wallet: true,
        sentiment_seed: Some(1),
        ..AppConfig::default()
    };
    let handle = SupervisorHandle::new(&config, KnowledgeBase::new());

    let reply = handle.process_message("Buy SOL now".to_string()).await.unwrap();
    assert_eq!(reply.content, WALLET_REQUIRED_RESPONSE);
    assert_eq!(handle.transcript().unwrap().len(), 2);
}
