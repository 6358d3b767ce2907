// Verbot Terminal Entry Point
// Rule-based conversational shell for the crypto-trading assistant

mod actors;
mod brain;
mod config;
mod dashboard;
mod error;
mod logging;
mod models;

#[cfg(test)]
mod tests;

use actors::supervisor::SupervisorHandle;
use anyhow::Context;
use brain::KnowledgeBase;
use config::AppConfig;
use dashboard::TerminalStatus;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

const WELCOME: &str =
    "Welcome to Verbot Terminal. I'm your AI trading assistant. How can I help you today?";

const HELP: &str = "\
Commands:
  /help      Show this help
  /status    Show system, network and wallet status
  /history   Show the conversation so far
  /tokens    List known tokens
  /token SYM Show details for one token
  /quit      End the session (also /exit)
Anything else is sent to the assistant.";

/// A line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Help,
    Status,
    History,
    Tokens,
    Token(&'a str),
    Quit,
    Unknown(&'a str),
    Say(&'a str),
    Blank,
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Blank;
    }
    match trimmed {
        "/help" => Command::Help,
        "/status" => Command::Status,
        "/history" => Command::History,
        "/tokens" => Command::Tokens,
        "/quit" | "/exit" => Command::Quit,
        other if other.starts_with("/token ") => Command::Token(other["/token ".len()..].trim()),
        other if other.starts_with('/') => Command::Unknown(other),
        _ => Command::Say(line),
    }
}

fn print_history(supervisor: &SupervisorHandle) -> anyhow::Result<()> {
    let transcript = supervisor.transcript()?;
    if transcript.is_empty() {
        println!("(no messages yet)");
    }
    for message in transcript {
        println!(
            "[{}] {}: {}",
            message.timestamp.format("%H:%M:%S"),
            message.sender,
            message.content
        );
    }
    Ok(())
}

fn print_token(knowledge: &KnowledgeBase, symbol: &str) {
    match knowledge.lookup_token(symbol) {
        Some(token) => println!(
            "{} ({}) [{}] {}",
            token.name, token.symbol, token.category, token.description
        ),
        None => println!("Unknown token {}", symbol),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_tracing(config.log_format)?;
    info!(?config, "Configuration loaded");

    let mut knowledge = KnowledgeBase::new();
    if let Some(path) = &config.tokens_file {
        knowledge
            .load_extra_tokens(path)
            .with_context(|| format!("Failed to load tokens from {:?}", path))?;
    }

    let supervisor = SupervisorHandle::new(&config, knowledge.clone());

    // Typing indicator
    let mut composing = supervisor.subscribe_composing();
    tokio::spawn(async move {
        while composing.changed().await.is_ok() {
            if *composing.borrow_and_update() {
                eprintln!("Verbot is typing...");
            }
        }
    });

    println!("{}", WELCOME);
    println!("Type /help for commands.");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Blank => continue,
            Command::Help => println!("{}", HELP),
            Command::Status => println!("{}", TerminalStatus::snapshot()),
            Command::History => print_history(&supervisor)?,
            Command::Tokens => {
                for token in knowledge.tokens() {
                    println!("{:<6} {}", token.symbol, token.name);
                }
            }
            Command::Token(symbol) => print_token(&knowledge, symbol),
            Command::Quit => break,
            Command::Unknown(cmd) => println!("Unknown command {}. Type /help.", cmd),
            Command::Say(text) => match supervisor.process_message(text.to_string()).await {
                Ok(reply) => println!(
                    "[{} {:.0}%] {}",
                    reply.category,
                    reply.confidence * 100.0,
                    reply.content
                ),
                Err(e) => {
                    error!("Turn failed: {}", e);
                    println!("Something went wrong: {}", e);
                }
            },
        }
    }

    if let Err(e) = supervisor.shutdown().await {
        error!("Failed to stop supervisor: {}", e);
    }
    println!("Session ended.");
    Ok(())
}
