//! Interactive chat loop.

use std::io::Write;

use curtis_ai::{
    ChatSettings, ConversationSession, CovalentClient, InferenceClient, RequestKind, Role,
};
use curtis_common::CurtisError;
use curtis_config::schema::{clamp_max_response_tokens, clamp_memory_length};
use curtis_config::CurtisConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::cli::ChatArgs;
use crate::effects;

const HELP: &str = "\
Commands:
  /memory N      keep N message lines of history (0-99)
  /tokens N      limit replies to N tokens (50-500)
  /stream on|off toggle streaming replies
  /clear         start a new conversation
  /history       show the conversation so far
  /info          show how the model is prompted
  /quit          leave";

/// A line typed at the prompt that starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Memory(u32),
    Tokens(u32),
    Stream(bool),
    Clear,
    History,
    Info,
    Help,
    Quit,
    Invalid(String),
}

impl ReplCommand {
    /// Parse a command line. Returns `None` for ordinary chat input.
    /// Numeric arguments are clamped into their accepted ranges.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or("");
        let arg = parts.next();

        let command = match (name, arg) {
            ("memory", Some(n)) => match n.parse::<u32>() {
                Ok(n) => ReplCommand::Memory(clamp_memory_length(n)),
                Err(_) => ReplCommand::Invalid(format!("not a number: {n}")),
            },
            ("tokens", Some(n)) => match n.parse::<u32>() {
                Ok(n) => ReplCommand::Tokens(clamp_max_response_tokens(n)),
                Err(_) => ReplCommand::Invalid(format!("not a number: {n}")),
            },
            ("stream", Some("on")) => ReplCommand::Stream(true),
            ("stream", Some("off")) => ReplCommand::Stream(false),
            ("clear", None) => ReplCommand::Clear,
            ("history", None) => ReplCommand::History,
            ("info", None) => ReplCommand::Info,
            ("help", None) => ReplCommand::Help,
            ("quit" | "exit", None) => ReplCommand::Quit,
            _ => ReplCommand::Invalid(format!("unknown command: {line}")),
        };
        Some(command)
    }
}

/// Session settings from config, with command-line flags taking precedence.
/// Out-of-range values from the config file are clamped.
pub fn settings_from(config: &CurtisConfig, args: &ChatArgs) -> ChatSettings {
    let memory_length = args.memory_length.unwrap_or(config.chat.memory_length);
    let max_tokens = args
        .max_tokens
        .unwrap_or(config.chat.max_response_tokens);
    ChatSettings {
        memory_length: clamp_memory_length(memory_length) as usize,
        max_response_tokens: clamp_max_response_tokens(max_tokens),
        streaming: config.chat.streaming && !args.no_stream,
    }
}

/// Describe the prompt wrapper the way the model sees it.
fn info_text(session: &ConversationSession) -> String {
    let template = session.template().text();
    let indented: Vec<String> = template.lines().map(|l| format!("\t{l}")).collect();
    format!(
        "Curtis is a simple chatbot that uses an inference API served by Covalent.\n\n\
         The LLM is prompted as follows:\n{}\n\n\
         The `message_memory` is replaced by the last {} message lines of the chat.",
        indented.join("\n"),
        session.memory().bound()
    )
}

pub async fn run(
    config: &CurtisConfig,
    client: CovalentClient,
    args: &ChatArgs,
) -> Result<(), CurtisError> {
    let mut session = ConversationSession::new(settings_from(config, args));
    info!(session = %session.id(), settings = ?session.settings(), "chat session started");

    println!("Curtis 🤖  (type /help for commands)");
    if !config.api.has_address() {
        println!("Set an API address with --address or CURTIS_API_ADDRESS before chatting.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match ReplCommand::parse(line) {
            None => turn(&mut session, &client, line).await,
            Some(ReplCommand::Quit) => break,
            Some(command) => apply(&mut session, command),
        }
    }

    info!(session = %session.id(), turns = session.message_count() / 2, "chat session ended");
    Ok(())
}

fn apply(session: &mut ConversationSession, command: ReplCommand) {
    match command {
        ReplCommand::Memory(n) => {
            session.resize_memory(n as usize);
            println!("Memory length set to {n}.");
        }
        ReplCommand::Tokens(n) => {
            session.set_max_response_tokens(n);
            println!("Max response tokens set to {n}.");
        }
        ReplCommand::Stream(on) => {
            session.set_streaming(on);
            println!("Streaming mode {}.", if on { "on" } else { "off" });
        }
        ReplCommand::Clear => {
            session.clear();
            println!("Conversation cleared.");
        }
        ReplCommand::History => {
            for message in session.messages() {
                let who = match message.role {
                    Role::User => "you",
                    Role::Bot => "curtis",
                };
                println!("{who}: {}", message.content);
            }
        }
        ReplCommand::Info => println!("{}", info_text(session)),
        ReplCommand::Help => println!("{HELP}"),
        ReplCommand::Invalid(msg) => println!("{msg}\n{HELP}"),
        ReplCommand::Quit => {}
    }
}

async fn turn(session: &mut ConversationSession, client: &CovalentClient, text: &str) {
    let kind = if session.settings().streaming {
        RequestKind::Stream
    } else {
        RequestKind::Generate
    };

    let mut started = false;
    let result = session
        .respond(client as &dyn InferenceClient, text, |chunk| {
            let mut out = std::io::stdout().lock();
            if !started {
                let _ = out.write_all(b"curtis: ");
                started = true;
            }
            let _ = out.write_all(chunk.as_bytes());
            let _ = out.flush();
        })
        .await;

    match result {
        Ok(reply) => {
            if reply.is_empty() {
                println!("(no reply)");
                return;
            }
            println!();
            for egg in effects::detect(&reply) {
                println!("{}", egg.banner());
            }
        }
        Err(e) => {
            if started {
                println!();
            }
            warn!("turn failed: {e}");
            eprintln!("{}", e.user_message(kind, &client.config().address));
        }
    }
}
