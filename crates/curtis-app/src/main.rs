mod chat;
mod cli;
mod effects;
mod image;

use std::process::ExitCode;
use std::time::Duration;

use curtis_ai::{CovalentClient, CovalentConfig, ImageClient};
use curtis_common::CurtisError;
use curtis_config::schema::LogLevel;
use curtis_config::CurtisConfig;
use tracing_subscriber::EnvFilter;

use cli::{Args, ChatArgs, Command};

/// `KEY=VALUE` pairs of a `.env` file. Blank lines and `#` comments are
/// skipped, and surrounding quotes are stripped from values.
fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim(), value)
        })
        .collect()
}

/// Load environment variables from a `.env` file in the current directory.
/// Variables already set are left alone. Must run before any thread starts.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var(key).is_err() {
            std::env::set_var(key, value);
        }
    }
}

/// Logs go to stderr so they never interleave with streamed replies.
fn init_logging(directive: Option<&str>, level: LogLevel) {
    let fallback = format!("curtis={}", level.as_filter());
    let filter = match directive {
        Some(d) => EnvFilter::try_new(d).unwrap_or_else(|_| EnvFilter::new(&fallback)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn covalent_config(config: &CurtisConfig) -> CovalentConfig {
    let secs = |s: u32| Duration::from_secs(u64::from(s));
    CovalentConfig::new(config.api.address.clone())
        .with_api_key(config.api.api_key().unwrap_or_default())
        .with_connect_timeout(secs(config.api.connect_timeout))
        .with_generate_timeout(secs(config.api.generate_timeout))
        .with_stream_timeout(secs(config.api.stream_timeout))
        .with_image_timeout(secs(config.image.timeout))
}

fn resolve_config(args: &Args) -> Result<CurtisConfig, CurtisError> {
    let loaded = curtis_config::load_config(args.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => return Err(e.into()),
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            let mut config = CurtisConfig::default();
            curtis_config::toml_loader::apply_env_overrides(&mut config);
            config
        }
    };

    if let Some(ref address) = args.address {
        config.api.address = address.clone();
    }
    if let Some(ref key) = args.api_key {
        config.api.api_key = key.clone();
    }
    // Logging was not up yet when the file was parsed.
    if let Err(e) = curtis_config::validation::validate(&config) {
        tracing::warn!("{e}");
    }
    Ok(config)
}

async fn run(args: Args) -> Result<(), CurtisError> {
    let config = resolve_config(&args)?;
    tracing::info!("Curtis v{} starting...", env!("CARGO_PKG_VERSION"));

    let ai_err = |e: curtis_ai::AiError| CurtisError::Ai(e.to_string());

    match args.command {
        None => {
            let client = CovalentClient::new(covalent_config(&config)).map_err(ai_err)?;
            chat::run(&config, client, &ChatArgs::default()).await
        }
        Some(Command::Chat(ref chat_args)) => {
            let client = CovalentClient::new(covalent_config(&config)).map_err(ai_err)?;
            chat::run(&config, client, chat_args).await
        }
        Some(Command::Image(ref image_args)) => {
            let client = ImageClient::new(covalent_config(&config))
                .map_err(ai_err)?
                .with_inference_steps(
                    image_args
                        .steps
                        .unwrap_or(config.image.num_inference_steps),
                );
            let seed = image_args.seed.unwrap_or(config.image.seed);
            image::run(client, seed, image_args).await
        }
        Some(Command::Config) => {
            print!("{}", curtis_config::config_to_toml(&config));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    // Load .env file before anything else; no other threads exist yet.
    load_dotenv();

    let args = cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
