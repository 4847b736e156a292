use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Curtis: a friendly Canadian chatbot and image generator for Covalent backends.
#[derive(Parser, Debug)]
#[command(name = "curtis", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. debug, curtis=trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Backend address, overriding config and CURTIS_API_ADDRESS.
    #[arg(long, global = true)]
    pub address: Option<String>,

    /// API key sent as x-api-key, overriding config and CURTIS_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Chat with Curtis (the default).
    Chat(ChatArgs),
    /// Generate an image from a prompt, or from each line typed when no prompt is given.
    Image(ImageArgs),
    /// Print the resolved configuration.
    Config,
}

#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    /// Wait for whole replies instead of streaming them.
    #[arg(long)]
    pub no_stream: bool,

    /// Message lines kept as conversation memory (0-99).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=99))]
    pub memory_length: Option<u32>,

    /// Maximum tokens per reply (50-500).
    #[arg(long, value_parser = clap::value_parser!(u32).range(50..=500))]
    pub max_tokens: Option<u32>,
}

#[derive(clap::Args, Debug, Default)]
pub struct ImageArgs {
    /// What to draw.
    pub prompt: Vec<String>,

    /// Where to write the image. Defaults to curtis-image-<n>.<ext>.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Diffusion steps.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub steps: Option<u32>,

    /// Seed tag prepended to the prompt.
    #[arg(long)]
    pub seed: Option<u32>,
}

pub fn parse() -> Args {
    Args::parse()
}
