use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vinylpress::error::{Result, VinylError};
use vinylpress::{prompts, ChannelConfig};

#[derive(Parser)]
#[command(name = "blog-prompt")]
#[command(
    about = "Generate an LLM blog-post prompt by injecting episode JSON into the standard template",
    long_about = None
)]
struct Cli {
    /// Episode JSON file
    input: PathBuf,

    /// Write prompt to this file (otherwise prints to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Additional keys to strip anywhere in the JSON
    #[arg(long, num_args = 0..)]
    drop: Vec<String>,

    /// Pretty-print JSON in the prompt (default is compact)
    #[arg(long)]
    pretty: bool,

    /// Channel configuration overrides (JSON)
    #[arg(long, env = "VINYLPRESS_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error reading JSON: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ChannelConfig::load(path)?,
        None => ChannelConfig::default(),
    };

    let text = fs::read_to_string(&cli.input).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            VinylError::InputNotFound(cli.input.display().to_string())
        } else {
            VinylError::IoError(e)
        }
    })?;
    let data: serde_json::Value = serde_json::from_str(&text)?;

    let drop = prompts::drop_set(&cli.drop);
    let prompt = prompts::blog_prompt(&data, &drop, cli.pretty, &config)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &prompt)?;
            println!("Wrote prompt to {}", path.display());
        }
        None => println!("{}", prompt),
    }
    Ok(())
}
