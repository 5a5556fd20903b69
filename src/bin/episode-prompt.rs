use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vinylpress::error::{Result, VinylError};
use vinylpress::timestamps::build_timestamp_comment;
use vinylpress::{frontmatter, prompts, ChannelConfig, Episode};

#[derive(Parser)]
#[command(name = "episode-prompt")]
#[command(
    about = "Generate a YouTube Title/Description prompt or a timestamped comment from MDX/YAML frontmatter",
    long_about = None
)]
struct Cli {
    /// Path to MDX/Markdown with YAML frontmatter, or a YAML file
    path: PathBuf,

    /// Output a YouTube comment with timestamps from tracklist.duration_seconds
    #[arg(long, conflicts_with_all = ["instagram", "caption"])]
    comment: bool,

    /// Output a prompt for drafting an Instagram caption + hashtags
    #[arg(long, conflicts_with_all = ["comment", "caption"])]
    instagram: bool,

    /// Output a ready-to-post Instagram caption directly
    #[arg(long, conflicts_with_all = ["comment", "instagram"])]
    caption: bool,

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
        Err(err @ VinylError::MissingData(_)) => {
            eprintln!("{}", err);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ChannelConfig::load(path)?,
        None => ChannelConfig::default(),
    };

    let front = frontmatter::load(&cli.path)?;
    let episode = Episode::from_value(front);

    if cli.comment {
        let comment = build_timestamp_comment(episode.tracklist());
        if comment.is_empty() {
            return Err(VinylError::MissingData(
                "no tracklist found or could not build comment".to_string(),
            ));
        }
        println!("{}", comment);
        return Ok(());
    }

    if episode.is_empty() {
        return Err(VinylError::MissingData(
            "no frontmatter fields found in input".to_string(),
        ));
    }

    let prompt = if cli.instagram {
        prompts::instagram_prompt(&episode, &config)
    } else if cli.caption {
        prompts::instagram_caption(&episode, &config)
    } else {
        prompts::youtube_prompt(&episode, &config)
    };
    println!("{}", prompt);
    Ok(())
}
