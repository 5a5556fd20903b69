use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use vinylpress::error::{Result, VinylError};
use vinylpress::extract::{self, FieldSelection};
use vinylpress::writers;

#[derive(Parser)]
#[command(name = "extract-tracks")]
#[command(about = "Extract selected fields from a JSON file of track records", long_about = None)]
struct Cli {
    /// Path to input JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output file (default: stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Comma-separated list of fields to include (overrides defaults),
    /// e.g. title,artist,album,year
    #[arg(long)]
    fields: Option<String>,

    /// Infer all available fields from the data (minus large/blacklisted ones)
    #[arg(long)]
    all_fields: bool,

    /// Root key name for YAML output
    #[arg(long, default_value = "tracklist")]
    yaml_root_name: String,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Jsonl,
    Yaml,
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
            eprintln!("Error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            VinylError::InputNotFound(cli.input.display().to_string())
        } else {
            VinylError::IoError(e)
        }
    })?;
    let data: serde_json::Value = serde_json::from_str(&text)?;

    let records = extract::iter_records(&data);

    // explicit --fields wins; --all-fields infers; else the curated defaults
    let selection = if let Some(arg) = &cli.fields {
        FieldSelection::Explicit(extract::parse_fields_arg(arg))
    } else if cli.all_fields {
        FieldSelection::All
    } else {
        FieldSelection::Default
    };
    let fields = extract::resolve_fields(&selection, &records);

    let rows: Vec<_> = records
        .iter()
        .map(|record| extract::extract_row(record, &fields))
        .collect();

    let mut out: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(fs::File::create(&cli.output)?)
    };

    match cli.format {
        Format::Csv => writers::write_csv(&mut out, &rows, &fields)?,
        Format::Jsonl => writers::write_jsonl(&mut out, &rows)?,
        Format::Yaml => writers::write_yaml(&mut out, &rows, &cli.yaml_root_name)?,
    }
    out.flush()?;
    Ok(())
}
