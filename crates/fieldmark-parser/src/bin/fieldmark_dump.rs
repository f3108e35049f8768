//! Parse a markdown file and print its inline AST as JSON
//!
//! Usage: fieldmark-dump [--config FILE] [--compact] <FILE|->
//!
//! Diagnostics go to stderr and make the exit status 1. Set RUST_LOG to see
//! parser logging.

use anyhow::{bail, Context};
use fieldmark_parser::{InlineParser, ParserOptions};
use std::io::Read;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

struct Args {
    input: String,
    config: Option<PathBuf>,
    compact: bool,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut input = None;
        let mut config = None;
        let mut compact = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().context("--config needs a file")?;
                    config = Some(PathBuf::from(path));
                }
                "--compact" => compact = true,
                "-h" | "--help" => {
                    println!("Usage: fieldmark-dump [--config FILE] [--compact] <FILE|->");
                    process::exit(0);
                }
                flag if flag.starts_with("--") => bail!("unknown flag: {}", flag),
                other => {
                    if input.is_some() {
                        bail!("only one input file is supported");
                    }
                    input = Some(other.to_string());
                }
            }
        }

        Ok(Self {
            input: input.context("missing input file (use - for stdin)")?,
            config,
            compact,
        })
    }
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let options = match &args.config {
        Some(path) => ParserOptions::from_file(path)?,
        None => ParserOptions::default(),
    };

    let text = read_input(&args.input)?;
    let document = InlineParser::with_options(&options).parse(&text);

    let ast = document.to_json()?;
    let rendered = if args.compact {
        serde_json::to_string(&ast)?
    } else {
        serde_json::to_string_pretty(&ast)?
    };
    println!("{}", rendered);

    if document.has_errors() {
        for diagnostic in &document.diagnostics {
            eprintln!("{}:{}", args.input, diagnostic);
        }
        process::exit(1);
    }

    Ok(())
}
