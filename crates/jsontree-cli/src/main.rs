//! `jsontree` CLI: format, validate and query JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-indent a document (stdin → stdout, two spaces by default)
//! echo '{"name":"Alice","tags":["a","b"]}' | jsontree fmt
//!
//! # Compact from file to file
//! jsontree fmt --compact -i data.json -o data.min.json
//!
//! # Read one value; numeric segments index arrays
//! jsontree get -i data.json tags 0
//!
//! # Validate and report the root kind
//! jsontree check -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsontree_core::{Segment, Value, WriteOptions};
use std::io::{self, Read};
use std::process;

#[derive(Parser)]
#[command(
    name = "jsontree",
    version,
    about = "Format, validate and query JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write it back out
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Spaces per indentation level
        #[arg(long, default_value_t = 2, conflicts_with = "compact")]
        indent: usize,
        /// Write everything on one line
        #[arg(long)]
        compact: bool,
    },
    /// Print the value at a path, compactly
    Get {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Path segments; non-negative integers index arrays, anything else is a key
        path: Vec<String>,
    },
    /// Validate a document and print its root kind
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt {
            input,
            output,
            indent,
            compact,
        } => {
            let doc = read_document(input.as_deref())?;
            let options = if compact {
                WriteOptions::compact()
            } else {
                WriteOptions::indented(indent)
            };
            let text = doc.to_text(&options).context("Failed to write JSON")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Get { input, path } => {
            let doc = read_document(input.as_deref())?;
            let found = doc
                .value_or_default(path.iter().map(|s| parse_segment(s)))
                .context("Invalid path")?;
            if found.is_undefined() {
                eprintln!("undefined: nothing at path '{}'", path.join("."));
                process::exit(1);
            }
            let text = found
                .to_text(&WriteOptions::compact())
                .context("Failed to write JSON")?;
            write_output(None, &text)?;
        }
        Commands::Check { input } => {
            let doc = read_document(input.as_deref())?;
            println!("ok: {}", doc.kind());
        }
    }

    Ok(())
}

/// `"3"` indexes position 3; every other segment is an object key.
fn parse_segment(raw: &str) -> Segment {
    match raw.parse::<u64>() {
        Ok(index) => Segment::from(index),
        Err(_) => Segment::from(raw),
    }
}

fn read_document(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    jsontree_core::parse(&text).context("Failed to parse JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
