//! `dynjson` CLI: navigate, coerce, and reformat JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Print the value at a path as compact JSON (stdin → stdout)
//! echo '{"a":[1,2,{"b":"3.5"}]}' | dynjson get a.2
//!
//! # Coerce the reached value, with a fallback when it cannot convert
//! dynjson get server.port --as int --default 8080 -i config.json
//!
//! # Name the kind of the reached value (or "absent")
//! dynjson kind a.2.b -i data.json
//!
//! # Re-serialize as compact or pretty JSON
//! dynjson fmt -i data.json -o data.min.json
//! dynjson fmt --pretty -i data.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`,
//! `debug` with `--verbose`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dynjson_core::{Document, Handle};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dynjson",
    version,
    about = "Navigate and coerce loosely structured JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log coercion fallbacks and no-op navigation (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a dot-separated path
    Get {
        /// Path such as `items.2.name`; empty for the root
        #[arg(default_value = "")]
        path: String,
        /// How to render the reached value
        #[arg(long = "as", value_enum, default_value_t = Render::Json)]
        render: Render,
        /// Fallback used when the value cannot be coerced
        #[arg(long)]
        default: Option<String>,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the kind of the value at a path, or `absent`
    Kind {
        #[arg(default_value = "")]
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Parse and re-serialize a document
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Render {
    Json,
    Bool,
    Int,
    Float,
    String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Get {
            path,
            render,
            default,
            input,
        } => {
            let doc = read_document(input.as_deref())?;
            let reached = doc.handle().path(&path);
            tracing::debug!(path = %path, absent = reached.is_absent(), "resolved path");
            let rendered = render_value(reached, render, default.as_deref())?;
            write_output(None, &format!("{rendered}\n"))?;
        }
        Commands::Kind { path, input } => {
            let doc = read_document(input.as_deref())?;
            let name = doc
                .handle()
                .path(&path)
                .kind()
                .map_or("absent", |kind| kind.name());
            write_output(None, &format!("{name}\n"))?;
        }
        Commands::Fmt {
            input,
            output,
            pretty,
        } => {
            let doc = read_document(input.as_deref())?;
            let text = if pretty {
                doc.to_pretty_text()
                    .context("Failed to serialize document")?
            } else {
                let bytes = doc.to_vec().context("Failed to serialize document")?;
                String::from_utf8(bytes).context("Serializer produced invalid UTF-8")?
            };
            write_output(output.as_deref(), &text)?;
        }
    }

    Ok(())
}

/// Render the reached value per `--as`, parsing `--default` into the target type.
fn render_value(reached: Handle<'_>, render: Render, default: Option<&str>) -> Result<String> {
    let rendered = match render {
        Render::Json => {
            if default.is_some() {
                anyhow::bail!("--default requires --as bool, int, float or string");
            }
            reached.to_text()
        }
        Render::Bool => {
            let default = default
                .map(|d| d.parse::<bool>())
                .transpose()
                .context("--default is not a bool")?;
            reached.as_bool(default).to_string()
        }
        Render::Int => {
            let default = default
                .map(|d| d.parse::<i64>())
                .transpose()
                .context("--default is not an integer")?;
            reached.as_int(default).to_string()
        }
        Render::Float => {
            let default = default
                .map(|d| d.parse::<f64>())
                .transpose()
                .context("--default is not a float")?;
            reached.as_float(default).to_string()
        }
        Render::String => reached.as_string(default),
    };
    Ok(rendered)
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn read_document(path: Option<&str>) -> Result<Document> {
    let bytes = match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    tracing::debug!(bytes = bytes.len(), "parsing input");
    Document::parse(&bytes).context("Failed to parse JSON input")
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
