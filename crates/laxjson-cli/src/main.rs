//! `laxjson` CLI — validate and inspect JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check that a document decodes (stdin → stdout)
//! echo '{"name":"Alice","tags":["a","b"],}' | laxjson check
//!
//! # Print the value at a dotted path
//! laxjson get status.entities.urls.0.url -i user.json
//!
//! # Node counts and nesting depth
//! laxjson stats -i user.json
//!
//! # Tighter nesting limit, with decoder logging
//! laxjson --max-depth 16 -v check -i deep.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use laxjson_core::{Value, DEFAULT_MAX_DEPTH};
use log::{debug, LevelFilter};
use std::collections::BTreeMap;
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "laxjson",
    version,
    about = "Lenient JSON decoder CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum nesting depth of arrays and objects
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log decoder activity to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the input and report its root kind
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print the value at a dotted path (e.g. `entities.urls.0.url`)
    Get {
        /// Dot-separated object keys and array indices
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show node counts per kind and the maximum nesting depth
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parser = laxjson_core::Parser::new().with_max_depth(cli.max_depth);
    debug!("max depth set to {}", parser.max_depth());

    match cli.command {
        Commands::Check { input } => {
            let value = decode_input(&parser, input.as_deref())?;
            println!("ok: {}", summarize(&value));
        }
        Commands::Get { path, input } => {
            let value = decode_input(&parser, input.as_deref())?;
            let found = value
                .lookup(&path)
                .with_context(|| format!("No value at path: {}", path))?;
            println!("{}", render(found));
        }
        Commands::Stats { input } => {
            let bytes = read_input(input.as_deref())?;
            let value = parser.parse(&bytes).context("Failed to decode input")?;
            let stats = Stats::collect(&value);
            println!("Input size:  {} bytes", bytes.len());
            println!("Nodes:       {}", stats.total());
            for (kind, count) in &stats.kinds {
                println!("  {:<10} {}", format!("{}:", kind), count);
            }
            println!("Max depth:   {}", stats.max_depth);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn decode_input(parser: &laxjson_core::Parser, path: Option<&str>) -> Result<Value> {
    let bytes = read_input(path)?;
    parser.parse(&bytes).context("Failed to decode input")
}

/// One-line description: the kind, plus a size for composites.
fn summarize(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("array ({} items)", items.len()),
        Value::Object(map) => format!("object ({} members)", map.len()),
        other => other.kind().to_string(),
    }
}

/// Strings print raw and scalars as their literal; composites are summarized.
fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(n) => n.to_string(),
        // Debug keeps the decimal point on whole floats.
        Value::Float(f) => format!("{:?}", f),
        Value::Str(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => summarize(value),
    }
}

#[derive(Default)]
struct Stats {
    kinds: BTreeMap<&'static str, usize>,
    max_depth: usize,
}

impl Stats {
    fn collect(root: &Value) -> Self {
        let mut stats = Stats::default();
        stats.visit(root, 0);
        stats
    }

    fn visit(&mut self, value: &Value, depth: usize) {
        *self.kinds.entry(value.kind()).or_default() += 1;
        let children: Vec<&Value> = match value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(map) => map.values().collect(),
            _ => return,
        };
        self.max_depth = self.max_depth.max(depth + 1);
        for child in children {
            self.visit(child, depth + 1);
        }
    }

    fn total(&self) -> usize {
        self.kinds.values().sum()
    }
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
