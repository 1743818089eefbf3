use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use peg_ex::{run, PegEx};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parse `v=<letter>;` groups and print the words they spell.
#[derive(Parser, Debug)]
#[command(name = "peg-ex", version, about)]
struct Args {
    /// Input to parse. Read from `--file` or stdin when omitted.
    input: Option<String>,

    /// Read the input from a file
    #[arg(short, long, conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Print the syntax tree after parsing
    #[arg(long)]
    tree: bool,

    /// Dump the recorded tokens after parsing
    #[arg(long)]
    tokens: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("peg_ex={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(input) = &args.input {
        return Ok(input.clone());
    }

    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("could not read input file `{}`", path.display()));
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("could not read input from stdin")?;
    Ok(input)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = read_input(&args)?;
    // Trailing newlines from files and pipes are not part of the grammar.
    let input = input.trim_end_matches(['\r', '\n']);
    info!(len = input.len(), "parsing");

    let mut parser = PegEx::new(input);
    run(&mut parser).context("could not parse input")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.tokens {
        for token in parser.tokens() {
            writeln!(out, "{} {}..{} depth {}", token.rule, token.begin, token.end, token.depth)?;
        }
    }

    if args.tree {
        parser.print_syntax_tree(&mut out)?;
    }

    writeln!(out, "[{}]", parser.words().join(" "))?;
    Ok(())
}
