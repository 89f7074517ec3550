//! Command-line interface for the outline language.
//!
//! `outline parse --input FILE` prints the AST as an indented tree with
//! source locations; `outline tokens --input FILE` prints every terminal
//! the bridge delivers to the parser. Repeat `-v` to raise verbosity: one
//! enables debug logging, two also echoes every bridge call, three traces
//! the parser engine.

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser as ClapParser, Subcommand};
use lexbridge_outline::{OutlineError, parse_str, render_tree, tokens_str};
use std::path::{Path, PathBuf};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Verbosity (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a file and prints its syntax tree
    Parse {
        /// Input file with outline declarations
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Prints the terminals delivered to the parser
    Tokens {
        /// Input file with outline declarations
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 | 2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("can't read {:?}", path))
}

fn report(path: &Path, err: OutlineError) -> anyhow::Error {
    let diag = err.to_diagnostic().with_source(Some(path.into()));
    anyhow!("{}", diag)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Parse { input } => {
            let source = read_source(&input)?;
            let label = input.to_string_lossy();
            let ast = parse_str(&source, Some(label.as_ref()), args.verbose)
                .map_err(|e| report(&input, e))?;
            let root = ast
                .roots()
                .next()
                .ok_or_else(|| anyhow!("no syntax tree for {:?}", input))?;
            print!("{}", render_tree(&ast, root));
        }
        Commands::Tokens { input } => {
            let source = read_source(&input)?;
            let label = input.to_string_lossy();
            let toks = tokens_str(&source, Some(label.as_ref()), args.verbose)
                .map_err(|e| report(&input, e))?;
            for (id, tok) in toks {
                match tok {
                    Some(tok) => println!("{:?} {}", id, tok),
                    None => println!("{:?}", id),
                }
            }
        }
    }
    Ok(())
}
