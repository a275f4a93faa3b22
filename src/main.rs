//! The MyPL language CLI.
//!
//! This is the entry point for the MyPL toolchain. It provides a single
//! command to run a `.mypl` source file end to end: lex, parse, check,
//! generate bytecode, and execute it against the process's standard
//! streams.
//!
//! # Usage
//!
//! ```text
//! mypl run <file.mypl>
//! mypl run --trace <file.mypl>
//! ```
//!
//! # Error Reporting
//!
//! Errors from any phase are rendered with [ariadne](https://docs.rs/ariadne)
//! when they carry a source span, falling back to their plain `Display`
//! form otherwise (spec.md §6, §7).

use clap::{Parser, Subcommand};
use mypl::diagnostics;
use mypl::driver;

#[derive(Parser)]
#[command(name = "mypl")]
#[command(about = "The MyPL programming language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a MyPL source file.
    Run {
        /// The source file to run (e.g., `hello.mypl`).
        file: String,

        /// Log every dispatched VM opcode at `trace` level (gated by
        /// `RUST_LOG`).
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { file, trace } => {
            if let Err(()) = run(&file, trace) {
                std::process::exit(1);
            }
        }
    }
}

/// Reads `file`, runs it through the full pipeline, and reports the first
/// diagnostic encountered (if any) to stderr.
fn run(file: &str, trace: bool) -> Result<(), ()> {
    let source = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read '{file}': {e}");
    })?;

    driver::run_source(&source, trace).map_err(|error| diagnostics::report(file, &source, &error))
}
