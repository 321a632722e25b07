//! Procal CLI: run, step through, and list stack calculator programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, input, or assembly error
//! - 3: Runtime error
//! - 4: Step limit exceeded
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod commands;
mod debugger;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "procal")]
#[command(about = "Stepping interpreter for procal stack calculator programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program until it finishes, reading INPUT values from stdin
    Run {
        /// Program text file
        file: PathBuf,

        /// Drive the run with step-over instead of step-into
        #[arg(long)]
        step_over: bool,

        /// Abort after this many steps
        #[arg(long, default_value_t = commands::DEFAULT_MAX_STEPS)]
        max_steps: u64,
    },

    /// Step through a program interactively (commands on stdin)
    Debug {
        /// Program text file
        file: PathBuf,
    },

    /// Print the canonical listing of a program
    List {
        /// Program text file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let result = match cli.command {
        Command::Run {
            file,
            step_over,
            max_steps,
        } => commands::run(&file, step_over, max_steps),
        Command::Debug { file } => commands::debug(&file),
        Command::List { file } => commands::list(&file),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
