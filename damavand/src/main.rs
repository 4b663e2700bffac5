use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{Level, debug, warn};

use damavand::{InterpreterOptions, StdoutSink, parser};

#[derive(Parser)]
#[command(name = "damavand")]
#[command(about = "Interpreter for the Damavand scripting language", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program
    Run {
        /// Source file
        input: PathBuf,

        /// Nested function calls allowed before aborting
        #[arg(long, default_value_t = InterpreterOptions::default().max_call_depth)]
        max_call_depth: usize,
    },

    /// Print the token stream
    Tokens {
        /// Source file
        input: PathBuf,
    },

    /// Parse and print the AST without running it
    Ast {
        /// Source file
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("[Damavand Error] {message}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), String> {
    match command {
        Commands::Run {
            input,
            max_call_depth,
        } => {
            let source = read_source(&input)?;
            let options = InterpreterOptions { max_call_depth };
            let mut sink = StdoutSink::new();
            damavand::execute(&source, &mut sink, options).map_err(|e| e.to_string())
        }
        Commands::Tokens { input } => {
            let source = read_source(&input)?;
            let tokens = damavand::tokenize(&source).map_err(|e| e.to_string())?;
            for token in &tokens {
                println!("{token}");
            }
            Ok(())
        }
        Commands::Ast { input } => {
            let source = read_source(&input)?;
            let program = parser::parse(&source).map_err(|e| e.to_string())?;
            println!("{program:#?}");
            Ok(())
        }
    }
}

fn read_source(path: &Path) -> Result<String, String> {
    if path.extension().is_none_or(|ext| ext != "dam") {
        warn!(path = %path.display(), "expected a .dam file");
    }
    debug!(path = %path.display(), "reading source");
    fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {e}", path.display()))
}
