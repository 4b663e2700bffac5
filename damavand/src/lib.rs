//! Damavand: lexer, recursive-descent parser and tree-walking interpreter
//! for a small imperative scripting language.
//!
//! ```text
//! source --tokenize--> tokens --parse_tokens--> Program --Interpreter::run--> output
//! ```

pub mod error;
pub mod ir;
pub mod parser;
pub mod runtime;
pub mod span;

pub use error::{Error, ErrorKind, LexError, ParseError, RuntimeError};
pub use ir::ast::Program;
pub use parser::lexer::{Token, TokenKind, tokenize};
pub use parser::parser::parse_tokens;
pub use runtime::{Interpreter, InterpreterOptions, OutputSink, StdoutSink, Value};

/// What an editor needs back from one run: every printed line plus at most
/// one error.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub output: Vec<String>,
    pub error: Option<Error>,
}

/// Lexes, parses and runs `source`, writing printed lines to `sink` as they
/// happen. Stops at the first error from any stage.
pub fn execute(
    source: &str,
    sink: &mut dyn OutputSink,
    options: InterpreterOptions,
) -> Result<(), Error> {
    let program = parser::parse(source)?;
    Interpreter::with_options(sink, options).run(&program)?;
    Ok(())
}

/// Runs `source` with default options, capturing output in memory.
pub fn run_source(source: &str) -> RunOutcome {
    let mut output: Vec<String> = Vec::new();
    let error = execute(source, &mut output, InterpreterOptions::default()).err();
    RunOutcome { output, error }
}
