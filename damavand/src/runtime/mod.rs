pub mod interpreter;
pub mod value;

use std::io::{self, Write};

use crate::error::RuntimeError;

pub use interpreter::{Interpreter, InterpreterOptions};
pub use value::Value;

/// Where `print` statements go. One call per printed line.
pub trait OutputSink {
    fn write_line(&mut self, line: &str) -> Result<(), RuntimeError>;
}

/// Captures printed lines in memory.
impl OutputSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<(), RuntimeError> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Streams printed lines to the process stdout.
#[derive(Debug)]
pub struct StdoutSink {
    out: io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> Result<(), RuntimeError> {
        writeln!(self.out.lock(), "{line}").map_err(|e| RuntimeError::Output {
            message: e.to_string(),
        })
    }
}
