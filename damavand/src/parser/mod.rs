pub mod lexer;
pub mod parser;

use tracing::debug;

use crate::error::Error;
use crate::ir::ast;

/// Source text to AST in one step
pub fn parse(source: &str) -> Result<ast::Program, Error> {
    let tokens = lexer::tokenize(source)?;
    debug!(tokens = tokens.len(), "lexed source");
    let program = parser::parse_tokens(tokens)?;
    debug!(statements = program.statements.len(), "parsed program");
    Ok(program)
}
