use crate::error::ParseError;
use crate::ir::ast::{
    BinaryOperator, Call, Expression, FunctionDef, Literal, Program, Statement, UnaryOperator,
};
use crate::span::Span;

use super::lexer::{Token, TokenKind};

/// Deepest combined nesting of blocks, parentheses, unary operators and
/// binary operator chains. Keeps parsing, evaluation and drop of the tree
/// well inside a 2 MiB thread stack.
pub const MAX_NESTING: usize = 64;

pub fn parse_tokens(tokens: Vec<Token>) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn new(mut tokens: Vec<Token>) -> Self {
        // The cursor never runs past Eof, so guarantee there is one
        if !matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })) {
            let span = tokens.last().map(|t| t.span).unwrap_or_default();
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(span.line, 1),
            });
        }
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match &self.peek().kind {
            TokenKind::Fff => self.parse_function_def(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Print => {
                self.advance(); // consume 'print'
                let value = self.parse_expression()?;
                Ok(Statement::Print { value })
            }
            TokenKind::Identifier(_) => self.parse_assignment_or_call(),
            _ => Err(self.error("statement")),
        }
    }

    fn parse_function_def(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Fff)?;
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if self.peek().kind != TokenKind::RParen {
            params.push(self.expect_identifier()?);
            while self.matches(&TokenKind::Comma) {
                params.push(self.expect_identifier()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;
        Ok(Statement::FunctionDef(FunctionDef { name, params, body }))
    }

    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::If)?;
        let condition = self.parse_condition()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.matches(&TokenKind::Else) {
            self.parse_block()?
        } else {
            Vec::new()
        };

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::While)?;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(Statement::While { condition, body })
    }

    /// `( expr )` heading an `if` or `while`.
    fn parse_condition(&mut self) -> Result<Expression, ParseError> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    fn parse_assignment_or_call(&mut self) -> Result<Statement, ParseError> {
        let span = self.peek().span;
        let name = self.expect_identifier()?;

        match self.peek().kind {
            TokenKind::Assign => {
                self.advance(); // consume '='
                let value = self.parse_expression()?;
                Ok(Statement::Assign {
                    target: name,
                    value,
                })
            }
            TokenKind::LParen => {
                let args = self.parse_arguments()?;
                Ok(Statement::Call(Call { name, args, span }))
            }
            _ => Err(self.error("'=' or '(' after identifier")),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.peek().kind != TokenKind::RParen {
            args.push(self.parse_expression()?);
            while self.matches(&TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_block(&mut self) -> Result<Vec<Statement>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        self.enter()?;
        let mut body = Vec::new();
        while self.peek().kind != TokenKind::RBrace {
            if self.is_at_end() {
                return Err(self.error("'}'"));
            }
            body.push(self.parse_statement()?);
        }
        self.leave(1);
        self.expect(TokenKind::RBrace)?;
        Ok(body)
    }

    // Expressions, lowest precedence first

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary(Self::parse_comparison, |kind| match kind {
            TokenKind::Equal => Some(BinaryOperator::Equal),
            TokenKind::NotEqual => Some(BinaryOperator::NotEqual),
            _ => None,
        })
    }

    fn parse_comparison(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary(Self::parse_term, |kind| match kind {
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
            TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
            _ => None,
        })
    }

    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary(Self::parse_factor, |kind| match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Subtract),
            _ => None,
        })
    }

    fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        self.parse_binary(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            _ => None,
        })
    }

    /// Folds `operand (op operand)*` into a left-leaning chain.
    fn parse_binary(
        &mut self,
        operand: fn(&mut Self) -> Result<Expression, ParseError>,
        operator: fn(&TokenKind) -> Option<BinaryOperator>,
    ) -> Result<Expression, ParseError> {
        let mut left = operand(self)?;
        let mut folds = 0;

        while let Some(op) = operator(&self.peek().kind) {
            // Each fold deepens the left-leaning tree by one
            self.enter()?;
            folds += 1;
            self.advance();
            let right = operand(self)?;
            left = Expression::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        self.leave(folds);
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression, ParseError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Bang => UnaryOperator::Not,
            _ => return self.parse_primary(),
        };
        self.enter()?;
        self.advance();
        let operand = self.parse_unary()?;
        self.leave(1);
        Ok(Expression::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let literal = match &self.peek().kind {
            TokenKind::Int(n) => Literal::Int(*n),
            TokenKind::Float(n) => Literal::Float(*n),
            TokenKind::String(s) => Literal::String(s.clone()),
            TokenKind::Boolean(b) => Literal::Boolean(*b),
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                return Ok(Expression::Variable(name));
            }
            TokenKind::LParen => {
                self.enter()?;
                self.advance();
                let expr = self.parse_expression()?;
                self.leave(1);
                self.expect(TokenKind::RParen)?;
                return Ok(expr);
            }
            _ => return Err(self.error("expression")),
        };
        self.advance();
        Ok(Expression::Literal(literal))
    }

    // Helpers

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("shallower nesting"));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self, levels: usize) {
        self.depth -= levels;
    }

    fn peek(&self) -> &Token {
        // Eof is always last and never consumed
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Token {
        let index = self.position.min(self.tokens.len() - 1);
        if !self.is_at_end() {
            self.position += 1;
        }
        &self.tokens[index]
    }

    fn matches(&mut self, kind: &TokenKind) -> bool {
        if self.peek().kind == *kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if self.peek().kind == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&expected.to_string()))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("identifier")),
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            span: token.span,
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }
}
