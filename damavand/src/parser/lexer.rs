use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::LexError;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Fff, If, Else, While, Print,
    // Operators
    Assign,       // =
    Plus,         // +
    Minus,        // -
    Star,         // *
    Slash,        // /
    Percent,      // %
    Bang,         // !
    Equal,        // ==
    NotEqual,     // !=
    Less,         // <
    Greater,      // >
    LessEqual,    // <=
    GreaterEqual, // >=
    // Brackets
    LParen,       // (
    RParen,       // )
    LBrace,       // {
    RBrace,       // }
    Comma,        // ,
    Semicolon,    // ;
    // Identifiers and literals
    Identifier(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    // Special
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lexeme = match self {
            Self::Fff => "'fff'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::Print => "'print'",
            Self::Assign => "'='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Bang => "'!'",
            Self::Equal => "'=='",
            Self::NotEqual => "'!='",
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::LessEqual => "'<='",
            Self::GreaterEqual => "'>='",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Int(n) => return write!(f, "number {n}"),
            Self::Float(n) => return write!(f, "number {n:?}"),
            Self::String(s) => return write!(f, "string {s:?}"),
            Self::Boolean(b) => return write!(f, "boolean {b}"),
            Self::Eof => "end of file",
        };
        f.write_str(lexeme)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4}:{:<4} {}", self.span.line, self.span.column, self.kind)
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(&ch) = self.chars.peek() {
            let span = self.span();
            let kind = match ch {
                '#' => {
                    // Comments run to end of line
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.bump();
                    }
                    continue;
                }
                '\n' | ' ' | '\t' | '\r' => {
                    self.bump();
                    continue;
                }
                '0'..='9' => self.number(span)?,
                '"' | '\'' => self.string(span)?,
                'a'..='z' | 'A'..='Z' | '_' => {
                    let ident = self.identifier();
                    match ident.as_str() {
                        "fff" => TokenKind::Fff,
                        "if" => TokenKind::If,
                        "else" => TokenKind::Else,
                        "while" => TokenKind::While,
                        "print" => TokenKind::Print,
                        "true" => TokenKind::Boolean(true),
                        "false" => TokenKind::Boolean(false),
                        _ => TokenKind::Identifier(ident),
                    }
                }
                '=' => self.with_equals(TokenKind::Equal, TokenKind::Assign),
                '!' => self.with_equals(TokenKind::NotEqual, TokenKind::Bang),
                '<' => self.with_equals(TokenKind::LessEqual, TokenKind::Less),
                '>' => self.with_equals(TokenKind::GreaterEqual, TokenKind::Greater),
                _ => {
                    let kind = match ch {
                        '+' => TokenKind::Plus,
                        '-' => TokenKind::Minus,
                        '*' => TokenKind::Star,
                        '/' => TokenKind::Slash,
                        '%' => TokenKind::Percent,
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        ',' => TokenKind::Comma,
                        ';' => TokenKind::Semicolon,
                        _ => return Err(LexError::UnexpectedCharacter { ch, span }),
                    };
                    self.bump();
                    kind
                }
            };
            tokens.push(Token { kind, span });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.line, 1),
        });
        Ok(tokens)
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes a one-character operator, or its two-character form when
    /// the next character is `=`.
    fn with_equals(&mut self, long: TokenKind, short: TokenKind) -> TokenKind {
        self.bump();
        if self.chars.peek() == Some(&'=') {
            self.bump();
            long
        } else {
            short
        }
    }

    fn number(&mut self, span: Span) -> Result<TokenKind, LexError> {
        let mut literal = self.digits();

        // A fraction needs at least one digit after the dot
        let mut ahead = self.chars.clone();
        if ahead.next() == Some('.') && ahead.next().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            literal.push('.');
            literal.push_str(&self.digits());
            return literal
                .parse()
                .map(TokenKind::Float)
                .map_err(|_| LexError::InvalidNumber { literal, span });
        }

        match literal.parse() {
            Ok(n) => Ok(TokenKind::Int(n)),
            Err(_) => Err(LexError::InvalidNumber { literal, span }),
        }
    }

    fn digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(&ch) = self.chars.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.bump();
        }
        digits
    }

    fn identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(&ch) = self.chars.peek() {
            match ch {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => {
                    ident.push(ch);
                    self.bump();
                }
                _ => break,
            }
        }
        ident
    }

    fn string(&mut self, span: Span) -> Result<TokenKind, LexError> {
        let quote = self.bump();
        let mut value = String::new();

        loop {
            let ch = self
                .bump()
                .ok_or(LexError::UnterminatedString { span })?;
            if Some(ch) == quote {
                return Ok(TokenKind::String(value));
            }
            if ch != '\\' {
                value.push(ch);
                continue;
            }

            let escape_span = Span::new(self.line, self.column - 1);
            let escaped = self
                .bump()
                .ok_or(LexError::UnterminatedString { span })?;
            match escaped {
                'n' => value.push('\n'),
                't' => value.push('\t'),
                'r' => value.push('\r'),
                '0' => value.push('\0'),
                'a' => value.push('\x07'),
                'b' => value.push('\x08'),
                'f' => value.push('\x0c'),
                'v' => value.push('\x0b'),
                '\\' | '\'' | '"' => value.push(escaped),
                '\n' => {} // line continuation
                'x' => value.push(self.hex_escape('x', 2, escape_span)?),
                'u' => value.push(self.hex_escape('u', 4, escape_span)?),
                other => {
                    value.push('\\');
                    value.push(other);
                }
            }
        }
    }

    fn hex_escape(&mut self, prefix: char, width: usize, span: Span) -> Result<char, LexError> {
        let mut sequence = format!("\\{prefix}");
        for _ in 0..width {
            match self.chars.peek() {
                Some(&ch) if ch.is_ascii_hexdigit() => {
                    sequence.push(ch);
                    self.bump();
                }
                _ => return Err(LexError::InvalidEscape { sequence, span }),
            }
        }

        u32::from_str_radix(&sequence[2..], 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or(LexError::InvalidEscape { sequence, span })
    }
}
