//! Arithmetic evaluator for the `calc` command.
//!
//! Accepts numeric literals, `+ - * /`, unary sign and parentheses with the
//! usual precedence. Input is checked against the allowed character set
//! before any parsing happens. `++` and `--` are rejected as in JavaScript,
//! where they are increment operators, and nesting is capped at
//! [`MAX_DEPTH`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("character {0:?} is not allowed")]
    DisallowedChar(char),

    #[error("invalid number literal {0:?}")]
    BadNumber(String),

    #[error("unexpected token at offset {0}")]
    UnexpectedToken(usize),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("result is not a number")]
    NotANumber,

    #[error("expression nests deeper than {MAX_DEPTH} levels")]
    TooDeep,
}

/// Deepest allowed nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 256;

pub type Result<T> = std::result::Result<T, CalcError>;

/// Characters `calc` accepts.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.' | '(' | ')')
}

/// Reject anything outside the allowed character set.
pub fn check_charset(expr: &str) -> Result<()> {
    match expr.chars().find(|c| !is_allowed_char(*c)) {
        Some(c) => Err(CalcError::DisallowedChar(c)),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Result<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let bytes = expr.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        let tok = match c {
            '+' | '-' if bytes.get(i + 1) == Some(&bytes[i]) => {
                return Err(CalcError::UnexpectedToken(i));
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' | '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                let literal = &expr[start..i];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| CalcError::BadNumber(literal.to_string()))?;
                tokens.push((start, Token::Num(value)));
                continue;
            }
            other => return Err(CalcError::DisallowedChar(other)),
        };
        tokens.push((i, tok));
        i += 1;
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<(usize, Token)>) -> Self {
        Self { tokens, pos: 0, depth: 0 }
    }

    /// Run `f` one nesting level deeper.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Result<f64>) -> Result<f64> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let value = f(self);
        self.depth -= 1;
        value
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(_, t)| *t)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map(|(o, _)| *o).unwrap_or(0)
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<f64> {
        let mut value = self.parse_term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.advance();
            let rhs = self.parse_term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn parse_term(&mut self) -> Result<f64> {
        let mut value = self.parse_unary()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.advance();
            let rhs = self.parse_unary()?;
            value = if op == Token::Star { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    // unary := ('+' | '-') unary | factor
    fn parse_unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.nested(Self::parse_unary)?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_factor(),
        }
    }

    // factor := number | '(' expr ')'
    fn parse_factor(&mut self) -> Result<f64> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.nested(Self::parse_expr)?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(_) => Err(CalcError::UnexpectedToken(self.tokens[self.pos - 1].0)),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(_) => Err(CalcError::UnexpectedToken(offset)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(expr: &str) -> Result<f64> {
    check_charset(expr)?;
    let tokens = tokenize(expr)?;
    let mut parser = Parser::new(tokens);
    let value = parser.parse_expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(CalcError::UnexpectedToken(parser.offset()));
    }
    if value.is_nan() {
        return Err(CalcError::NotANumber);
    }
    Ok(value)
}

/// Render a result the way a browser console prints numbers.
///
/// Magnitudes from `1e-6` up to `1e21` print in plain decimal, anything
/// outside in exponent form with an explicit sign (`1e+40`, `1e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if value == 0.0 {
        // no negative zero
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }
    let exponent_form = format!("{:e}", value);
    match exponent_form.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => exponent_form,
    }
}
