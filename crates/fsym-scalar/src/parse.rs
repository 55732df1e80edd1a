//! Recursive-descent parser for the scalar boundary grammar.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ['-'] atom ('^' uint)?
//! atom   := integer | '(' expr ')' | 'sqrt' '(' expr ')' | 'i' | symbol
//! symbol := 'x' | 'λ' | 'lambda'
//! ```
//!
//! Integers are arbitrary precision, whitespace is insignificant, and all
//! arithmetic during parsing is exact; a division by zero or a root outside
//! the closure in the literal itself is reported as a parse failure at the
//! offending operator.

use num_bigint::{BigInt, BigUint};
use thiserror::Error;

use crate::scalar::ExactScalar;

/// Boundary rejection for malformed scalar literals. `position` is a byte
/// offset into the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid scalar literal at byte {position}: {message}")]
pub struct InvalidScalarLiteral {
    pub position: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Integer(BigUint),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    Sqrt,
    ImaginaryUnit,
    Indeterminate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    position: usize,
}

/// Largest exponent a literal may carry; bounds the work a single `^`
/// can demand at the parse boundary.
const MAX_EXPONENT: u32 = 512;

/// Parses one scalar literal into an [`ExactScalar`].
pub fn parse_scalar(input: &str) -> Result<ExactScalar, InvalidScalarLiteral> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        end: input.len(),
    };
    let value = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        return Err(error_at(token.position, "unexpected trailing input"));
    }
    Ok(value)
}

fn tokenize(input: &str) -> Result<Vec<Token>, InvalidScalarLiteral> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some(&(position, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let kind = match ch {
            '+' => {
                chars.next();
                TokenKind::Plus
            }
            '-' => {
                chars.next();
                TokenKind::Minus
            }
            '*' => {
                chars.next();
                TokenKind::Star
            }
            '/' => {
                chars.next();
                TokenKind::Slash
            }
            '^' => {
                chars.next();
                TokenKind::Caret
            }
            '(' => {
                chars.next();
                TokenKind::LeftParen
            }
            ')' => {
                chars.next();
                TokenKind::RightParen
            }
            'λ' => {
                chars.next();
                TokenKind::Indeterminate
            }
            _ if ch.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&(_, digit)) = chars.peek() {
                    if digit.is_ascii_digit() {
                        digits.push(digit);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = digits
                    .parse::<BigUint>()
                    .map_err(|_| error_at(position, "malformed integer"))?;
                TokenKind::Integer(value)
            }
            _ if ch.is_ascii_alphabetic() => {
                let mut word = String::new();
                while let Some(&(_, letter)) = chars.peek() {
                    if letter.is_ascii_alphanumeric() {
                        word.push(letter);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "sqrt" => TokenKind::Sqrt,
                    "i" => TokenKind::ImaginaryUnit,
                    "x" | "lambda" => TokenKind::Indeterminate,
                    _ => {
                        return Err(error_at(position, &format!("unknown symbol `{word}`")));
                    }
                }
            }
            _ => {
                return Err(error_at(position, &format!("unexpected character `{ch}`")));
            }
        };
        tokens.push(Token { kind, position });
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn current_position(&self) -> usize {
        self.peek().map_or(self.end, |token| token.position)
    }

    fn expect(&mut self, kind: &TokenKind, label: &str) -> Result<(), InvalidScalarLiteral> {
        match self.peek() {
            Some(token) if token.kind == *kind => {
                self.cursor += 1;
                Ok(())
            }
            _ => Err(error_at(self.current_position(), &format!("expected {label}"))),
        }
    }

    fn parse_expr(&mut self) -> Result<ExactScalar, InvalidScalarLiteral> {
        let mut value = self.parse_term()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Plus => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    value = &value + &rhs;
                }
                TokenKind::Minus => {
                    self.advance();
                    let rhs = self.parse_term()?;
                    value = &value - &rhs;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> Result<ExactScalar, InvalidScalarLiteral> {
        let mut value = self.parse_factor()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Star => {
                    self.advance();
                    let rhs = self.parse_factor()?;
                    value = &value * &rhs;
                }
                TokenKind::Slash => {
                    let position = token.position;
                    self.advance();
                    let rhs = self.parse_factor()?;
                    value = value
                        .checked_div(&rhs)
                        .map_err(|err| error_at(position, &err.to_string()))?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<ExactScalar, InvalidScalarLiteral> {
        let negated = matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Minus));
        if negated {
            self.advance();
        }
        let mut value = self.parse_atom()?;
        if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Caret)) {
            let caret_position = self.current_position();
            self.advance();
            let exponent_token = self.advance().ok_or_else(|| {
                error_at(self.end, "expected an integer exponent")
            })?;
            let TokenKind::Integer(digits) = exponent_token.kind else {
                return Err(error_at(exponent_token.position, "expected an integer exponent"));
            };
            let exponent = u32::try_from(&digits)
                .ok()
                .filter(|&e| e <= MAX_EXPONENT)
                .ok_or_else(|| error_at(caret_position, "exponent too large"))?;
            value = value.pow(exponent);
        }
        Ok(if negated { -&value } else { value })
    }

    fn parse_atom(&mut self) -> Result<ExactScalar, InvalidScalarLiteral> {
        let token = self
            .advance()
            .ok_or_else(|| error_at(self.end, "expected a value"))?;
        match token.kind {
            TokenKind::Integer(digits) => {
                Ok(ExactScalar::from_number(crate::Number::from_bigint(BigInt::from(digits))))
            }
            TokenKind::LeftParen => {
                let value = self.parse_expr()?;
                self.expect(&TokenKind::RightParen, "`)`")?;
                Ok(value)
            }
            TokenKind::Sqrt => {
                self.expect(&TokenKind::LeftParen, "`(` after sqrt")?;
                let argument = self.parse_expr()?;
                self.expect(&TokenKind::RightParen, "`)`")?;
                let Some(number) = argument.to_number() else {
                    return Err(error_at(token.position, "sqrt of a symbolic expression"));
                };
                let root = number
                    .sqrt()
                    .map_err(|err| error_at(token.position, &err.to_string()))?;
                Ok(ExactScalar::from_number(root))
            }
            TokenKind::ImaginaryUnit => Ok(ExactScalar::from_number(crate::Number::i())),
            TokenKind::Indeterminate => Ok(ExactScalar::indeterminate()),
            _ => Err(error_at(token.position, "expected a value")),
        }
    }
}

fn error_at(position: usize, message: &str) -> InvalidScalarLiteral {
    InvalidScalarLiteral {
        position,
        message: message.to_owned(),
    }
}
