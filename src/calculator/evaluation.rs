//! Expression evaluation.
//!
//! A hand-rolled lexer and precedence-climbing parser for the keypad
//! grammar: decimal literals, `+ - * /`, parentheses and unary minus.
//! Evaluation happens while parsing; there is no intermediate tree.

use thiserror::Error;

/// Maximum nesting of parentheses and unary minus before giving up.
const MAX_DEPTH: usize = 256;

/// Failure to evaluate an expression.
///
/// Callers treat every failure the same way (no preview, no commit), so
/// there is a single kind. The reason is only meant for logs.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid expression: {0}")]
    InvalidExpression(&'static str),
}

type Result<T> = std::result::Result<T, EvalError>;

fn invalid<T>(reason: &'static str) -> Result<T> {
    Err(EvalError::InvalidExpression(reason))
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    /// Binding power of a binary operator, `None` for everything else.
    fn precedence(self) -> Option<u8> {
        match self {
            Token::Plus | Token::Minus => Some(1),
            Token::Star | Token::Slash => Some(2),
            _ => None,
        }
    }
}

/// Evaluate an arithmetic expression.
///
/// Returns the value, or `EvalError::InvalidExpression` for empty input,
/// unbalanced parentheses, dangling or leading operators (other than a
/// unary minus), division by zero, and results that are not finite.
/// Never panics, so it is safe to call on every keystroke.
pub fn evaluate(input: &str) -> Result<f64> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return invalid("empty expression");
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression(0)?;

    match parser.peek() {
        None => {}
        Some(Token::RParen) => return invalid("unmatched closing parenthesis"),
        Some(_) => return invalid("missing operator between operands"),
    }

    if !value.is_finite() {
        return invalid("result is not a finite number");
    }
    Ok(value)
}

fn lex(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            c if c.is_ascii_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = start;
                let mut digits = 0;
                let mut decimal = false;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() {
                        digits += 1;
                    } else if d == '.' {
                        if decimal {
                            return invalid("repeated decimal point");
                        }
                        decimal = true;
                    } else {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                if digits == 0 {
                    return invalid("decimal point without digits");
                }
                match input[start..end].parse::<f64>() {
                    Ok(n) => Token::Number(n),
                    Err(_) => return invalid("malformed number"),
                }
            }
            _ => {
                chars.next();
                match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    _ => return invalid("unexpected character"),
                }
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return invalid("expression nested too deeply");
        }
        Ok(())
    }

    /// Parse a run of binary operators whose precedence is at least `min`.
    fn expression(&mut self, min: u8) -> Result<f64> {
        let mut lhs = self.operand()?;
        while let Some(op) = self.peek() {
            let Some(precedence) = op.precedence() else {
                break;
            };
            if precedence < min {
                break;
            }
            self.next();
            // Left associative: the right side only takes tighter operators.
            let rhs = self.expression(precedence + 1)?;
            lhs = apply(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn operand(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Minus) => {
                self.descend()?;
                let value = self.operand()?;
                self.depth -= 1;
                Ok(-value)
            }
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expression(0)?;
                if self.next() != Some(Token::RParen) {
                    return invalid("unmatched opening parenthesis");
                }
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::RParen) => invalid("unexpected closing parenthesis"),
            Some(_) => invalid("operator without left operand"),
            None => invalid("operator without right operand"),
        }
    }
}

fn apply(op: Token, lhs: f64, rhs: f64) -> Result<f64> {
    match op {
        Token::Plus => Ok(lhs + rhs),
        Token::Minus => Ok(lhs - rhs),
        Token::Star => Ok(lhs * rhs),
        Token::Slash if rhs == 0.0 => invalid("division by zero"),
        Token::Slash => Ok(lhs / rhs),
        _ => invalid("not a binary operator"),
    }
}
