//! Calculator module for evaluating keypad expressions.
//!
//! This module provides functionality to:
//! - Strip input down to the arithmetic alphabet
//! - Evaluate expressions with a small precedence-climbing parser
//! - Format and leniently parse numbers the way the display shows them

mod evaluation;
mod number;
mod sanitize;

pub use evaluation::{EvalError, evaluate};
pub use number::{format_number, parse_number};
pub use sanitize::{is_grammar_char, sanitize};
