//! Input sanitization for the calculator.
//!
//! Reduces arbitrary display text to the characters the evaluator
//! understands. Anything else is dropped rather than rejected.

/// Operators and grouping symbols accepted by the evaluator.
const SYMBOLS: &[char] = &['+', '-', '*', '/', '.', '(', ')'];

/// Check if a character belongs to the arithmetic alphabet.
pub fn is_grammar_char(c: char) -> bool {
    c.is_ascii_digit() || SYMBOLS.contains(&c)
}

/// Strip every character outside the arithmetic alphabet.
///
/// Whitespace, letters and display glyphs all disappear, so
/// `"12 x 3"` becomes `"123"`. The result may still be an invalid
/// expression; that is for the evaluator to report.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|&c| is_grammar_char(c)).collect()
}
