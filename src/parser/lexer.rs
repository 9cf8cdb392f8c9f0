//! Lexer for SVG path data and transform lists using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r,]+")]
pub enum Token {
    /// Path command letter; uppercase is absolute, lowercase relative
    #[regex(r"[MLHVCSQTAZmlhvcsqtaz]", |lex| lex.slice().chars().next())]
    Command(char),

    /// Optionally signed integer or decimal. Exponents are not part of the
    /// number: `1e5` lexes as `1` and `5`.
    #[regex(r"[-+]?([0-9]*\.[0-9]+|[0-9]+)", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
}

/// Lex input string into tokens with spans
///
/// Characters that belong to no token (exponent markers, parentheses,
/// transform function names) are skipped.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Every number in `input`, in source order
pub fn numbers(input: &str) -> impl Iterator<Item = f64> + '_ {
    lex(input).filter_map(|(tok, _)| match tok {
        Token::Number(n) => Some(n),
        Token::Command(_) => None,
    })
}
