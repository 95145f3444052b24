use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

/// What a token is, plus its literal payload where one exists.
///
/// These spellings all lex as the abstraction marker:
///
/// ```
/// use lambda_steps::lexer::{tokenize, TokenKind};
///
/// for src in &["#", "λ", "\\"] {
///     assert_eq!(tokenize(src).unwrap()[0].kind, TokenKind::Lambda);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident(char),
    Numeral(u64),
    Lambda,
    Dot,
    OpenParen,
    CloseParen,
    Eof,
}

/// One token with the position (in characters) it started at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized character '{ch}' at position {pos}")]
pub struct LexError {
    pub ch: char,
    pub pos: usize,
}

/// Splits a source string into tokens, eagerly.
///
/// The whole input is scanned up front because the parser needs lookahead
/// and the token list is also displayed to the user as-is. Whitespace
/// separates tokens and is otherwise discarded. The returned sequence
/// always ends with an `Eof` token.
///
/// ```
/// use lambda_steps::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("(# x . x)").unwrap();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![
///     TokenKind::OpenParen,
///     TokenKind::Lambda,
///     TokenKind::Ident('x'),
///     TokenKind::Dot,
///     TokenKind::Ident('x'),
///     TokenKind::CloseParen,
///     TokenKind::Eof,
/// ]);
/// ```
pub fn tokenize(src: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let start = pos;
        let c = chars[pos];
        if c.is_whitespace() {
            pos += 1;
            continue;
        }
        // the marker arm must come before the identifier arm: 'λ' is
        // alphabetic too.
        let kind = match c {
            '#' | 'λ' | '\\' => {
                pos += 1;
                TokenKind::Lambda
            }
            '.' => {
                pos += 1;
                TokenKind::Dot
            }
            '(' => {
                pos += 1;
                TokenKind::OpenParen
            }
            ')' => {
                pos += 1;
                TokenKind::CloseParen
            }
            _ if c.is_ascii_digit() => {
                let mut lexeme = String::new();
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    lexeme.push(chars[pos]);
                    pos += 1;
                }
                let value = lexeme
                    .parse::<u64>()
                    .map_err(|_| LexError { ch: c, pos: start })?;
                TokenKind::Numeral(value)
            }
            _ if c.is_alphabetic() => {
                pos += 1;
                TokenKind::Ident(c)
            }
            other => return Err(LexError { ch: other, pos: start }),
        };
        tokens.push(Token { kind, pos: start });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        pos: chars.len(),
    });
    Ok(tokens)
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "IDENT({})", name),
            TokenKind::Numeral(value) => write!(f, "NUMERAL({})", value),
            TokenKind::Lambda => write!(f, "LAMBDA"),
            TokenKind::Dot => write!(f, "DOT"),
            TokenKind::OpenParen => write!(f, "LPAREN"),
            TokenKind::CloseParen => write!(f, "RPAREN"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .unwrap()
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \t\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn identity_with_numeral_argument() {
        // "(# x . x) 3" from the reference scenarios.
        assert_eq!(
            kinds("(# x . x) 3"),
            vec![
                TokenKind::OpenParen,
                TokenKind::Lambda,
                TokenKind::Ident('x'),
                TokenKind::Dot,
                TokenKind::Ident('x'),
                TokenKind::CloseParen,
                TokenKind::Numeral(3),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(kinds("(#x.x)"), kinds(" ( # x . x ) "));
    }

    #[test]
    fn alternative_marker_spellings() {
        assert_eq!(kinds("# x . x"), kinds("λ x . x"));
        assert_eq!(kinds("# x . x"), kinds("\\ x . x"));
    }

    #[test]
    fn adjacent_letters_are_separate_idents() {
        // names are single characters, so "xy" is two tokens.
        assert_eq!(
            kinds("xy"),
            vec![TokenKind::Ident('x'), TokenKind::Ident('y'), TokenKind::Eof]
        );
    }

    #[test]
    fn multi_digit_numeral() {
        assert_eq!(
            kinds("128"),
            vec![TokenKind::Numeral(128), TokenKind::Eof]
        );
    }

    #[test]
    fn token_positions_are_recorded() {
        let tokens = tokenize("(x 3)").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn unrecognized_character_fails() {
        let err = tokenize("(x ? y)").unwrap_err();
        assert_eq!(err, LexError { ch: '?', pos: 3 });
    }

    #[test]
    fn error_reports_first_bad_character() {
        let err = tokenize("x + y * z").unwrap_err();
        assert_eq!(err.ch, '+');
        assert_eq!(err.pos, 2);
    }

    #[test]
    fn kind_display_matches_classifier_names() {
        assert_eq!("IDENT(x)", TokenKind::Ident('x').to_string());
        assert_eq!("NUMERAL(3)", TokenKind::Numeral(3).to_string());
        assert_eq!("LPAREN", TokenKind::OpenParen.to_string());
        assert_eq!("LAMBDA", TokenKind::Lambda.to_string());
        assert_eq!("DOT", TokenKind::Dot.to_string());
        assert_eq!("RPAREN", TokenKind::CloseParen.to_string());
        assert_eq!("EOF", TokenKind::Eof.to_string());
    }
}
