use thiserror::Error;

use crate::ast::Term;
use crate::lexer::{tokenize, LexError, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: TokenKind, pos: usize },
    #[error("expected a binder name after the abstraction marker, at position {pos}")]
    MissingBinder { pos: usize },
    #[error("expected '.' after the binder, at position {pos}")]
    MissingDot { pos: usize },
    #[error("unmatched '(' opened at position {pos}")]
    UnmatchedParen { pos: usize },
    #[error("trailing input after the expression, at position {pos}")]
    TrailingTokens { pos: usize },
}

/// Our hand-written recursive descent parser.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// expression := LAMBDA IDENT DOT expression
///             | atom+                          (left associative)
/// atom       := IDENT | NUMERAL | '(' expression ')'
/// ```
///
/// Application binds tighter than abstraction, and an abstraction body
/// stretches as far right as possible:
///
/// ```
/// use lambda_steps::parser::parse_str;
///
/// assert_eq!(parse_str("a b c"), parse_str("((a b) c)"));
/// assert_eq!(parse_str("# x . x y"), parse_str("(# x . (x y))"));
/// ```
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

/// Parses a full token sequence (as produced by [`tokenize`]) into exactly
/// one term. Anything left over after the expression is an error.
pub fn parse(tokens: &[Token]) -> Result<Term, ParseError> {
    Parser::new(tokens).parse()
}

/// Lexes and parses in one go. Fails with the lexer's error if the input
/// cannot even be tokenized.
pub fn parse_str(src: &str) -> Result<Term, ParseError> {
    let tokens = tokenize(src)?;
    parse(&tokens)
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        Parser { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> Result<Term, ParseError> {
        let term = self.expression()?;
        let next = self.peek();
        match next.kind {
            TokenKind::Eof => Ok(term),
            _ => Err(ParseError::TrailingTokens { pos: next.pos }),
        }
    }

    fn expression(&mut self) -> Result<Term, ParseError> {
        match self.peek().kind {
            TokenKind::Lambda => self.abstraction(),
            _ => self.application(),
        }
    }

    fn abstraction(&mut self) -> Result<Term, ParseError> {
        self.bump(); // the abstraction marker
        let param = match self.peek().kind {
            TokenKind::Ident(name) => {
                self.bump();
                name
            }
            _ => return Err(ParseError::MissingBinder { pos: self.peek().pos }),
        };
        match self.peek().kind {
            TokenKind::Dot => {
                self.bump();
            }
            _ => return Err(ParseError::MissingDot { pos: self.peek().pos }),
        }
        let body = self.expression()?;
        Ok(Term::abs(param, body))
    }

    fn application(&mut self) -> Result<Term, ParseError> {
        let mut term = self.atom()?;
        while self.at_atom_start() {
            let arg = self.atom()?;
            // left associative
            term = Term::app(term, arg);
        }
        Ok(term)
    }

    fn atom(&mut self) -> Result<Term, ParseError> {
        let token = self.bump();
        match token.kind {
            TokenKind::Ident(name) => Ok(Term::Var(name)),
            TokenKind::Numeral(value) => Ok(Term::Num(value)),
            TokenKind::OpenParen => {
                let inner = self.expression()?;
                match self.peek().kind {
                    TokenKind::CloseParen => {
                        self.bump();
                        Ok(inner)
                    }
                    _ => Err(ParseError::UnmatchedParen { pos: token.pos }),
                }
            }
            found => Err(ParseError::UnexpectedToken {
                found,
                pos: token.pos,
            }),
        }
    }

    fn at_atom_start(&self) -> bool {
        match self.peek().kind {
            TokenKind::Ident(_) | TokenKind::Numeral(_) | TokenKind::OpenParen => true,
            _ => false,
        }
    }

    fn peek(&self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => *token,
            // tokenize() always ends the sequence with Eof; this covers
            // hand-built token slices that don't.
            None => Token {
                kind: TokenKind::Eof,
                pos: self.pos,
            },
        }
    }

    fn bump(&mut self) -> Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }
}
