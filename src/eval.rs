//! The per-request pipeline: source string in, display artifacts out.
//!
//! Each request builds its own term tree and its own trace; nothing is
//! shared between requests. On failure the partial trace is dropped with
//! the request — it is never handed out as if it were a completed result.

use thiserror::Error;

use crate::ast::Term;
use crate::lexer::{tokenize, LexError, Token};
use crate::parser::{self, ParseError};
use crate::reduce::{self, EvalError};
use crate::trace::Trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("alpha conversion is not applicable to this expression")]
    AlphaNotApplicable,
}

/// Everything one evaluation request produces for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The token sequence, ending in `EOF`.
    pub tokens: Vec<Token>,
    /// The parsed term, untouched by reduction.
    pub term: Term,
    /// The normal form the term reduced to.
    pub normal_form: Term,
    /// Every step line in order, ending with `Result: <rendering>`.
    pub steps: Vec<String>,
}

/// Runs the whole pipeline once: tokenize, parse, reduce to normal form
/// within `depth_limit`.
///
/// ```
/// use lambda_steps::eval::evaluate;
/// use lambda_steps::reduce::DEFAULT_DEPTH_LIMIT;
///
/// let out = evaluate("((# x . x) y)", DEFAULT_DEPTH_LIMIT).unwrap();
/// assert_eq!(out.normal_form.to_string(), "y");
/// assert_eq!(out.steps.last().unwrap(), "Result: y");
/// ```
pub fn evaluate(input: &str, depth_limit: usize) -> Result<Evaluation, Error> {
    let tokens = tokenize(input)?;
    let term = parser::parse(&tokens)?;
    let mut trace = Trace::new();
    let normal_form = reduce::reduce_to_normal_form(term.clone(), depth_limit, &mut trace)?;
    let mut steps = trace.into_steps();
    steps.push(format!("Result: {}", normal_form));
    Ok(Evaluation {
        tokens,
        term,
        normal_form,
        steps,
    })
}

/// What an alpha conversion request produces for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaConversion {
    pub tokens: Vec<Token>,
    pub term: Term,
    /// The term with its outermost binder renamed.
    pub renamed: Term,
    /// The fresh name that was picked.
    pub new_name: char,
    /// Step lines, ending with `Alpha conversion result: <rendering>`.
    pub steps: Vec<String>,
}

/// Renames the outermost binder of `input` to a name chosen outside the
/// term's free-variable set.
///
/// Only an abstraction has an outermost binder; anything else fails with
/// [`Error::AlphaNotApplicable`].
pub fn alpha_convert_fresh(input: &str) -> Result<AlphaConversion, Error> {
    let tokens = tokenize(input)?;
    let term = parser::parse(&tokens)?;
    let param = match &term {
        Term::Abs { param, .. } => *param,
        _ => return Err(Error::AlphaNotApplicable),
    };
    let new_name = reduce::fresh_name(&term.free_vars())?;
    let mut trace = Trace::new();
    let renamed = reduce::alpha_convert(&term, param, new_name, &mut trace);
    let mut steps = trace.into_steps();
    steps.push(format!("Alpha conversion result: {}", renamed));
    Ok(AlphaConversion {
        tokens,
        term,
        renamed,
        new_name,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;
    use crate::reduce::DEFAULT_DEPTH_LIMIT;

    fn run(input: &str) -> Evaluation {
        evaluate(input, DEFAULT_DEPTH_LIMIT).unwrap()
    }

    #[test]
    fn identity_evaluates_to_itself() {
        let out = run("(# x . x)");
        assert_eq!(out.term, out.normal_form);
        assert_eq!(out.steps.last().unwrap(), "Result: (# x . x)");
    }

    #[test]
    fn beta_step_is_reflected_in_steps() {
        let out = run("((# x . x) y)");
        assert_eq!(out.normal_form.to_string(), "y");
        assert!(out
            .steps
            .iter()
            .any(|s| s.starts_with("Beta Reduction: ")));
        assert_eq!(out.steps.last().unwrap(), "Result: y");
    }

    #[test]
    fn tokens_are_kept_for_display() {
        let out = run("x");
        let kinds: Vec<TokenKind> = out.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Ident('x'), TokenKind::Eof]);
    }

    #[test]
    fn two_requests_do_not_share_steps() {
        let first = run("((# x . x) y)");
        let second = run("z");
        assert!(second.steps.len() < first.steps.len());
        assert_eq!(second.steps.last().unwrap(), "Result: z");
    }

    #[test]
    fn lex_error_propagates() {
        let err = evaluate("x ?", DEFAULT_DEPTH_LIMIT).unwrap_err();
        assert!(matches!(err, Error::Lex(_)));
    }

    #[test]
    fn parse_error_propagates() {
        let err = evaluate("(x", DEFAULT_DEPTH_LIMIT).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn depth_failure_propagates() {
        let err = evaluate("((# x . (x x)) (# x . (x x)))", 20).unwrap_err();
        assert_eq!(
            err,
            Error::Eval(reduce::EvalError::ReductionDepthExceeded { limit: 20 })
        );
    }

    #[test]
    fn alpha_renames_the_outermost_binder() {
        let out = alpha_convert_fresh("(# x . x)").unwrap();
        assert_eq!(out.renamed, Term::abs(out.new_name, Term::Var(out.new_name)));
        assert_eq!(
            out.steps.last().unwrap(),
            &format!("Alpha conversion result: {}", out.renamed)
        );
    }

    #[test]
    fn alpha_avoids_the_free_variables() {
        let out = alpha_convert_fresh("(# x . (x y))").unwrap();
        assert_ne!(out.new_name, 'y');
        let body_free = out.renamed.free_vars();
        assert!(body_free.contains(&'y'));
    }

    #[test]
    fn alpha_rejects_non_abstractions() {
        assert_eq!(
            alpha_convert_fresh("(x y)").unwrap_err(),
            Error::AlphaNotApplicable
        );
        assert_eq!(
            alpha_convert_fresh("3").unwrap_err(),
            Error::AlphaNotApplicable
        );
    }
}
