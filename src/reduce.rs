use std::collections::HashSet;

use thiserror::Error;

use crate::ast::Term;
use crate::trace::Trace;

/// Default bound on reduction depth. Tunable per call; the binary exposes
/// it as `--depth` and the `:depth` command.
pub const DEFAULT_DEPTH_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("ran out of fresh variable names")]
    NoFreshNameAvailable,
    #[error("exceeded the depth limit of {limit} during reduction")]
    ReductionDepthExceeded { limit: usize },
}

/// Picks a lowercase letter not present in `used`.
///
/// Which letter comes back is unspecified; callers may only rely on it
/// being unused. With all 26 letters taken, fails with
/// `NoFreshNameAvailable`.
pub fn fresh_name(used: &HashSet<char>) -> Result<char, EvalError> {
    ('a'..='z')
        .find(|c| !used.contains(c))
        .ok_or(EvalError::NoFreshNameAvailable)
}

/// Renames `old` to `new` throughout `term`: every variable named `old`
/// and every binder named `old`, including binders of nested abstractions.
/// Everything else is rebuilt structurally unchanged.
///
/// Every node visited appends one trace line. The caller is responsible
/// for picking `new` outside the term's free-variable set; this function
/// does not check freshness.
///
/// ```
/// use lambda_steps::parser::parse_str;
/// use lambda_steps::reduce::alpha_convert;
/// use lambda_steps::trace::Trace;
///
/// let term = parse_str("(# x . x)").unwrap();
/// let renamed = alpha_convert(&term, 'x', 'z', &mut Trace::new());
/// assert_eq!(renamed, parse_str("(# z . z)").unwrap());
/// ```
pub fn alpha_convert(term: &Term, old: char, new: char, trace: &mut Trace) -> Term {
    let result = match term {
        Term::Var(name) => {
            if *name == old {
                Term::Var(new)
            } else {
                term.clone()
            }
        }
        Term::Abs { param, body } => {
            let new_body = alpha_convert(body, old, new, trace);
            let new_param = if *param == old { new } else { *param };
            Term::abs(new_param, new_body)
        }
        Term::App(func, arg) => {
            let new_func = alpha_convert(func, old, new, trace);
            let new_arg = alpha_convert(arg, old, new, trace);
            Term::app(new_func, new_arg)
        }
        Term::Num(_) => term.clone(),
    };
    trace.log(format!(
        "Alpha Conversion: {} -> {} in {} = {}",
        old, new, term, result
    ));
    result
}

/// Replaces every free occurrence of `name` in `body` with `value`.
///
/// A binder equal to `name` shadows it: the whole abstraction is returned
/// untouched. Numerals are inert and are the one case that does not get a
/// trace line; every other call appends one, innermost first.
///
/// Known limitation: this substitution is not capture-avoiding. A binder
/// inside `body` that happens to match a free variable of `value` will
/// capture it:
///
/// ```
/// use lambda_steps::parser::parse_str;
/// use lambda_steps::reduce::substitute;
/// use lambda_steps::trace::Trace;
///
/// let body = parse_str("(# y . x)").unwrap();
/// let value = parse_str("y").unwrap();
/// let out = substitute(&body, 'x', &value, &mut Trace::new());
/// // y was free in `value`, and is now bound by the inner binder.
/// assert_eq!(out, parse_str("(# y . y)").unwrap());
/// ```
///
/// Callers that must avoid capture rename the offending binder with
/// [`alpha_convert`] first.
pub fn substitute(body: &Term, name: char, value: &Term, trace: &mut Trace) -> Term {
    let result = match body {
        Term::Num(_) => return body.clone(),
        Term::Var(n) => {
            if *n == name {
                value.clone()
            } else {
                body.clone()
            }
        }
        Term::Abs { param, body: inner } => {
            if *param == name {
                // shadowed, nothing to substitute inside
                body.clone()
            } else {
                Term::abs(*param, substitute(inner, name, value, trace))
            }
        }
        Term::App(func, arg) => {
            let new_func = substitute(func, name, value, trace);
            let new_arg = substitute(arg, name, value, trace);
            Term::app(new_func, new_arg)
        }
    };
    trace.log(format!(
        "Substitution: {} -> {} in {} = {}",
        name, value, body, result
    ));
    result
}

/// Reduces `term` to normal form using the normal order strategy
/// (leftmost outermost redex first), logging every step.
///
/// The reduction is a fix-point loop: a beta step rewrites the whole
/// current term and the loop starts over on the result. Sub-terms are
/// reduced by bounded recursion. Both recursive descent and the loop's own
/// rewrites count against `limit`, so a term with no normal form (e.g.
/// `((# x . (x x)) (# x . (x x)))`) fails with `ReductionDepthExceeded`
/// instead of looping:
///
/// ```
/// use lambda_steps::parser::parse_str;
/// use lambda_steps::reduce::{reduce_to_normal_form, EvalError};
/// use lambda_steps::trace::Trace;
///
/// let omega = parse_str("((# x . (x x)) (# x . (x x)))").unwrap();
/// let err = reduce_to_normal_form(omega, 50, &mut Trace::new());
/// assert_eq!(err, Err(EvalError::ReductionDepthExceeded { limit: 50 }));
/// ```
///
/// "No change" is structural equality, so a term that rewrites to itself
/// syntactically is only ever stopped by the depth budget.
pub fn reduce_to_normal_form(
    term: Term,
    limit: usize,
    trace: &mut Trace,
) -> Result<Term, EvalError> {
    reduce_bounded(term, 0, limit, trace)
}

fn reduce_bounded(
    start: Term,
    mut depth: usize,
    limit: usize,
    trace: &mut Trace,
) -> Result<Term, EvalError> {
    let mut expr = start;
    loop {
        if depth > limit {
            return Err(EvalError::ReductionDepthExceeded { limit });
        }
        trace.log(format!("Reducing: {}", expr));
        match expr {
            Term::App(func, arg) => match *func {
                Term::Abs { param, body } => {
                    let result = substitute(&body, param, &arg, trace);
                    let func = Term::Abs { param, body };
                    trace.log(format!(
                        "Beta Reduction: ({}) ({}) -> {}",
                        func, arg, result
                    ));
                    expr = result;
                    depth += 1;
                }
                func => {
                    let reduced_func = reduce_bounded(func.clone(), depth + 1, limit, trace)?;
                    let reduced_arg = reduce_bounded((*arg).clone(), depth + 1, limit, trace)?;
                    if reduced_func != func || reduced_arg != *arg {
                        trace.log(format!(
                            "App Reduction: ({}) ({}) -> ({}) ({})",
                            func, arg, reduced_func, reduced_arg
                        ));
                        expr = Term::app(reduced_func, reduced_arg);
                        depth += 1;
                    } else {
                        expr = Term::App(Box::new(func), arg);
                        break;
                    }
                }
            },
            Term::Abs { param, body } => {
                let reduced_body = reduce_bounded((*body).clone(), depth + 1, limit, trace)?;
                if reduced_body != *body {
                    let rebuilt = Term::abs(param, reduced_body);
                    trace.log(format!(
                        "Lambda Reduction: {} -> {}",
                        Term::Abs { param, body },
                        rebuilt
                    ));
                    expr = rebuilt;
                    depth += 1;
                } else {
                    expr = Term::Abs { param, body };
                    break;
                }
            }
            leaf => {
                // variables and numerals are irreducible
                expr = leaf;
                break;
            }
        }
    }
    Ok(expr)
}
