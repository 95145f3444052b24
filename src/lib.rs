pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod reduce;
pub mod trace;

pub use ast::Term;
pub use eval::{alpha_convert_fresh, evaluate, AlphaConversion, Error, Evaluation};
pub use trace::Trace;
