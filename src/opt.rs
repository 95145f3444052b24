use std::env;

use lambda_steps::reduce::DEFAULT_DEPTH_LIMIT;

use crate::cmd;

pub struct Options {
    pub depth_limit: usize,
    /// Expressions given on the command line; when non-empty they are
    /// evaluated one by one and no prompt is started.
    pub exprs: Vec<String>,
}

// Returns None if the process should exit without evaluating anything.
pub fn parse_cmdline_options() -> Option<Options> {
    let mut options = Options {
        depth_limit: DEFAULT_DEPTH_LIMIT,
        exprs: Vec::new(),
    };
    let mut args = env::args();

    // skip program name
    args.next();

    while let Some(arg) = args.next() {
        if arg == "-h" || arg == "--help" {
            cmd::print_usage();
            return None;
        } else if arg == "-d" || arg == "--depth" {
            let value = match args.next() {
                Some(v) => v,
                None => {
                    eprintln!("option '{}' expects a number", arg);
                    return None;
                }
            };
            match value.parse::<usize>() {
                Ok(n) => options.depth_limit = n,
                Err(_) => {
                    eprintln!("invalid depth limit '{}'", value);
                    return None;
                }
            }
        } else {
            // everything else is an expression to be evaluated.
            options.exprs.push(arg);
        }
    }
    Some(options)
}
