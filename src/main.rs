mod cmd;
mod opt;
mod repl;

fn main() {
    let options = match opt::parse_cmdline_options() {
        Some(options) => options,
        None => return,
    };
    if options.exprs.is_empty() {
        repl::read_eval_print_loop(options.depth_limit);
    } else {
        for expr in &options.exprs {
            repl::print_evaluation(expr, options.depth_limit);
        }
    }
}
