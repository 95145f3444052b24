/// Commands understood by the REPL.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Depth,
    Alpha,
}

pub struct CommandClassifier<'a> {
    pub short_name: &'a str,
    pub long_name: &'a str,
    pub cmd: Command,
    pub arg_expected: bool,
    description: &'a str,
}

pub const COMMAND_CLASSIFIER: &[CommandClassifier] = &[
    CommandClassifier {
        short_name: "h",
        long_name: "help",
        cmd: Command::Help,
        arg_expected: false,
        description: "print this message.",
    },
    CommandClassifier {
        short_name: "d",
        long_name: "depth",
        cmd: Command::Depth,
        arg_expected: true,
        description: "set the reduction depth limit, e.g. :depth 500.",
    },
    CommandClassifier {
        short_name: "a",
        long_name: "alpha",
        cmd: Command::Alpha,
        arg_expected: true,
        description: "rename the outermost binder of an expression to a fresh name.",
    },
];

/// Looks a command up by its short or long name.
pub fn get_command(name: &str) -> Option<&'static CommandClassifier<'static>> {
    for class in COMMAND_CLASSIFIER {
        if name == class.short_name || name == class.long_name {
            return Some(class);
        }
    }
    None
}

pub fn print_usage() {
    println!(
"An untyped lambda calculus evaluator that records every reduction step.

Enter an expression, e.g. ((# x . x) y), to see its tokens, its AST and
every rewriting step down to normal form.

Options:
  -h, --help\tprint this message.
  -d, --depth N\tset the reduction depth limit (default 200).
Any further argument is evaluated as an expression, without a prompt.

Available commands:"
    );
    for command in COMMAND_CLASSIFIER {
        println!(":{}, :{}\t{}",
                 command.short_name,
                 command.long_name,
                 command.description);
    }
}
