use std::{
    borrow::Cow,
    env,
};
use rustyline::{
    At,
    Cmd,
    CompletionType,
    Context,
    Editor,
    KeyPress,
    Movement,
    Word,
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::{Highlighter, MatchingBracketHighlighter},
    hint::Hinter,
};
use rustyline_derive::Helper;

use lambda_steps::eval::{alpha_convert_fresh, evaluate};
use lambda_steps::lexer::{Token, TokenKind};

use crate::cmd::{self, Command};

#[derive(Helper)]
struct RustylineHelper {
    // lambda expressions nest parentheses heavily; highlight the match.
    highlighter: MatchingBracketHighlighter,
}

impl Hinter for RustylineHelper {
    fn hint(&self, _line: &str, _pos: usize, _context: &Context) -> Option<String> {
        None
    }
}

impl Completer for RustylineHelper {
    type Candidate = Pair;

    fn complete(&self, _line: &str, _cursor_pos: usize, _context: &Context)
        -> Result<(usize, Vec<Self::Candidate>), ReadlineError>
    {
        Ok((0, Vec::with_capacity(0)))
    }
}

impl Highlighter for RustylineHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: CompletionType
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.highlighter.highlight_char(line, pos)
    }
}

fn make_rustyline_editor(histfile: &str) -> Editor<RustylineHelper> {
    let mut rl = Editor::<RustylineHelper>::new();

    let rustyline_helper = RustylineHelper {
        highlighter: MatchingBracketHighlighter::new(),
    };
    rl.set_helper(Some(rustyline_helper));

    // a missing history file on first run is expected.
    let _ = rl.load_history(histfile);

    rl.bind_sequence(KeyPress::ControlRight,
                     Cmd::Move(Movement::ForwardWord(1, At::Start, Word::Vi)));
    rl.bind_sequence(KeyPress::ControlLeft,
                     Cmd::Move(Movement::BackwardWord(1, Word::Vi)));
    rl
}

fn get_histfile_path() -> String {
    let home_key = "HOME";
    let fallback = "/tmp";
    let filename = "lambda_steps_hist";
    match env::var(home_key) {
        Ok(home) => format!("{}/.cache/{}", home, filename),
        Err(e) => {
            eprintln!("warning: failed to read env variable {} ({}), using fallback {}.",
                      home_key, e, fallback);
            format!("{}/{}", fallback, filename)
        },
    }
}

/// Removes whitespace and the line continuation token (if any) from the
/// end of a line, returning whether there was a line continuation token.
fn strip_whitespace_and_line_cont(line: &mut String) -> bool {
    while let Some(c) = line.chars().next_back() {
        if !c.is_whitespace() {
            break;
        }
        line.pop();
    }
    match line.chars().next_back() {
        Some('&') => {
            line.pop();
            true
        },
        _ => false,
    }
}

pub fn read_eval_print_loop(mut depth_limit: usize) {
    let histfile = get_histfile_path();
    let mut rl = make_rustyline_editor(&histfile);

    loop {
        match rl.readline("> ") {
            Ok(mut line) => {
                while strip_whitespace_and_line_cont(&mut line) {
                    match rl.readline("& ") {
                        Ok(new_line) => line.push_str(&new_line),
                        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                        Err(err) => {
                            eprintln!("error: {:?}", err);
                            break;
                        },
                    };
                }
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str());
                handle_line(&line, &mut depth_limit);
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                break;
            },
            Err(err) => {
                eprintln!("error: {:?}", err);
                break;
            },
        };
    }
    if let Err(_) = rl.save_history(&histfile) {
        eprintln!("failed to save history file");
    };
}

fn handle_line(line: &str, depth_limit: &mut usize) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    match line.strip_prefix(':') {
        Some(rest) => run_command(rest, depth_limit),
        None => print_evaluation(line, *depth_limit),
    }
}

fn run_command(input: &str, depth_limit: &mut usize) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("");
    let arg = parts.next().map(str::trim).unwrap_or("");

    let class = match cmd::get_command(name) {
        Some(class) => class,
        None => {
            eprintln!("unknown command ':{}'; try :help", name);
            return;
        },
    };
    if class.arg_expected && arg.is_empty() {
        eprintln!("command ':{}' expects an argument", class.long_name);
        return;
    }
    match class.cmd {
        Command::Help => cmd::print_usage(),
        Command::Depth => match arg.parse::<usize>() {
            Ok(n) => {
                *depth_limit = n;
                println!("depth limit set to {}", n);
            },
            Err(_) => eprintln!("invalid depth limit '{}'", arg),
        },
        Command::Alpha => print_alpha_conversion(arg),
    }
}

/// Runs one evaluation request and prints everything it produced: the
/// token sequence, the parsed AST, and every step down to the result.
pub fn print_evaluation(input: &str, depth_limit: usize) {
    match evaluate(input, depth_limit) {
        Ok(out) => {
            print_tokens(&out.tokens);
            println!("AST: {}", out.term);
            for step in &out.steps {
                println!("{}", step);
            }
        },
        Err(e) => eprintln!("error: {}", e),
    }
}

fn print_alpha_conversion(input: &str) {
    match alpha_convert_fresh(input) {
        Ok(out) => {
            print_tokens(&out.tokens);
            println!("AST: {}", out.term);
            for step in &out.steps {
                println!("{}", step);
            }
        },
        Err(e) => eprintln!("error: {}", e),
    }
}

fn print_tokens(tokens: &[Token]) {
    let rendered: Vec<String> = tokens.iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.kind.to_string())
        .collect();
    println!("Tokens: {}", rendered.join(" "));
}
