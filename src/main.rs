//! CLI driver: run a script file, or drop into a line-edited REPL.
//!
//! Grounded on the teacher's `main.rs` (`env::args` dispatch between
//! `run_file`/`run_prompt`, exit code 64 on misuse) and its own
//! `Cargo.toml` (the declared but never-wired-up `rustyline`/`home`
//! dependencies now actually back the REPL's line editing and history
//! file, per `crate::config::Config`).

use std::process;

use glint::config::Config;
use glint::error::{render_diagnostic, CollectingSink};
use glint::interpreter::Interpreter;
use glint::source::Source;
use glint::Outcome;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = Config::load();
    let mut interpreter = Interpreter::with_config(&config);

    match args.len() {
        n if n > 2 => {
            eprintln!("Usage: glint [script]");
            process::exit(64);
        }
        2 => run_file(&args[1], &mut interpreter),
        _ => run_prompt(&config, &mut interpreter),
    }
}

fn run_file(path: &str, interpreter: &mut Interpreter) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("Couldn't read '{path}': {err}");
            process::exit(66);
        }
    };

    let source = Source::new(text.clone());
    let mut sink = CollectingSink::new();
    let mut print = |line: &str| println!("{line}");
    let outcome = glint::run(&text, interpreter, &mut sink, &mut print);

    for diagnostic in &sink.diagnostics {
        eprintln!("{}", render_diagnostic(&source, diagnostic));
    }

    match outcome {
        Outcome::Ok => {}
        Outcome::StaticError => process::exit(65),
        Outcome::RuntimeError => process::exit(70),
    }
}

fn run_prompt(config: &Config, interpreter: &mut Interpreter) {
    let mut editor = DefaultEditor::new().expect("terminal supports line editing");
    let _ = editor.load_history(&config.history_file);

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());

                let source = Source::new(line.clone());
                let mut sink = CollectingSink::new();
                let mut print = |chunk: &str| println!("{chunk}");
                glint::run(&line, interpreter, &mut sink, &mut print);

                for diagnostic in &sink.diagnostics {
                    eprintln!("{}", render_diagnostic(&source, diagnostic));
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            }
        }
    }

    let _ = editor.save_history(&config.history_file);
}
