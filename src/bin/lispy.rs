extern crate env_logger;
#[macro_use]
extern crate log;
extern crate lispy;
extern crate rustyline;

use lispy::{default_env, repl, run_file, InPort, LineSource};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::env::{args, var};
use std::io;
use std::path::Path;
use std::process;

const DEFAULT_PROMPT: &str = "Lispy> ";

fn main() {
    env_logger::init();

    match args().nth(1) {
        Some(file) => run(file),
        None => run_repl(),
    }
}

fn run(file_path: String) {
    if !Path::new(&file_path).is_file() {
        println!("{} is not a file", file_path);
        return;
    }

    debug!("running {}", file_path);
    if let Err(e) = run_file(&file_path, &default_env(), &mut io::stdout()) {
        eprintln!("{}: {}", e.kind(), e);
        process::exit(1);
    }
}

fn run_repl() {
    let editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("could not start the line editor: {}", e);
            process::exit(1);
        }
    };
    let prompt = var("LISPY_PROMPT").unwrap_or_else(|_| DEFAULT_PROMPT.to_owned());

    eprintln!("Lispy version 2.0");

    let mut port = InPort::new(Prompted { editor, prompt });
    if let Err(e) = repl(&mut port, &default_env(), &mut io::stdout(), true) {
        eprintln!("{}: {}", e.kind(), e);
        process::exit(1);
    }
}

/// Lines typed at the terminal, with history
struct Prompted {
    editor: DefaultEditor,
    prompt: String,
}

impl LineSource for Prompted {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line + "\n"))
            }
            Err(ReadlineError::Eof) => Ok(None),
            // Ctrl-C drops what was typed and prompts again
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
        }
    }
}
