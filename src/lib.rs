#![allow(clippy::needless_return)]

//! Shale is a small dynamically typed scripting language written in Rust. It
//! has classes, first-class functions, closures and lexical scoping, and it
//! runs as a tree-walk interpreter over a hand-written recursive descent
//! parser.
//!
//! ## Scanning
//! The first step is scanning: turning the source string into a list of
//! tokens. A token is a single unit of the language; the string `1 + 2`
//! becomes `[Number(1), Plus, Number(2)]`. The scanner is implemented in the
//! [`scanner`](scanner) module as a single forward pass over the characters
//! of the source with a small lookahead. Trivial problems like an
//! unterminated string or a stray character are reported as a
//! [`ScanError`](error::ScanError) and scanning continues, so several
//! lexical errors can be reported in one run.
//!
//! ## Parsing
//! The second step is parsing: turning the list of tokens into an abstract
//! syntax tree. The parser is implemented in the [`parser`](parser) module
//! as a recursive descent parser. [`Expressions`](expr::Expr) are pieces of
//! code that produce a value, specifically an [`Object`](object::Object).
//! Objects are an umbrella term for all types of values in Shale including
//! literals, functions, classes and instances. [`Statements`](stmt::Stmt)
//! are pieces of code that perform an action instead of producing a value,
//! like a variable decleration or an if clause. Syntax errors are reported
//! as a [`ParseError`](error::ParseError); after one, the parser
//! synchronizes to the next statement boundary and keeps going, so several
//! syntax errors can be reported in one run.
//!
//! ## Resolving
//! The third step is resolving. The [`resolver`](resolver) walks the tree
//! once and computes, for every use of a name, how many scopes lie between
//! the use and the declaration it refers to. The interpreter later follows
//! exactly that many parent links, which keeps closures honest: a function
//! always sees the variables that were in scope where it was defined, even
//! if a shadowing declaration appears later. Semantically invalid but
//! syntactically fine code, like reading a variable in its own initializer
//! or using `this` outside of a class, is reported here as a
//! [`ResolveError`](error::ResolveError).
//!
//! ## Interpreting
//! The final step is interpreting. The [`interpreter`](interpreter) walks
//! the tree and evaluates each node against a chain of
//! [`Environments`](environment::Environment), one per active scope. Errors
//! that can only be caught at runtime, like adding a string to a number or
//! calling an undefined function, are reported as a
//! [`RuntimeError`](error::RuntimeError) and stop the program.
//!
//! Any error found in a phase stops the pipeline after that phase: a
//! program with a parse error is never resolved, and a program with a
//! resolve error is never run.

use std::{fs, process};
use std::io::Write;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub mod error;
pub mod token;
pub mod scanner;
pub mod expr;
pub mod stmt;
pub mod environment;
pub mod parser;
pub mod ast;
pub mod interpreter;
pub mod literal;
pub mod object;
pub mod function;
pub mod resolver;
pub mod class;

use parser::Parser;
use scanner::Scanner;
use resolver::Resolver;

#[allow(non_camel_case_types)]
pub struct shale<'a> {
    interpreter: interpreter::Interpreter<'a>,
}

impl<'a> shale<'a> {
    /// Creates a new interpreter writing program output to the given writer.
    pub fn new(output: &'a mut dyn Write) -> Self {
        shale {
            interpreter: interpreter::Interpreter::new(output),
        }
    }

    /// Runs the given file and exits the process on error.
    /// Static errors exit with code 2 and runtime errors with code 3.
    pub fn run_file(&mut self, path: String) {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                eprintln!("Could not read file '{path}': {error}");
                process::exit(1);
            },
        };

        self.run(&contents);

        if error::did_static_error() {
            process::exit(2);
        }
        if error::did_runtime_error() {
            process::exit(3);
        }
    }

    /// Runs an interactive prompt until end of input.
    /// Errors are reset after every line so the session can continue.
    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("prompt to initialize");

        let history = home::home_dir().map(|path| path.join(".shale_history"));
        if let Some(path) = &history {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(&line);
                    self.run(&line);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("{error}");
                    break;
                },
            }
        }

        if let Some(path) = &history {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: &str) {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}
