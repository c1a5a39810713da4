use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::io::Read;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::object::{Object, Callable};
use crate::error::Unwind;
use crate::stmt::Stmt;
use crate::token::Token;
use crate::literal::Literal;

/// Represents a user defined function in the language.
/// Anonymous functions have no name. A function declared as a method named
/// `init` is an initializer; calling it always yields the bound instance.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Option<Token>,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    /// Returns a copy of this function whose closure additionally binds
    /// `this` to the given instance.
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            closure: Rc::new(RefCell::new(environment)),
            ..self.clone()
        }
    }
}

impl PartialEq for Function {
    /// Two functions are equal when they are the same declaration captured in
    /// the same environment. Binding a method clones it into a fresh closure,
    /// so a bound method never equals the declaration it came from.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.params == other.params
            && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        self.params.iter().zip(arguments).for_each(|(param, argument)| {
            environment.define(&param.lexeme, argument);
        });

        match interpreter.execute_block(&self.body, Rc::new(RefCell::new(environment))) {
            Ok(()) => (),
            Err(Unwind::Return(value)) => {
                if !self.is_initializer {
                    return Ok(value);
                }
            },
            Err(unwind) => return Err(unwind),
        }

        if self.is_initializer {
            // The closure of a bound initializer starts at the scope binding `this`.
            return self.closure.borrow().get_at(0, &Token::from("this")).map_err(Unwind::from);
        }

        Ok(Object::from(Literal::Null))
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<fun {}>", name.lexeme),
            None => write!(f, "<anonymous>"),
        }
    }
}

/// Represents a native function registered in the global scope.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub arity: usize,
    pub function: fn(&mut Interpreter, Vec<Object>) -> Result<Object, Unwind>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::from("__SysClockSeconds"),
                arity: 0,
                function: |_, _| {
                    let now = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .unwrap()
                        .as_secs_f64();
                    Ok(Object::from(now))
                },
            },
            NativeFunction {
                name: Token::from("readline"),
                arity: 0,
                function: |_, _| {
                    let mut input = String::new();
                    match std::io::stdin().read_line(&mut input) {
                        Ok(0) | Err(_) => Ok(Object::from(Literal::Null)),
                        Ok(_) => {
                            if input.ends_with('\n') {
                                input.pop();
                            }
                            if input.ends_with('\r') {
                                input.pop();
                            }
                            Ok(Object::from(input))
                        },
                    }
                },
            },
            NativeFunction {
                name: Token::from("readchar"),
                arity: 0,
                function: |_, _| {
                    let mut buffer = [0u8; 1];
                    match std::io::stdin().read(&mut buffer) {
                        Ok(0) | Err(_) => Ok(Object::from(Literal::Null)),
                        Ok(_) => Ok(Object::from((buffer[0] as char).to_string())),
                    }
                },
            },
        ]
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fun {}>", self.name.lexeme)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fun {}>", self.name.lexeme)
    }
}
