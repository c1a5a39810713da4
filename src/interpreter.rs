use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, GetData, GroupingData, LogicalData,
    SetData, ThisData, UnaryData, VariableData,
};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{self, Stmt, StmtVisitor};
use crate::token::{Token, Type};

pub type EvalResult = Result<Object, Unwind>;
pub type ExecResult = Result<(), Unwind>;

fn numbers_error(operator: &Token) -> Unwind {
    RuntimeError {
        token: operator.clone(),
        message: "Operands must be a numbers.".to_string(),
    }.into()
}

/// Evaluates the program by walking its tree.
///
/// The interpreter owns the global scope (pre-populated with the native
/// functions) and tracks the environment of the innermost block being
/// executed. Variable uses resolved by the resolver are read at their
/// recorded distance up the chain; unresolved names fall back to a dynamic
/// lookup in the globals. Program output goes to the injected writer so
/// tests can capture it.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<usize, usize>,
    output: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(output: &'a mut dyn Write) -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            globals: Rc::clone(&globals),
            environment: globals,
            locals: HashMap::new(),
            output,
        }
    }

    /// Interprets the statements until the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => (),
                Err(Unwind::Error(error)) => {
                    error.throw();
                    return;
                },
                // A return or break escaping to the top level is rejected
                // during parsing or resolution, so there is nothing to run.
                Err(_) => return,
            }
        }
    }

    /// Records the scope distance for a name-bearing expression.
    pub fn resolve(&mut self, id: usize, depth: usize) {
        self.locals.insert(id, depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    /// Executes the statements in the given environment and restores the
    /// previous environment on every exit path, unwinds included.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    /// Reads a variable at its resolved distance, or from the globals when
    /// the resolver left it unresolved.
    fn look_up_variable(&self, id: usize, name: &Token) -> EvalResult {
        match self.locals.get(&id) {
            Some(distance) => self.environment.borrow().get_at(*distance, name).map_err(Unwind::from),
            None => self.globals.borrow().get(name).map_err(Unwind::from),
        }
    }
}

impl<'a> ExprVisitor<EvalResult> for Interpreter<'a> {
    fn visit_literal_expr(&mut self, literal: &Literal) -> EvalResult {
        Ok(Object::from(literal.clone()))
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> EvalResult {
        self.look_up_variable(variable.id, &variable.name)
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> EvalResult {
        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> EvalResult {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: unary.operator.clone(),
                message: "Operand must be a number.".to_string(),
            }.into()),
            Type::Bang => Ok(!right),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> EvalResult {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        let operator = &binary.operator;
        match operator.r#type {
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: operator.clone(),
                message: "Invalid operand(s) for '+'.".to_string(),
            }.into()),
            Type::Minus => (left - right).ok_or_else(|| numbers_error(operator)),
            Type::Star => (left * right).ok_or_else(|| numbers_error(operator)),
            Type::Slash => (left / right).ok_or_else(|| numbers_error(operator)),
            Type::Amp => (left & right).ok_or_else(|| numbers_error(operator)),
            Type::Pipe => (left | right).ok_or_else(|| numbers_error(operator)),
            Type::Caret => (left ^ right).ok_or_else(|| numbers_error(operator)),
            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                match left.partial_cmp(&right) {
                    Some(ordering) => Ok(Object::from(match operator.r#type {
                        Type::Greater => ordering.is_gt(),
                        Type::GreaterEqual => ordering.is_ge(),
                        Type::Less => ordering.is_lt(),
                        Type::LessEqual => ordering.is_le(),
                        _ => unreachable!(),
                    })),
                    None => Err(RuntimeError {
                        token: operator.clone(),
                        message: "Both operands must be comparable to each other.".to_string(),
                    }.into()),
                }
            },
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> EvalResult {
        let left = self.evaluate(&logical.left)?;

        // The deciding operand is the result; the other side only runs
        // when the left side does not settle the answer.
        match logical.operator.r#type {
            Type::Or | Type::PipePipe => {
                if left.as_bool() {
                    return Ok(left);
                }
            },
            _ => {
                if !left.as_bool() {
                    return Ok(left);
                }
            },
        }

        self.evaluate(&logical.right)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> EvalResult {
        let mut value = self.evaluate(&assign.value)?;

        if assign.operator.r#type != Type::Equal {
            let current = self.look_up_variable(assign.id, &assign.name)?;

            value = match (current, assign.operator.r#type, value) {
                (Object::Literal(Literal::Number(left)), Type::PlusEqual, Object::Literal(Literal::Number(right))) => {
                    Object::from(left + right)
                },
                (Object::Literal(Literal::Number(left)), Type::MinusEqual, Object::Literal(Literal::Number(right))) => {
                    Object::from(left - right)
                },
                _ => return Err(numbers_error(&assign.operator)),
            };
        }

        match self.locals.get(&assign.id) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => {
                self.globals.borrow_mut().assign(&assign.name, value.clone())?;
            },
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> EvalResult {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(function) => function,
            Object::Class(class) => class,
            _ => {
                return Err(RuntimeError {
                    token: call.paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                }.into());
            },
        };

        if callable.arity() != arguments.len() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!(
                    "Expected {} arguments but got {}.",
                    callable.arity(),
                    arguments.len()
                ),
            }.into());
        }

        callable.call(self, arguments)
    }

    fn visit_function_expr(&mut self, function: &crate::expr::FunctionData) -> EvalResult {
        Ok(Object::from(Function {
            name: None,
            params: function.params.clone(),
            body: function.body.clone(),
            closure: Rc::clone(&self.environment),
            is_initializer: false,
        }))
    }

    fn visit_get_expr(&mut self, get: &GetData) -> EvalResult {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&get.name, &object),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }.into()),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> EvalResult {
        if set.operator.r#type != Type::Equal {
            return Err(RuntimeError {
                token: set.operator.clone(),
                message: "Invalid assignment target.".to_string(),
            }.into());
        }

        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            }.into());
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> EvalResult {
        self.look_up_variable(this.id, &this.keyword)
    }
}

impl<'a> StmtVisitor<ExecResult> for Interpreter<'a> {
    fn visit_expression_stmt(&mut self, stmt: &stmt::ExpressionData) -> ExecResult {
        self.evaluate(&stmt.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::PrintData) -> ExecResult {
        let value = self.evaluate(&stmt.expr)?;
        writeln!(self.output, "{value}").expect("write program output");
        Ok(())
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::VarData) -> ExecResult {
        let value = match &stmt.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Null),
        };

        self.environment.borrow_mut().define(&stmt.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, stmt: &stmt::BlockData) -> ExecResult {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&stmt.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::IfData) -> ExecResult {
        if self.evaluate(&stmt.condition)?.as_bool() {
            self.execute(&stmt.then_branch)
        } else if let Some(else_branch) = &stmt.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::WhileData) -> ExecResult {
        while self.evaluate(&stmt.condition)?.as_bool() {
            match self.execute(&stmt.body) {
                Ok(()) => (),
                // A break only exits the innermost loop.
                Err(Unwind::Break) => break,
                Err(unwind) => return Err(unwind),
            }
        }

        Ok(())
    }

    fn visit_break_stmt(&mut self) -> ExecResult {
        Err(Unwind::Break)
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::FunctionData) -> ExecResult {
        let function = Function {
            name: Some(stmt.name.clone()),
            params: stmt.function.params.clone(),
            body: stmt.function.body.clone(),
            closure: Rc::clone(&self.environment),
            is_initializer: false,
        };

        self.environment.borrow_mut().define(&stmt.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, stmt: &stmt::ReturnData) -> ExecResult {
        let value = match &stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Null),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &stmt::ClassData) -> ExecResult {
        let superclass = match &stmt.superclass {
            Some(superclass) => {
                match self.look_up_variable(superclass.id, &superclass.name)? {
                    Object::Class(class) => Some(class),
                    _ => {
                        return Err(RuntimeError {
                            token: superclass.name.clone(),
                            message: "Superclass must be a class.".to_string(),
                        }.into());
                    },
                }
            },
            None => None,
        };

        let mut methods = HashMap::new();
        for method in &stmt.methods {
            let function = Function {
                name: Some(method.name.clone()),
                params: method.function.params.clone(),
                body: method.function.body.clone(),
                closure: Rc::clone(&self.environment),
                is_initializer: method.name.lexeme == "init",
            };
            methods.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(stmt.name.lexeme.clone(), superclass, methods);
        self.environment.borrow_mut().define(&stmt.name.lexeme, Object::from(class));

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    /// Runs a clean program through the whole pipeline and returns its output.
    fn run(source: &str) -> String {
        let mut output = Vec::new();

        {
            let mut interpreter = Interpreter::new(&mut output);

            let tokens = Scanner::new(source).scan_tokens();
            let statements = Parser::new(tokens).parse();

            let mut resolver = Resolver::new(&mut interpreter);
            resolver.resolve(&statements);

            interpreter.interpret(&statements);
        }

        String::from_utf8(output).unwrap()
    }

    fn number(n: f64) -> Expr {
        Expr::Literal(Literal::Number(n))
    }

    fn operator(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, 1)
    }

    #[test]
    fn evaluate_literal() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);
        assert_eq!(interpreter.evaluate(&number(12.0)).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Unary(UnaryData {
            operator: operator(Type::Minus, "-"),
            expr: Box::new(number(12.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(-12.0));

        let expr = Expr::Unary(UnaryData {
            operator: operator(Type::Bang, "!"),
            expr: Box::new(number(0.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));
    }

    #[test]
    fn evaluate_binary() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Binary(BinaryData {
            left: Box::new(number(12.0)),
            operator: operator(Type::Minus, "-"),
            right: Box::new(number(4.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(8.0));

        let expr = Expr::Binary(BinaryData {
            left: Box::new(number(6.0)),
            operator: operator(Type::Amp, "&"),
            right: Box::new(number(3.0)),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(2.0));
    }

    #[test]
    fn evaluate_binary_type_error() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("a"))),
            operator: operator(Type::Minus, "-"),
            right: Box::new(number(1.0)),
        });

        match interpreter.evaluate(&expr) {
            Err(Unwind::Error(error)) => {
                assert_eq!(error.message, "Operands must be a numbers.");
            },
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_comparison_requires_comparable_types() {
        let mut output = Vec::new();
        let mut interpreter = Interpreter::new(&mut output);

        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("abc"))),
            operator: operator(Type::Less, "<"),
            right: Box::new(Expr::Literal(Literal::from("abd"))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));

        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::from("abc"))),
            operator: operator(Type::Less, "<"),
            right: Box::new(number(1.0)),
        });

        match interpreter.evaluate(&expr) {
            Err(Unwind::Error(error)) => {
                assert_eq!(error.message, "Both operands must be comparable to each other.");
            },
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn print_stringifies_values() {
        assert_eq!(run("print null;"), "null\n");
        assert_eq!(run("print true;"), "true\n");
        assert_eq!(run("print 1 + 2 * 3;"), "7\n");
        assert_eq!(run("print \"sum: \" + 4;"), "sum: 4\n");
        assert_eq!(run("fun f() {} print f;"), "<fun f>\n");
        assert_eq!(run("print fun () {};"), "<anonymous>\n");
        assert_eq!(run("print readline;"), "<native fun readline>\n");
        assert_eq!(run("class A {} print A; print A();"), "A\nA instance\n");
    }

    #[test]
    fn zero_is_falsey() {
        assert_eq!(run("if (0) print \"then\"; else print \"else\";"), "else\n");
        assert_eq!(run("print !0; print !1; print !\"\";"), "true\nfalse\nfalse\n");
    }

    #[test]
    fn logical_operators_short_circuit() {
        assert_eq!(run("fun hit() { print \"hit\"; return true; } print false and hit();"), "false\n");
        assert_eq!(run("fun hit() { print \"hit\"; return true; } print true or hit();"), "true\n");
        assert_eq!(run("print 1 && 2; print 0 || \"fallback\";"), "2\nfallback\n");
    }

    #[test]
    fn compound_assignment_reads_resolved_variable() {
        assert_eq!(run("var a = 1; a += 2; print a;"), "3\n");
        assert_eq!(run("{ var a = 10; { a -= 4; } print a; }"), "6\n");
    }

    #[test]
    fn closures_capture_their_environment() {
        let source = "\
            fun makeCounter() {
                var n = 0;
                fun count() { n = n + 1; return n; }
                return count;
            }
            var counter = makeCounter();
            print counter();
            print counter();
            print counter();
        ";
        assert_eq!(run(source), "1\n2\n3\n");
    }

    #[test]
    fn resolved_variables_see_the_defining_scope() {
        let source = "\
            var a = \"global\";
            {
                fun show() { print a; }
                show();
                var a = \"local\";
                show();
            }
        ";
        assert_eq!(run(source), "global\nglobal\n");
    }

    #[test]
    fn break_exits_innermost_loop() {
        let source = "\
            var i = 0;
            while (i < 3) {
                var j = 0;
                while (j < 3) {
                    if (j == 1) break;
                    print j;
                    j = j + 1;
                }
                i = i + 1;
            }
        ";
        assert_eq!(run(source), "0\n0\n0\n");
    }

    #[test]
    fn methods_bind_this() {
        let source = "\
            class Box {
                init(x) { this.x = x; }
                get() { return this.x; }
            }
            var box = Box(42);
            print box.get();
            var get = box.get;
            print get();
        ";
        assert_eq!(run(source), "42\n42\n");
    }

    #[test]
    fn initializer_returns_the_instance() {
        let source = "\
            class Early {
                init() {
                    this.x = 1;
                    return;
                }
            }
            print Early().x;
        ";
        assert_eq!(run(source), "1\n");
    }

    #[test]
    fn methods_are_inherited() {
        let source = "\
            class Shape {
                name() { return \"shape\"; }
            }
            class Square : Shape {}
            print Square().name();
        ";
        assert_eq!(run(source), "shape\n");
    }

    #[test]
    fn for_loop_matches_hand_written_while() {
        let desugared = run("for (var i = 0; i < 3; i = i + 1) print i;");
        let hand_written = run("{ var i = 0; while (i < 3) { print i; i = i + 1; } }");
        assert_eq!(desugared, hand_written);
        assert_eq!(desugared, "0\n1\n2\n");
    }

    #[test]
    fn single_line_functions_run_their_statement() {
        assert_eq!(run("fun twice(n): return n * 2; print twice(21);"), "42\n");
    }
}
