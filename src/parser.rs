use std::mem;

use crate::error::{Error, ParseError};
use crate::token::{Token, Type};
use crate::literal::Literal;
use crate::expr::{self, *};
use crate::stmt::{self, *};

type ParseResult<T> = Result<T, ParseError>;

/// Returns if the next token is any of the given types.
macro_rules! matches {
    ( $self:ident, $( $type:expr ),+ ) => {
        {
            if $( $self.check($type) ) ||* {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

/// Parses the tokens and returns the resulting statements.
///
/// - Program     -> Decleration* EOF ;
/// - Block       -> "{" Decleration* "}" ;
/// - Decleration -> ClassDecl | FunDecl | VarDecl | Statement ;
/// - ClassDecl   -> "class" IDENTIFIER ( ":" IDENTIFIER )? "{" Method* "}" ;
/// - FunDecl     -> "fun" IDENTIFIER FunBody ;
/// - Method      -> IDENTIFIER FunBody ;
/// - FunBody     -> "(" Parameters? ")" ( Block | ":" Statement ) ;
/// - VarDecl     -> "var" IDENTIFIER ( "=" Expression )? ";" ;
/// - Parameters  -> IDENTIFIER ( "," IDENTIFIER )* ;
/// - Statement   -> ExprStmt | ForStmt | IfStmt | PrintStmt | ReturnStmt
///                | BreakStmt | WhileStmt | Block ;
/// - ExprStmt    -> Expression ";" ;
/// - ForStmt     -> "for" "(" ( VarDecl | ExprStmt | ";" ) Expression? ";" Expression? ")" Statement ;
/// - IfStmt      -> "if" "(" Expression ")" Statement ( "else" Statement )? ;
/// - PrintStmt   -> "print" Expression ";" ;
/// - ReturnStmt  -> "return" Expression? ";" ;
/// - BreakStmt   -> "break" ";" ;
/// - WhileStmt   -> "while" "(" Expression ")" Statement ;
/// - Expression  -> Assignment ;
/// - Assignment  -> ( Call "." )? IDENTIFIER ( "=" | "+=" | "-=" ) Assignment | LogicOr ;
/// - LogicOr     -> LogicAnd ( ( "or" | "||" ) LogicAnd )* ;
/// - LogicAnd    -> Bitwise ( ( "and" | "&&" ) Bitwise )* ;
/// - Bitwise     -> Equality ( ( "&" | "|" | "^" ) Equality )* ;
/// - Equality    -> Comparison ( ( "!=" | "==" ) Comparison )* ;
/// - Comparison  -> Term ( ( ">" | ">=" | "<" | "<=" ) Term )* ;
/// - Term        -> Factor ( ( "+" | "-" ) Factor )* ;
/// - Factor      -> Unary ( ( "*" | "/" ) Unary )* ;
/// - Unary       -> ( "!" | "-" ) Unary | Call ;
/// - Arguments   -> Expression ( "," Expression )* ;
/// - Call        -> Primary ( "(" Arguments? ")" | "." IDENTIFIER )* ;
/// - Primary     -> NUMBER | STRING | "false" | "true" | "null" | "this"
///                | "fun" FunBody | "(" Expression ")" | IDENTIFIER ;
pub struct Parser {
    tokens: Vec<Token>,
    current: u32,
    loop_depth: u32,
    id_counter: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
            loop_depth: 0,
            id_counter: 0,
        }
    }

    /// Parses the tokens and returns the resulting statements.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.decleration() {
                statements.push(stmt);
            }
        }

        statements
    }

    /// Returns a fresh id to stamp a name-bearing expression with.
    /// The resolver keys its distance table by these ids.
    fn next_id(&mut self) -> usize {
        let id = self.id_counter;
        self.id_counter += 1;
        id
    }

    /// Returns the next token without consuming it.
    fn peek(&mut self) -> &Token {
        &self.tokens[self.current as usize]
    }

    /// Returns the previous token without consuming it.
    fn previous(&mut self) -> &Token {
        &self.tokens[(self.current - 1) as usize]
    }

    /// Returns if the parser has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.peek().r#type == Type::EOF
    }

    /// Returns if the next token is of the given type.
    fn check(&mut self, r#type: Type) -> bool {
        if self.is_at_end() {
            return false
        }

        self.peek().r#type == r#type
    }

    /// Returns if the next next token is of the given type.
    fn check_next(&mut self, r#type: Type) -> bool {
        if self.is_at_end() {
            return false;
        }

        match self.tokens.get(self.current as usize + 1) {
            Some(token) => token.r#type == r#type,
            None => false,
        }
    }

    /// Consumes the next token and returns it.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    /// Consumes the next token if it is of the given type.
    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<&Token> {
        if self.check(r#type) {
            return Ok(self.advance());
        }

        Err(ParseError {
            token: self.peek().clone(),
            message: message.to_string(),
        })
    }

    /// Parses a decleration.
    fn decleration(&mut self) -> Option<Stmt> {
        let statement = if matches!(self, Type::Class) {
            self.class_decleration()
        } else if self.check(Type::Fun) && self.check_next(Type::Identifier) {
            // A bare `fun` at decleration level could also start an anonymous
            // function expression, so only commit when a name follows.
            self.advance();
            self.function("function").map(Stmt::Function)
        } else if matches!(self, Type::Var) {
            self.var_decleration()
        } else {
            self.statement()
        };

        match statement {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                error.throw();
                self.synchronize();
                None
            }
        }
    }

    /// Parses a class decleration.
    fn class_decleration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name.")?.clone();

        let superclass = if matches!(self, Type::Colon) {
            let id = self.next_id();
            let name = self.consume(Type::Identifier, "Expect superclass name.")?.clone();
            Some(VariableData { id, name })
        } else {
            None
        };

        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = vec![];
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(Type::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassData { name, superclass, methods }))
    }

    /// Parses a variable decleration.
    fn var_decleration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?.clone();

        let mut initializer: Option<Expr> = None;
        if matches!(self, Type::Equal) {
            initializer = Some(self.expression()?);
        }

        self.consume(Type::Semicolon, "Expect ';' after variable decleration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    /// Parses a statement.
    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches!(self, Type::For) {
            return self.for_statement();
        }

        if matches!(self, Type::If) {
            return self.if_statement();
        }

        if matches!(self, Type::Print) {
            return self.print_statement();
        }

        if matches!(self, Type::Return) {
            return self.return_statement();
        }

        if matches!(self, Type::Break) {
            return self.break_statement();
        }

        if matches!(self, Type::While) {
            return self.while_statement();
        }

        if matches!(self, Type::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }

        self.expression_statement()
    }

    /// Parses a for statement.
    /// For loops have no node of their own; they lower into a while loop.
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer: Option<Stmt>;
        if matches!(self, Type::Semicolon) {
            initializer = None;
        } else if matches!(self, Type::Var) {
            initializer = Some(self.var_decleration()?);
        } else {
            initializer = Some(self.expression_statement()?);
        }

        let condition = match !self.check(Type::Semicolon) {
            true => Some(self.expression()?),
            false => None,
        };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = match !self.check(Type::RightParen) {
            true => Some(self.expression()?),
            false => None,
        };
        self.consume(Type::RightParen, "Expect ')' after for clauses.")?;

        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;
        let mut body = body?;

        // Execute the increment after the body.
        if let Some(increment) = increment {
            body = Stmt::Block(BlockData {
                statements: vec![
                    body,
                    Stmt::Expression(ExpressionData {
                        expr: increment
                    }),
                ],
            });
        }

        // Wrap the body into a while loop.
        // If there is no condition, use true.
        body = Stmt::While(WhileData {
            condition: condition.unwrap_or(Expr::Literal(Literal::Bool(true))),
            body: Box::new(body),
        });

        // Add the initializer before the loop if there is one.
        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData {
                statements: vec![
                    initializer,
                    body,
                ],
            });
        }

        Ok(body)
    }

    /// Parses an if statement.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let mut else_branch: Option<Box<Stmt>> = None;
        if matches!(self, Type::Else) {
            else_branch = Some(Box::new(self.statement()?));
        }

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    /// Parses a print statement.
    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = match self.expression() {
            Ok(expr) => expr,
            Err(error) => return Err(error),
        };

        self.consume(Type::Semicolon, "Expect ';' after value.")?;

        Ok(Stmt::Print(PrintData { expr }))
    }

    /// Parses a return statement.
    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().to_owned();

        let value = match self.check(Type::Semicolon) {
            true => None,
            false => Some(self.expression()?),
        };

        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    /// Parses a break statement.
    /// Reports a break outside of a loop body but still produces the node.
    fn break_statement(&mut self) -> ParseResult<Stmt> {
        if self.loop_depth == 0 {
            ParseError {
                token: self.previous().clone(),
                message: "'break' must be inside of a loop body.".to_string(),
            }.throw();
        }

        self.consume(Type::Semicolon, "Expect ';' after 'break'.")?;
        Ok(Stmt::Break)
    }

    /// Parses a while statement.
    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;

        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;

        Ok(Stmt::While(WhileData {
            condition,
            body: Box::new(body?),
        }))
    }

    /// Parses an expression statement.
    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = match self.expression() {
            Ok(expr) => expr,
            Err(error) => return Err(error),
        };

        self.consume(Type::Semicolon, "Expect ';' after expression.")?;

        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    /// Parses a named function or method decleration.
    fn function(&mut self, kind: &str) -> ParseResult<stmt::FunctionData> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?.to_owned();
        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;
        let function = self.function_literal(kind)?;

        Ok(stmt::FunctionData { name, function })
    }

    /// Parses a function's parameter list and body, after the opening parenthesis.
    /// A braced body is a regular function; a colon introduces a single
    /// statement body and marks the function as single-line.
    fn function_literal(&mut self, kind: &str) -> ParseResult<expr::FunctionData> {
        let mut params = vec![];

        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= 255 {
                    ParseError {
                        token: self.peek().to_owned(),
                        message: "Cannot have more than 255 parameters.".to_string(),
                    }.throw();
                }

                params.push(self.consume(Type::Identifier, "Expect parameter name.")?.to_owned());

                if !matches!(self, Type::Comma) {
                    break;
                }
            }
        }

        self.consume(Type::RightParen, "Expect ')' after parameters.")?;

        // A break belongs to the loop of the function it appears in.
        let enclosing_loops = mem::replace(&mut self.loop_depth, 0);

        let (body, single_line) = if matches!(self, Type::Colon) {
            let statement = self.statement();
            (statement.map(|stmt| vec![stmt]), true)
        } else {
            let brace = self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."));
            match brace {
                Ok(_) => (self.block(), false),
                Err(error) => (Err(error), false),
            }
        };

        self.loop_depth = enclosing_loops;

        Ok(expr::FunctionData { params, body: body?, single_line })
    }

    /// Parses a block statement.
    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.decleration() {
                statements.push(stmt);
            }
        }

        self.consume(Type::RightBrace, "Expect '}' after block.")?;

        Ok(statements)
    }

    /// Parses an expression.
    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// Parses an assignment expression.
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if matches!(self, Type::Equal, Type::PlusEqual, Type::MinusEqual) {
            let operator = self.previous().to_owned();
            let value = self.assignment()?;

            match expr {
                Expr::Variable(data) => {
                    return Ok(Expr::Assign(AssignData {
                        id: self.next_id(),
                        name: data.name,
                        operator,
                        value: Box::new(value),
                    }));
                },
                Expr::Get(data) => {
                    return Ok(Expr::Set(SetData {
                        object: data.object,
                        name: data.name,
                        operator,
                        value: Box::new(value),
                    }));
                },
                expr => {
                    ParseError {
                        token: operator,
                        message: "Invalid assignment target.".to_string(),
                    }.throw();

                    return Ok(expr);
                },
            }
        }

        Ok(expr)
    }

    /// Parses an or expression.
    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;

        while matches!(self, Type::Or, Type::PipePipe) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses an and expression.
    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.bitwise()?;

        while matches!(self, Type::And, Type::AmpAmp) {
            let operator = self.previous().clone();
            let right = self.bitwise()?;
            expr = Expr::Logical(LogicalData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses a bitwise expression.
    fn bitwise(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;

        while matches!(self, Type::Amp, Type::Pipe, Type::Caret) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }

        Ok(expr)
    }

    /// Parses an equality expression.
    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;

        while matches!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a comparison expression.
    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;

        while matches!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a term expression.
    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;

        while matches!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a factor expression.
    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while matches!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;

            expr = Expr::Binary(BinaryData {
                left: Box::new(expr),
                operator,
                right: Box::new(right)
            });
        }

        Ok(expr)
    }

    /// Parses a unary expression.
    fn unary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::Bang, Type::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;

            return Ok(Expr::Unary(UnaryData {
                operator,
                expr: Box::new(right)
            }));
        }

        self.call()
    }

    /// Parses a call's arguments.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = vec![];

        if !self.check(Type::RightParen) {
            while {
                if arguments.len() >= 255 {
                    ParseError {
                        token: self.peek().to_owned(),
                        message: "Cannot have more than 255 arguments.".to_string(),
                    }.throw();
                }

                arguments.push(self.expression()?);
                matches!(self, Type::Comma)
            } {}
        }

        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call(CallData {
            callee: Box::new(callee),
            paren: paren.to_owned(),
            arguments,
        }))
    }

    /// Parses a call expression.
    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if matches!(self, Type::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if matches!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?;
                expr = Expr::Get(GetData { object: Box::new(expr), name: name.clone() });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses a primary expression.
    fn primary(&mut self) -> ParseResult<Expr> {
        if matches!(self, Type::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }

        if matches!(self, Type::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }

        if matches!(self, Type::Null) {
            return Ok(Expr::Literal(Literal::Null));
        }

        if matches!(self, Type::Number, Type::String) {
            return Ok(Expr::Literal(self.previous().clone().literal
                .expect("number or string to have a literal value")));
        }

        if matches!(self, Type::This) {
            let id = self.next_id();
            return Ok(Expr::This(ThisData { id, keyword: self.previous().clone() }));
        }

        if matches!(self, Type::Identifier) {
            let id = self.next_id();
            return Ok(Expr::Variable(VariableData {
                id,
                name: self.previous().clone()
            }))
        }

        if matches!(self, Type::Fun) {
            self.consume(Type::LeftParen, "Expect '(' after 'fun'.")?;
            return Ok(Expr::Function(self.function_literal("function")?));
        }

        if matches!(self, Type::LeftParen) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;

            return Ok(Expr::Grouping(GroupingData { expr: Box::new(expr) }));
        }

        Err(ParseError {
            token: self.peek().clone(),
            message: "Expected expression.".to_string()
        })
    }

    /// Tries to recover from a parse error.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class => return,
                Type::Fun => return,
                Type::Var => return,
                Type::For => return,
                Type::If => return,
                Type::While => return,
                Type::Print => return,
                Type::Return => return,
                _ => self.advance()
            };
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::ASTPrinter;
    use crate::scanner::Scanner;

    fn print_first(source: &str) -> String {
        let tokens = Scanner::new(source).scan_tokens();
        let statements = Parser::new(tokens).parse();
        assert!(!statements.is_empty(), "expected at least one statement for {source:?}");
        ASTPrinter.print_stmt(&statements[0])
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(print_first("1 + 2 * 3;"), "(expr (+ 1 (* 2 3)))");
        assert_eq!(print_first("(1 + 2) * 3;"), "(expr (* (group (+ 1 2)) 3))");
    }

    #[test]
    fn equality_binds_tighter_than_bitwise() {
        assert_eq!(print_first("1 & 2 == 3;"), "(expr (& 1 (== 2 3)))");
        assert_eq!(print_first("a && b & c;"), "(expr (&& a (& b c)))");
        assert_eq!(print_first("a or b and c;"), "(expr (or a (and b c)))");
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(print_first("a = b = 1;"), "(expr (= a (= b 1)))");
        assert_eq!(print_first("a += 2;"), "(expr (+= a 2))");
        assert_eq!(print_first("a -= 2;"), "(expr (-= a 2))");
    }

    #[test]
    fn property_access_and_assignment() {
        assert_eq!(print_first("a.b.c;"), "(expr (get (get a b) c))");
        assert_eq!(print_first("a.b = 3;"), "(expr (set a b 3))");
    }

    #[test]
    fn calls_chain() {
        assert_eq!(print_first("f()(1)(2, 3);"), "(expr f()(1)(2 3))");
    }

    #[test]
    fn for_loop_lowers_to_while() {
        assert_eq!(
            print_first("for (var i = 0; i < 3; i = i + 1) print i;"),
            "{ (var i = 0) (while (< i 3) { (print i) (expr (= i (+ i 1))) }) }",
        );
    }

    #[test]
    fn for_loop_without_clauses_runs_forever() {
        assert_eq!(
            print_first("for (;;) break;"),
            "(while true (break))",
        );
    }

    #[test]
    fn function_declerations() {
        assert_eq!(
            print_first("fun twice(n): return n * 2;"),
            "(fun twice(n) { (return (* n 2)) })",
        );
        assert_eq!(
            print_first("var f = fun (x) { return x; };"),
            "(var f = (fun (x) { (return x) }))",
        );
    }

    #[test]
    fn class_decleration_with_superclass() {
        assert_eq!(
            print_first("class Square : Shape { area(): return this.side * this.side; }"),
            "(class Square : Shape (fun area() { (return (* (get this side) (get this side))) }))",
        );
    }

    #[test]
    fn single_line_flag_tracks_body_form() {
        let tokens = Scanner::new("fun a(): return 1; fun b() { return 1; }").scan_tokens();
        let statements = Parser::new(tokens).parse();

        let Stmt::Function(a) = &statements[0] else { panic!("expected a function") };
        let Stmt::Function(b) = &statements[1] else { panic!("expected a function") };
        assert!(a.function.single_line);
        assert!(!b.function.single_line);
    }

    #[test]
    fn name_bearing_expressions_get_unique_ids() {
        let tokens = Scanner::new("a; a; a = a;").scan_tokens();
        let statements = Parser::new(tokens).parse();

        let mut ids = vec![];
        for statement in &statements {
            let Stmt::Expression(data) = statement else { panic!("expected an expression") };
            match &data.expr {
                Expr::Variable(data) => ids.push(data.id),
                Expr::Assign(data) => {
                    ids.push(data.id);
                    let Expr::Variable(value) = data.value.as_ref() else { panic!() };
                    ids.push(value.id);
                },
                _ => panic!("unexpected expression"),
            }
        }

        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
