use crate::expr::{
    AssignData, BinaryData, CallData, Expr, ExprVisitor, FunctionData, GetData, GroupingData,
    LogicalData, SetData, ThisData, UnaryData, VariableData,
};
use crate::stmt::{self, Stmt, StmtVisitor};
use crate::literal::Literal;

/// Returns a string representation of the expression in paranthesize.
macro_rules! parenthesize {
    ( $self:ident, $name:expr, $( $x:expr ),+ ) => {
        {
            let mut string = String::new();
            string += "(";
            string += $name;
            $(
                string += " ";
                string += &$x.accept($self);
            )*
            string += ")";

            string
        }
    };
}

pub struct ASTPrinter;

impl ASTPrinter {
    /// Prints the expression using visitor pattern.
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    /// Prints the statement using visitor pattern.
    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    fn function(&mut self, name: Option<&str>, function: &FunctionData) -> String {
        let mut string = String::new();
        string += "(fun ";
        if let Some(name) = name {
            string += name;
        }
        string += "(";
        for param in &function.params {
            string += &param.lexeme;
            string += " ";
        }
        string = string.trim_end().to_string();
        string += ") { ";
        string += &function.body.iter()
            .map(|stmt| stmt.accept(self))
            .collect::<Vec<String>>()
            .join(" ");
        string += " })";

        string
    }
}

impl ExprVisitor<String> for ASTPrinter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> String {
        literal.to_string() // Uses fmt::Display impl for Literal
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> String {
        variable.name.lexeme.clone()
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> String {
        parenthesize!(self, "group", grouping.expr)
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> String {
        parenthesize!(self, &unary.operator.lexeme, unary.expr)
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> String {
        parenthesize!(self, &binary.operator.lexeme, binary.left, binary.right)
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> String {
        parenthesize!(self, &logical.operator.lexeme, logical.left, logical.right)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> String {
        let name = format!("{} {}", assign.operator.lexeme, assign.name.lexeme);
        parenthesize!(self, name.as_str(), assign.value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> String {
        let mut string = String::new();
        string += &call.callee.accept(self);
        string += "(";
        for arg in &call.arguments {
            string += &arg.accept(self);
            string += " ";
        }
        string = string.trim_end().to_string();
        string += ")";
        string
    }

    fn visit_function_expr(&mut self, function: &FunctionData) -> String {
        self.function(None, function)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> String {
        format!("(get {} {})", get.object.accept(self), get.name.lexeme)
    }

    fn visit_set_expr(&mut self, set: &SetData) -> String {
        let name = format!("set {} {}", set.object.accept(self), set.name.lexeme);
        parenthesize!(self, name.as_str(), set.value)
    }

    fn visit_this_expr(&mut self, _this: &ThisData) -> String {
        "this".to_string()
    }
}

impl StmtVisitor<String> for ASTPrinter {
    fn visit_expression_stmt(&mut self, stmt: &stmt::ExpressionData) -> String {
        parenthesize!(self, "expr", stmt.expr)
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::PrintData) -> String {
        parenthesize!(self, "print", stmt.expr)
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::VarData) -> String {
        let mut string = String::new();
        string += "(var ";
        string += &stmt.name.lexeme;
        if let Some(initializer) = &stmt.initializer {
            string += " = ";
            string += &initializer.accept(self);
        }
        string += ")";

        string
    }

    fn visit_block_stmt(&mut self, stmt: &stmt::BlockData) -> String {
        let mut string = String::new();
        string += "{";
        for stmt in &stmt.statements {
            string += " ";
            string += &stmt.accept(self);
        }
        string += " }";

        string
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::IfData) -> String {
        let mut string = String::new();
        string += "(if ";
        string += &stmt.condition.accept(self);
        string += " ";
        string += &stmt.then_branch.accept(self);
        if let Some(else_branch) = &stmt.else_branch {
            string += " else ";
            string += &else_branch.accept(self);
        }
        string += ")";

        string
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::WhileData) -> String {
        parenthesize!(self, "while", stmt.condition, stmt.body)
    }

    fn visit_break_stmt(&mut self) -> String {
        "(break)".to_string()
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::FunctionData) -> String {
        self.function(Some(&stmt.name.lexeme), &stmt.function)
    }

    fn visit_return_stmt(&mut self, stmt: &stmt::ReturnData) -> String {
        match &stmt.value {
            Some(value) => parenthesize!(self, "return", value),
            None => "(return)".to_string(),
        }
    }

    fn visit_class_stmt(&mut self, stmt: &stmt::ClassData) -> String {
        let mut string = String::new();
        string += "(class ";
        string += &stmt.name.lexeme;
        if let Some(superclass) = &stmt.superclass {
            string += " : ";
            string += &superclass.name.lexeme;
        }
        for method in &stmt.methods {
            string += " ";
            string += &self.function(Some(&method.name.lexeme), &method.function);
        }
        string += ")";

        string
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::{Token, Type};

    #[test]
    fn print_binary() {
        let expr = Expr::Binary(BinaryData {
            left: Box::new(Expr::Literal(Literal::Number(1.0))),
            operator: Token::new(Type::Plus, String::from("+"), None, 1),
            right: Box::new(Expr::Unary(UnaryData {
                operator: Token::new(Type::Minus, String::from("-"), None, 1),
                expr: Box::new(Expr::Literal(Literal::Number(2.0))),
            })),
        });

        assert_eq!(ASTPrinter.print(&expr), "(+ 1 (- 2))");
    }

    #[test]
    fn print_grouping() {
        let expr = Expr::Grouping(GroupingData {
            expr: Box::new(Expr::Literal(Literal::from("inner"))),
        });

        assert_eq!(ASTPrinter.print(&expr), "(group inner)");
    }

    #[test]
    fn print_call() {
        let expr = Expr::Call(CallData {
            callee: Box::new(Expr::Variable(VariableData { id: 0, name: Token::from("f") })),
            paren: Token::new(Type::RightParen, String::from(")"), None, 1),
            arguments: vec![Expr::Literal(Literal::Bool(true)), Expr::Literal(Literal::Null)],
        });

        assert_eq!(ASTPrinter.print(&expr), "f(true null)");
    }
}
