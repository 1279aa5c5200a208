//! A debug pretty-printer for the AST, rendering expressions in
//! parenthesized prefix form. Out of core scope per spec.md §1 (listed
//! alongside the CLI driver and REPL as an external collaborator); kept
//! around because it is useful when eyeballing what the parser built.
//!
//! Grounded on the teacher's `ASTPrinter` (`parenthesize!` macro, one
//! `visit_*` arm per variant returning a `String`), rebuilt against this
//! crate's richer `Expr`/`Stmt` shape.

use crate::expr::*;
use crate::stmt::*;

macro_rules! parenthesize {
    ( $name:expr, $( $x:expr ),* ) => {
        {
            let mut string = String::from("(");
            string.push_str($name);
            $(
                string.push(' ');
                string.push_str(&$x);
            )*
            string.push(')');
            string
        }
    };
}

pub struct AstPrinter;

impl AstPrinter {
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    pub fn print_program(&mut self, program: &[Stmt]) -> String {
        program.iter().map(|stmt| stmt.accept(self)).collect::<Vec<_>>().join("\n")
    }
}

impl ExprVisitor<String> for AstPrinter {
    fn visit_assign(&mut self, data: &AssignData) -> String {
        parenthesize!(&format!("= {}", data.name.lexeme), self.print_expr(&data.value))
    }

    fn visit_binary(&mut self, data: &BinaryData) -> String {
        parenthesize!(&data.operator.lexeme, self.print_expr(&data.left), self.print_expr(&data.right))
    }

    fn visit_logical(&mut self, data: &LogicalData) -> String {
        parenthesize!(&data.operator.lexeme, self.print_expr(&data.left), self.print_expr(&data.right))
    }

    fn visit_unary(&mut self, data: &UnaryData) -> String {
        parenthesize!(&data.operator.lexeme, self.print_expr(&data.right))
    }

    fn visit_grouping(&mut self, data: &GroupingData) -> String {
        parenthesize!("group", self.print_expr(&data.inner))
    }

    fn visit_literal(&mut self, data: &LiteralData) -> String {
        data.value.to_string()
    }

    fn visit_variable(&mut self, data: &VariableData) -> String {
        data.name.lexeme.clone()
    }

    fn visit_call(&mut self, data: &CallData) -> String {
        let mut string = self.print_expr(&data.callee);
        string.push('(');
        string.push_str(&data.arguments.iter().map(|a| self.print_expr(a)).collect::<Vec<_>>().join(" "));
        string.push(')');
        string
    }

    fn visit_array(&mut self, data: &ArrayData) -> String {
        let items = data.values.iter().map(|v| self.print_expr(v)).collect::<Vec<_>>().join(" ");
        format!("[{items}]")
    }

    fn visit_constructor(&mut self, data: &ConstructorData) -> String {
        let args = data.arguments.iter().map(|a| self.print_expr(a)).collect::<Vec<_>>().join(" ");
        parenthesize!("new", self.print_expr(&data.class), args)
    }

    fn visit_get_property(&mut self, data: &GetPropertyData) -> String {
        format!("(. {} {})", self.print_expr(&data.object), data.name.lexeme)
    }

    fn visit_set_property(&mut self, data: &SetPropertyData) -> String {
        format!("(= (. {} {}) {})", self.print_expr(&data.object), data.name.lexeme, self.print_expr(&data.value))
    }

    fn visit_get_index(&mut self, data: &GetIndexData) -> String {
        format!("([] {} {})", self.print_expr(&data.object), self.print_expr(&data.index))
    }

    fn visit_set_index(&mut self, data: &SetIndexData) -> String {
        format!("(= ([] {} {}) {})", self.print_expr(&data.object), self.print_expr(&data.index), self.print_expr(&data.value))
    }

    fn visit_this(&mut self, _data: &ThisData) -> String {
        "this".to_string()
    }

    fn visit_super(&mut self, data: &SuperData) -> String {
        format!("(super {})", data.method.lexeme)
    }

    fn visit_super_constructor_call(&mut self, data: &SuperConstructorCallData) -> String {
        let args = data.arguments.iter().map(|a| self.print_expr(a)).collect::<Vec<_>>().join(" ");
        parenthesize!("super-new", args)
    }
}

impl StmtVisitor<String> for AstPrinter {
    fn visit_block(&mut self, data: &BlockData) -> String {
        let body = data.statements.iter().map(|s| s.accept(self)).collect::<Vec<_>>().join(" ");
        format!("{{ {body} }}")
    }

    fn visit_class(&mut self, data: &ClassData) -> String {
        format!("(class {})", data.name.lexeme)
    }

    fn visit_function(&mut self, data: &FunctionData) -> String {
        format!("(fun {})", data.name.lexeme)
    }

    fn visit_expression(&mut self, data: &ExpressionData) -> String {
        parenthesize!("expr", self.print_expr(&data.expr))
    }

    fn visit_if(&mut self, data: &IfData) -> String {
        let mut string = format!("(if {}", self.print_expr(&data.condition));
        string.push(' ');
        string.push_str(&data.then_branch.accept(self));
        if let Some(else_branch) = &data.else_branch {
            string.push_str(" else ");
            string.push_str(&else_branch.accept(self));
        }
        string.push(')');
        string
    }

    fn visit_print(&mut self, data: &PrintData) -> String {
        parenthesize!("print", self.print_expr(&data.expr))
    }

    fn visit_return(&mut self, data: &ReturnData) -> String {
        match &data.value {
            Some(value) => parenthesize!("return", self.print_expr(value)),
            None => "(return)".to_string(),
        }
    }

    fn visit_var(&mut self, data: &VarData) -> String {
        match &data.initializer {
            Some(init) => parenthesize!(&format!("var {}", data.name.lexeme), self.print_expr(init)),
            None => format!("(var {})", data.name.lexeme),
        }
    }

    fn visit_while(&mut self, data: &WhileData) -> String {
        parenthesize!("while", self.print_expr(&data.condition), data.body.accept(self))
    }
}
