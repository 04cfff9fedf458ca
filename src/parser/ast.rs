// AST (Abstract Syntax Tree) definitions for the PASO front end

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Declarable variable types (`entero`, `decimal`, `texto`, `booleano`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Integer,
    Decimal,
    Text,
    Boolean,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VarType::Integer => "entero",
            VarType::Decimal => "decimal",
            VarType::Text => "texto",
            VarType::Boolean => "booleano",
        };
        f.write_str(name)
    }
}

/// Binary operators, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Equality
    Eq,
    Ne,
    // Relational
    Gt,
    Lt,
    Ge,
    Le,
    // Additive
    Add,
    Sub,
    // Multiplicative
    Mul,
    Div,
}

impl BinOp {
    /// Source spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "O",
            BinOp::And => "Y",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
            BinOp::Ge => ">=",
            BinOp::Le => "<=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -x
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => f.write_str("-"),
        }
    }
}

/// Literal values, already converted from their lexemes
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Boolean(bool),
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Decimal(d) => write!(f, "{:?}", d),
            Literal::Text(s) => write!(f, "\"{}\"", s),
            Literal::Boolean(true) => f.write_str("verdadero"),
            Literal::Boolean(false) => f.write_str("falso"),
            Literal::Null => f.write_str("nulo"),
        }
    }
}

/// Expression nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value: Literal,
        location: SourceLocation,
    },
    Variable {
        name: String,
        location: SourceLocation,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Literal { location, .. }
            | Expr::Variable { location, .. }
            | Expr::Unary { location, .. }
            | Expr::Binary { location, .. } => *location,
        }
    }
}

/// An ordered sequence of statements
pub type Block = Vec<Stmt>;

/// Statement nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assignment {
        name: String,
        expr: Expr,
        location: SourceLocation,
    },
    VarDeclaration {
        var_type: VarType,
        name: String,
        init: Option<Expr>,
        location: SourceLocation,
    },
    Print {
        expr: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Block,
        location: SourceLocation,
    },
    DoWhile {
        body: Block,
        condition: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Stmt::Assignment { location, .. }
            | Stmt::VarDeclaration { location, .. }
            | Stmt::Print { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::DoWhile { location, .. } => *location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Block,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

/// Render a program as an indented outline, one node per line.
///
/// This is the text shown in the explorer's AST pane and printed by `--ast`.
pub fn ast_outline(program: &Program) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Program ({} statements)", program.statements.len()));
    for stmt in &program.statements {
        outline_stmt(stmt, 1, &mut lines);
    }
    lines
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn outline_block(label: &str, block: &Block, depth: usize, lines: &mut Vec<String>) {
    lines.push(format!("{}{}", indent(depth), label));
    for stmt in block {
        outline_stmt(stmt, depth + 1, lines);
    }
}

fn outline_stmt(stmt: &Stmt, depth: usize, lines: &mut Vec<String>) {
    let pad = indent(depth);
    let line = stmt.location().line;
    match stmt {
        Stmt::Assignment { name, expr, .. } => {
            lines.push(format!("{pad}Assignment {name} = {} @{line}", expr_to_string(expr)));
        }
        Stmt::VarDeclaration {
            var_type,
            name,
            init,
            ..
        } => match init {
            Some(expr) => lines.push(format!(
                "{pad}VarDeclaration {var_type} {name} = {} @{line}",
                expr_to_string(expr)
            )),
            None => lines.push(format!("{pad}VarDeclaration {var_type} {name} @{line}")),
        },
        Stmt::Print { expr, .. } => {
            lines.push(format!("{pad}Print {} @{line}", expr_to_string(expr)));
        }
        Stmt::If {
            condition,
            then_block,
            else_block,
            ..
        } => {
            lines.push(format!("{pad}If {} @{line}", expr_to_string(condition)));
            outline_block("then", then_block, depth + 1, lines);
            if let Some(else_block) = else_block {
                outline_block("else", else_block, depth + 1, lines);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            lines.push(format!("{pad}While {} @{line}", expr_to_string(condition)));
            outline_block("body", body, depth + 1, lines);
        }
        Stmt::DoWhile {
            body, condition, ..
        } => {
            lines.push(format!("{pad}DoWhile {} @{line}", expr_to_string(condition)));
            outline_block("body", body, depth + 1, lines);
        }
    }
}

/// Fully parenthesised rendering of an expression, e.g. `((a + 1) * 2)`
pub fn expr_to_string(expr: &Expr) -> String {
    match expr {
        Expr::Literal { value, .. } => value.to_string(),
        Expr::Variable { name, .. } => name.clone(),
        Expr::Unary { op, operand, .. } => format!("({}{})", op, expr_to_string(operand)),
        Expr::Binary {
            op, left, right, ..
        } => format!(
            "({} {} {})",
            expr_to_string(left),
            op,
            expr_to_string(right)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_expr_to_string_parenthesises_binary_nodes() {
        let expr = Expr::Binary {
            op: BinOp::Mul,
            left: Box::new(Expr::Binary {
                op: BinOp::Add,
                left: Box::new(Expr::Variable {
                    name: "a".to_string(),
                    location: loc(),
                }),
                right: Box::new(Expr::Literal {
                    value: Literal::Integer(1),
                    location: loc(),
                }),
                location: loc(),
            }),
            right: Box::new(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(Expr::Literal {
                    value: Literal::Decimal(2.5),
                    location: loc(),
                }),
                location: loc(),
            }),
            location: loc(),
        };

        assert_eq!(expr_to_string(&expr), "((a + 1) * (-2.5))");
    }

    #[test]
    fn test_outline_nests_blocks() {
        let program = Program {
            statements: vec![Stmt::While {
                condition: Expr::Literal {
                    value: Literal::Boolean(true),
                    location: loc(),
                },
                body: vec![Stmt::Print {
                    expr: Expr::Literal {
                        value: Literal::Text("hola".to_string()),
                        location: SourceLocation::new(2, 5),
                    },
                    location: SourceLocation::new(2, 5),
                }],
                location: loc(),
            }],
        };

        let outline = ast_outline(&program);
        assert_eq!(
            outline,
            vec![
                "Program (1 statements)".to_string(),
                "  While verdadero @1".to_string(),
                "    body".to_string(),
                "      Print \"hola\" @2".to_string(),
            ]
        );
    }
}
