// Integration tests for the PASO parser

use paso::parser::ast::{
    ast_outline, expr_to_string, BinOp, Expr, Literal, SourceLocation, Stmt, VarType,
};
use paso::parser::parse::SyntaxErrorKind;
use paso::{parse, scan, Program, SyntaxError, TokenKind};

fn parse_source(source: &str) -> Result<Program, SyntaxError> {
    let (tokens, errors) = scan(source);
    assert!(errors.is_empty(), "unexpected lexical errors: {:?}", errors);
    parse(tokens)
}

#[test]
fn test_simple_assignment() {
    let program = parse_source("a = 3").expect("Parsing failed");

    assert_eq!(
        program.statements,
        vec![Stmt::Assignment {
            name: "a".to_string(),
            expr: Expr::Literal {
                value: Literal::Integer(3),
                location: SourceLocation::new(1, 5),
            },
            location: SourceLocation::new(1, 1),
        }]
    );
}

#[test]
fn test_if_with_logical_condition() {
    let program =
        parse_source("si (a == 3 Y a != 2)\n    muestra \"Hola\"\n").expect("Parsing failed");
    assert_eq!(program.statements.len(), 1);

    let Stmt::If {
        condition,
        then_block,
        else_block,
        ..
    } = &program.statements[0]
    else {
        panic!("Expected if, got {:?}", program.statements[0]);
    };

    assert!(matches!(condition, Expr::Binary { op: BinOp::And, .. }));
    assert_eq!(expr_to_string(condition), "((a == 3) Y (a != 2))");
    assert!(else_block.is_none());

    assert_eq!(then_block.len(), 1);
    match &then_block[0] {
        Stmt::Print { expr, .. } => assert!(matches!(
            expr,
            Expr::Literal {
                value: Literal::Text(text),
                ..
            } if text == "Hola"
        )),
        other => panic!("Expected print, got {:?}", other),
    }
}

#[test]
fn test_do_while() {
    let program = parse_source("haz\n    a = a + 1\nmientras (a < 10)").expect("Parsing failed");
    assert_eq!(program.statements.len(), 1);

    let Stmt::DoWhile { body, condition, .. } = &program.statements[0] else {
        panic!("Expected do-while, got {:?}", program.statements[0]);
    };

    assert_eq!(expr_to_string(condition), "(a < 10)");
    assert!(matches!(condition, Expr::Binary { op: BinOp::Lt, .. }));
    assert_eq!(body.len(), 1);
    match &body[0] {
        Stmt::Assignment { name, expr, .. } => {
            assert_eq!(name, "a");
            assert_eq!(expr_to_string(expr), "(a + 1)");
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_missing_right_paren() {
    let err = parse_source("si (a").unwrap_err();

    assert_eq!(err.expected(), &[TokenKind::RParen]);
    assert_eq!(err.found().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_missing_right_paren_before_block() {
    let err = parse_source("si (a\n    b = 1\n").unwrap_err();

    assert_eq!(err.expected(), &[TokenKind::RParen]);
    assert_eq!(err.found().map(|t| t.kind), Some(TokenKind::Newline));
    assert_eq!(err.location.line, 1);
}

#[test]
fn test_parse_proceeds_after_unterminated_string() {
    let (tokens, errors) = scan("muestra \"abc");
    assert_eq!(errors.len(), 1);

    let program = parse(tokens).expect("Parsing failed");
    match &program.statements[0] {
        Stmt::Print {
            expr: Expr::Literal {
                value: Literal::Text(text),
                ..
            },
            ..
        } => assert_eq!(text, "abc"),
        other => panic!("Expected print of a string, got {:?}", other),
    }
}

#[test]
fn test_full_program() {
    let source = "\
~ cuenta hasta diez
entero a = 0
decimal paso
mientras (a < 10)
    si (a / 2 * 2 == a)
        muestra (\"par\")
    de lo contrario
        muestra (a)
    a = a + 1
booleano listo = verdadero O falso
texto nombre = nulo
";
    let program = parse_source(source).expect("Parsing failed");
    assert_eq!(program.statements.len(), 5);

    assert!(matches!(
        &program.statements[0],
        Stmt::VarDeclaration {
            var_type: VarType::Integer,
            init: Some(_),
            ..
        }
    ));
    assert!(matches!(
        &program.statements[1],
        Stmt::VarDeclaration {
            var_type: VarType::Decimal,
            init: None,
            ..
        }
    ));

    let Stmt::While { body, .. } = &program.statements[2] else {
        panic!("Expected while, got {:?}", program.statements[2]);
    };
    assert_eq!(body.len(), 2);
    assert!(matches!(
        &body[0],
        Stmt::If {
            else_block: Some(_),
            ..
        }
    ));

    let outline = ast_outline(&program);
    assert_eq!(outline[0], "Program (5 statements)");
    assert!(outline.iter().any(|l| l.trim_start() == "else"));
}

#[test]
fn test_blocks_are_never_empty() {
    // A header followed only by a comment opens no block
    let err = parse_source("mientras (a)\n    ~ nada\nb = 1\n").unwrap_err();
    assert!(err.expected().contains(&TokenKind::Indent));
}

#[test]
fn test_unexpected_statement_start() {
    let err = parse_source("3 = a").unwrap_err();

    match &err.kind {
        SyntaxErrorKind::UnexpectedToken { expected, found } => {
            assert_eq!(found.kind, TokenKind::Integer);
            assert!(expected.contains(&TokenKind::Identifier));
            assert!(expected.contains(&TokenKind::If));
        }
        other => panic!("Expected unexpected-token error, got {:?}", other),
    }
}

#[test]
fn test_error_message_format() {
    let err = parse_source("si (a").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at line 1, column 6: Expected ')', found end of file"
    );
}
