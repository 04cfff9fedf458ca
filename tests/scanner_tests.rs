// Integration tests for the indentation-aware scanner

use paso::parser::lexer::LexErrorKind;
use paso::{scan, LexError, ScanOptions, Scanner, Token, TokenKind};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn count(tokens: &[Token], kind: TokenKind) -> usize {
    tokens.iter().filter(|t| t.kind == kind).count()
}

const NESTED_PROGRAM: &str = "\
entero a = 0
mientras (a < 10)
    si (a == 3 Y a != 2)
        muestra (\"tres\")
    si no
        haz
            a = a + 1
        mientras (a < 5)
    a = a + 1
muestra (a)
";

#[test]
fn test_indent_dedent_balance() {
    let sources = [
        NESTED_PROGRAM,
        "si (a)\n    b = 1\n",
        "mientras (a)\n  si (b)\n    si (c)\n      d = 1\n",
        "a = 1\nb = 2\n",
    ];

    for source in sources {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "{:?}: {:?}", source, errors);
        assert_eq!(
            count(&tokens, TokenKind::Indent),
            count(&tokens, TokenKind::Dedent),
            "unbalanced blocks for {:?}",
            source
        );
    }
}

#[test]
fn test_reindenting_preserves_token_kinds() {
    let two_wide: String = NESTED_PROGRAM
        .lines()
        .map(|line| {
            let trimmed = line.trim_start_matches(' ');
            let depth = (line.len() - trimmed.len()) / 4;
            format!("{}{}\n", "  ".repeat(depth), trimmed)
        })
        .collect();

    let (wide, _) = scan(NESTED_PROGRAM);
    let (narrow, _) = scan(&two_wide);
    assert_eq!(kinds(&wide), kinds(&narrow));
}

#[test]
fn test_exactly_one_eof_regardless_of_errors() {
    let sources = [
        "",
        "\n\n",
        "muestra \"abc",
        "a = 1 # ! @",
        "si (a)\n        b = 1\n    c = 2",
        "si (a)\n    ~ sin cierre",
    ];

    for source in sources {
        let (tokens, _) = scan(source);
        assert_eq!(count(&tokens, TokenKind::Eof), 1, "{:?}", source);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}

#[test]
fn test_unterminated_string_still_yields_token() {
    let (tokens, errors) = scan("muestra \"abc");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        LexError {
            kind: LexErrorKind::UnterminatedString,
            ..
        }
    ));
    assert_eq!(tokens[1].kind, TokenKind::Text);
    assert_eq!(tokens[1].lexeme, "abc");
    assert!(paso::parse(tokens).is_ok());
}

#[test]
fn test_errors_do_not_stop_later_lines() {
    let (tokens, errors) = scan("a = @\nb = 2\n");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.line, 1);
    let b = tokens.iter().find(|t| t.lexeme == "b").unwrap();
    assert_eq!(b.location.line, 2);
}

#[test]
fn test_multi_word_keywords() {
    let (tokens, errors) = scan("si no\nde lo contrario\nsi nada");
    assert!(errors.is_empty());

    assert_eq!(tokens[0].kind, TokenKind::Else);
    assert_eq!(tokens[0].lexeme, "si no");
    assert_eq!(tokens[2].kind, TokenKind::Otherwise);
    assert_eq!(tokens[2].lexeme, "de lo contrario");
    // `si` followed by a longer word is not `si no`
    assert_eq!(tokens[4].kind, TokenKind::If);
    assert_eq!(tokens[5].kind, TokenKind::Identifier);
}

#[test]
fn test_tab_width_option() {
    let source = "si (a)\n\tb = 1\n";

    let (default_tokens, _) = scan(source);
    let (narrow_tokens, _) = Scanner::with_options(
        source,
        ScanOptions {
            tab_width: 4,
            ..ScanOptions::default()
        },
    )
    .tokenize();

    // A tab opens a block either way; only the recorded width differs
    assert_eq!(kinds(&default_tokens), kinds(&narrow_tokens));
    assert_eq!(count(&default_tokens, TokenKind::Indent), 1);
}

#[test]
fn test_comment_suppression() {
    let source = "a = 1 ~ uno\n~ solo\nb = 2";

    let (with_comments, _) = scan(source);
    let (without, _) = Scanner::with_options(
        source,
        ScanOptions {
            emit_comments: false,
            ..ScanOptions::default()
        },
    )
    .tokenize();

    assert_eq!(count(&with_comments, TokenKind::Comment), 2);
    assert_eq!(count(&without, TokenKind::Comment), 0);
    assert_eq!(
        paso::parse(with_comments).unwrap(),
        paso::parse(without).unwrap()
    );
}

#[test]
fn test_positions_are_one_based() {
    let (tokens, _) = scan("a = 1\n  ~x\nbb");
    let bb = tokens.iter().find(|t| t.lexeme == "bb").unwrap();
    assert_eq!((bb.location.line, bb.location.column), (3, 1));
    assert_eq!((tokens[2].location.line, tokens[2].location.column), (1, 5));
}
