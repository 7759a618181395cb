use super::*;
use pretty_assertions::assert_eq;

#[test]
fn resolves_known_tags() {
    assert_eq!(
        TokenKind::from_tags(TokenClass::Literal, "NUMBER"),
        Some(TokenKind::Literal(LiteralKind::Number))
    );
    assert_eq!(
        TokenKind::from_tags(TokenClass::Operation, "POWER"),
        Some(TokenKind::Operator(BinaryOp::Pow))
    );
    assert_eq!(
        TokenKind::from_tags(TokenClass::Operation, "ASSIGN"),
        Some(TokenKind::Assign)
    );
    assert_eq!(
        TokenKind::from_tags(TokenClass::Loop, "WHILE"),
        Some(TokenKind::Loop(LoopKind::While))
    );
    assert_eq!(
        TokenKind::from_tags(TokenClass::Function, "OUTPUT"),
        Some(TokenKind::Function("OUTPUT".into()))
    );
}

#[test]
fn unknown_operand_subclass_becomes_fragment() {
    let kind = TokenKind::from_tags(TokenClass::Operation, "NOT");
    assert_eq!(
        kind,
        Some(TokenKind::Fragment {
            class: TokenClass::Operation,
            subclass: "NOT".into()
        })
    );
}

#[test]
fn unknown_statement_subclass_is_rejected() {
    assert_eq!(TokenKind::from_tags(TokenClass::Keyword, "LET"), None);
    assert_eq!(TokenKind::from_tags(TokenClass::Loop, "FOR"), None);
}

#[test]
fn tags_survive_resolution() {
    let pairs = [
        ("LITERAL", "STRING"),
        ("IDENTIFIER", "VARIABLE"),
        ("OPERATION", "NOT_EQUAL"),
        ("OPERATION", "NOT"),
        ("DELIMITER", "SEMICOLON"),
        ("KEYWORD", "SET"),
        ("LOOP", "REPEAT"),
        ("IGNORE", "WHITESPACE"),
        ("ERROR", "UNFINISHED_TOKEN"),
    ];
    for (class, subclass) in pairs {
        let class_tag = TokenClass::from_tag(class).unwrap();
        let kind = TokenKind::from_tags(class_tag, subclass).unwrap();
        assert_eq!(kind.class().as_str(), class);
        assert_eq!(kind.subclass(), subclass);
    }
}

#[test]
fn unknown_class_tag() {
    assert_eq!(TokenClass::from_tag("MACRO"), None);
    assert_eq!(TokenClass::from_tag("literal"), None);
}

#[test]
fn token_predicates() {
    let semi = Token::new(
        TokenKind::Delimiter(Delimiter::Semicolon),
        ";",
        Span::new(4, 5),
        1,
    );
    assert!(semi.is_delimiter(Delimiter::Semicolon));
    assert!(!semi.starts_statement());

    let set = Token::new(TokenKind::Keyword(Keyword::Set), "set", Span::new(0, 3), 1);
    assert!(set.starts_statement());
    assert_eq!(set.class(), TokenClass::Keyword);
    assert_eq!(set.subclass(), "SET");
}
