use super::*;
use crate::compile_rules;
use pretty_assertions::assert_eq;
use prism_ir::{BinaryOp, Delimiter, LiteralKind, TokenClass};

fn rules(text: &str) -> CompiledRules {
    compile_rules(text).unwrap()
}

fn lex(source: &str, rule_text: &str) -> Vec<Token> {
    tokenize(source, &rules(rule_text)).unwrap()
}

fn contents(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.content.as_str()).collect()
}

#[test]
fn greedy_number_is_maximal_munch() {
    let tokens = lex(
        "123abc",
        "#RULES\n\
         LITERAL NUMBER => matches /[0-9]+/\n\
         IDENTIFIER VARIABLE => matches /[a-z]+/\n",
    );
    assert_eq!(contents(&tokens), vec!["123", "abc"]);
    assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Number));
    assert_eq!(tokens[0].span, Span::new(0, 3));
    assert_eq!(tokens[1].span, Span::new(3, 6));
}

#[test]
fn normal_number_commits_each_digit() {
    let tokens = lex("123", "#RULES\nLITERAL NUMBER -> matches /[0-9]+/\n");
    assert_eq!(contents(&tokens), vec!["1", "2", "3"]);
}

#[test]
fn first_rule_in_declaration_order_wins() {
    let tokens = lex(
        "x",
        "#RULES\n\
         IGNORE FIRST -> is \"x\"\n\
         IGNORE SECOND -> is \"x\"\n",
    );
    assert_eq!(tokens[0].kind, TokenKind::Ignore("FIRST".into()));
}

#[test]
fn unfinished_token_at_end_of_input() {
    let tokens = lex(
        "a \"open",
        "#RULES\n\
         IDENTIFIER VARIABLE => matches /[a-z]+/\n\
         IGNORE WHITESPACE => matches /[ ]+/\n\
         LITERAL STRING -> between '\"' '\"'\n",
    );
    assert_eq!(contents(&tokens), vec!["a", " ", "\"open"]);
    let last = tokens.last().unwrap();
    assert!(last.is_error());
    assert_eq!(last.subclass(), TokenKind::UNFINISHED_TOKEN);
    assert_eq!(last.span, Span::new(2, 7));
}

#[test]
fn line_numbers_follow_first_byte() {
    let tokens = lex(
        "a\nbb\n\nc",
        "#RULES\n\
         IDENTIFIER VARIABLE => matches /[a-z]+/\n\
         IGNORE WHITESPACE => matches /\\n+/\n",
    );
    let lines: Vec<_> = tokens.iter().map(|t| (t.content.as_str(), t.line)).collect();
    assert_eq!(
        lines,
        vec![("a", 1), ("\n", 1), ("bb", 2), ("\n\n", 2), ("c", 4)]
    );
}

#[test]
fn spans_use_byte_offsets_for_multibyte_text() {
    let tokens = lex(
        "\"é\";",
        "#RULES\n\
         LITERAL STRING -> between '\"' '\"'\n\
         DELIMITER SEMICOLON -> is \";\"\n",
    );
    assert_eq!(tokens[0].span, Span::new(0, 4));
    assert_eq!(tokens[1].span, Span::new(4, 5));
}

const OPERATOR_RULES: &str = "#RULES\n\
    OPERATION NOT -> is \"!\"\n\
    OPERATION ASSIGN -> is \"=\"\n\
    OPERATION LESS_THAN -> is \"<\"\n\
    IGNORE WHITESPACE => matches /[ ]+/\n\
    #GROUPS\n\
    OPERATION NOT_EQUAL -> OPERATION NOT + OPERATION ASSIGN\n\
    OPERATION EQUAL_TO -> OPERATION ASSIGN + OPERATION ASSIGN\n\
    OPERATION LESS_EQUAL -> OPERATION LESS_THAN + OPERATION ASSIGN\n\
    OPERATION STRICT_NOT_EQUAL -> OPERATION NOT_EQUAL + OPERATION ASSIGN\n";

#[test]
fn group_merges_pair() {
    let tokens = lex("!=", OPERATOR_RULES);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Operator(BinaryOp::NotEq));
    assert_eq!(tokens[0].content, "!=");
    assert_eq!(tokens[0].span, Span::new(0, 2));
}

#[test]
fn merged_token_composes_with_later_group() {
    let tokens = lex("!==", OPERATOR_RULES);
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        tokens[0].kind,
        TokenKind::Fragment {
            class: TokenClass::Operation,
            subclass: "STRICT_NOT_EQUAL".into()
        }
    );
    assert_eq!(tokens[0].content, "!==");
}

#[test]
fn leftmost_pair_merges_first() {
    // `<==`: `<=` is formed first, leaving a lone `=`.
    let tokens = lex("<==", OPERATOR_RULES);
    assert_eq!(contents(&tokens), vec!["<=", "="]);
    assert_eq!(tokens[0].kind, TokenKind::Operator(BinaryOp::LtEq));
    assert_eq!(tokens[1].kind, TokenKind::Assign);
}

#[test]
fn ignored_tokens_block_grouping() {
    let tokens = lex("! =", OPERATOR_RULES);
    assert_eq!(contents(&tokens), vec!["!", " ", "="]);
}

#[test]
fn merged_token_keeps_first_line() {
    let tokens = lex(
        "(\n)",
        "#RULES\n\
         DELIMITER LPAREN -> is \"(\"\n\
         DELIMITER RPAREN -> is \")\"\n\
         IGNORE NEWLINE -> is \"\\n\"\n\
         #GROUPS\n\
         DELIMITER PARENS -> DELIMITER LPAREN + IGNORE NEWLINE\n",
    );
    assert_eq!(tokens[0].content, "(\n");
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[1].kind, TokenKind::Delimiter(Delimiter::RParen));
}

#[test]
fn empty_source_yields_no_tokens() {
    assert!(lex("", OPERATOR_RULES).is_empty());
}

mod proptest_concat {
    use super::super::tokenize;
    use crate::standard_rules;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn contents_concatenate_to_source(
            source in "[a-z0-9 +*/<>=!(){};,\"\n]{0,64}"
        ) {
            let rules = standard_rules().unwrap();
            let tokens = tokenize(&source, &rules).unwrap();
            let joined: String = tokens.iter().map(|t| t.content.as_str()).collect();
            prop_assert_eq!(joined, source);
        }

        #[test]
        fn spans_tile_the_source(source in "[a-z0-9 ;=\n]{0,64}") {
            let rules = standard_rules().unwrap();
            let tokens = tokenize(&source, &rules).unwrap();
            let mut expected_start = 0u32;
            for token in &tokens {
                prop_assert_eq!(token.span.start, expected_start);
                prop_assert_eq!(&source[token.span.start as usize..token.span.end as usize], token.content.as_str());
                expected_start = token.span.end;
            }
        }
    }
}
