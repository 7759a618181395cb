use super::*;
use pretty_assertions::assert_eq;
use prism_ir::{BinaryOp, Delimiter, LiteralKind, Span};

fn compile(text: &str) -> CompiledRules {
    compile_rules(text).unwrap()
}

#[test]
fn compiles_all_four_match_forms() {
    let rules = compile(
        "#RULES\n\
         OPERATION PLUS -> is \"+\"\n\
         LITERAL STRING -> between '\"' '\"'\n\
         LITERAL NUMBER => matches /[0-9]+/\n\
         IGNORE LINE -> endswith \";;\"\n",
    );
    assert_eq!(rules.match_rules.len(), 4);
    assert!(rules.group_rules.is_empty());

    let kinds: Vec<_> = rules.match_rules.iter().map(|r| r.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Operator(BinaryOp::Add),
            TokenKind::Literal(LiteralKind::String),
            TokenKind::Literal(LiteralKind::Number),
            TokenKind::Ignore("LINE".into()),
        ]
    );
    assert_eq!(rules.match_rules[0].match_type, MatchType::Normal);
    assert_eq!(rules.match_rules[2].match_type, MatchType::Greedy);

    assert!(rules.match_rules[1].matcher.is_match("\"hi\""));
    assert!(!rules.match_rules[1].matcher.is_match("\""));
    assert!(rules.match_rules[3].matcher.is_match("abc;;"));
}

#[test]
fn regex_is_anchored_to_whole_buffer() {
    let rules = compile("#RULES\nLITERAL NUMBER => matches /[0-9]+/\n");
    let matcher = &rules.match_rules[0].matcher;
    assert!(matcher.is_match("123"));
    assert!(!matcher.is_match("123a"));
    assert!(!matcher.is_match("a123"));
}

#[test]
fn undelimited_pattern_is_accepted() {
    let rules = compile("#RULES\nIDENTIFIER VARIABLE => matches [a-z]+\n");
    assert!(rules.match_rules[0].matcher.is_match("abc"));
}

#[test]
fn greedy_commits_at_maximal_munch() {
    let rules = compile("#RULES\nLITERAL NUMBER => matches /[0-9]+/\n");
    let rule = &rules.match_rules[0];
    assert!(!rule.commits("12", Some('3')));
    assert!(rule.commits("123", Some('a')));
    assert!(rule.commits("123", None));
}

#[test]
fn normal_commits_immediately() {
    let rules = compile("#RULES\nLITERAL NUMBER -> matches /[0-9]+/\n");
    assert!(rules.match_rules[0].commits("1", Some('2')));
}

#[test]
fn constants_substitute_into_match_expressions() {
    let rules = compile(
        "#CONSTANTS\n\
         NL -> \\n\n\
         #RULES\n\
         IGNORE COMMENT -> between \"#\" \"NL\"\n",
    );
    match &rules.match_rules[0].matcher {
        Matcher::Between { start, end } => {
            assert_eq!(start, "#");
            assert_eq!(end, "\n");
        }
        other => panic!("expected between, got {other:?}"),
    }
}

#[test]
fn constant_replacement_keeps_whitespace() {
    let rules = compile(
        "#CONSTANTS\n\
         SP ->  \n\
         TAB -> \\t\n\
         #RULES\n\
         IGNORE SPACE -> is \"SP\"\n\
         IGNORE INDENT -> is \"TABSP\"\n",
    );
    assert!(rules.match_rules[0].matcher.is_match(" "));
    assert!(!rules.match_rules[0].matcher.is_match(""));
    assert!(rules.match_rules[1].matcher.is_match("\t "));
}

#[test]
fn constants_do_not_touch_tags() {
    // `ADD` would otherwise rewrite the subclass of the rule below.
    let rules = compile(
        "#CONSTANTS\n\
         ADD -> +\n\
         #RULES\n\
         OPERATION PLUS -> is \"ADD\"\n",
    );
    assert_eq!(rules.match_rules[0].kind, TokenKind::Operator(BinaryOp::Add));
    assert!(rules.match_rules[0].matcher.is_match("+"));
}

#[test]
fn group_rules_resolve_kinds() {
    let rules = compile(
        "#RULES\n\
         OPERATION NOT -> is \"!\"\n\
         #GROUPS\n\
         OPERATION NOT_EQUAL -> OPERATION NOT + OPERATION ASSIGN\n",
    );
    assert_eq!(
        rules.group_rules,
        vec![GroupRule {
            result: TokenKind::Operator(BinaryOp::NotEq),
            parts: [
                TokenKind::Fragment {
                    class: TokenClass::Operation,
                    subclass: "NOT".into()
                },
                TokenKind::Assign,
            ],
        }]
    );

    let bang = Token::new(rules.group_rules[0].parts[0].clone(), "!", Span::new(0, 1), 1);
    let eq = Token::new(TokenKind::Assign, "=", Span::new(1, 2), 1);
    assert!(rules.group_rules[0].applies(&bang, &eq));
    assert!(!rules.group_rules[0].applies(&eq, &bang));
}

#[test]
fn blank_lines_and_indentation_are_ignored() {
    let rules = compile("\n#RULES\n\n   DELIMITER SEMICOLON -> is \";\"   \n\n");
    assert_eq!(
        rules.match_rules[0].kind,
        TokenKind::Delimiter(Delimiter::Semicolon)
    );
}

// Configuration errors

fn compile_err(text: &str) -> RuleError {
    compile_rules(text).unwrap_err()
}

#[test]
fn unknown_section_header() {
    assert_eq!(
        compile_err("#MACROS\n"),
        RuleError::UnknownSection {
            line: 1,
            header: "#MACROS".into()
        }
    );
}

#[test]
fn text_before_any_section() {
    assert_eq!(
        compile_err("OPERATION PLUS -> is \"+\"\n#RULES\n"),
        RuleError::OutsideSection { line: 1 }
    );
}

#[test]
fn unknown_arrow() {
    assert_eq!(
        compile_err("#RULES\nOPERATION PLUS ~> is \"+\"\n"),
        RuleError::UnknownArrow {
            line: 2,
            arrow: "~>".into()
        }
    );
}

#[test]
fn truncated_rule() {
    assert!(matches!(
        compile_err("#RULES\nOPERATION PLUS\n"),
        RuleError::MalformedRule { line: 2, .. }
    ));
}

#[test]
fn unknown_match_expression() {
    assert!(matches!(
        compile_err("#RULES\nOPERATION PLUS -> equals \"+\"\n"),
        RuleError::UnknownMatch { line: 2, .. }
    ));
}

#[test]
fn invalid_regex() {
    assert!(matches!(
        compile_err("#RULES\nLITERAL NUMBER => matches /[0-9/\n"),
        RuleError::InvalidRegex { line: 2, .. }
    ));
}

#[test]
fn unknown_class_and_kind() {
    assert!(matches!(
        compile_err("#RULES\nMACRO X -> is \"x\"\n"),
        RuleError::UnknownClass { line: 2, .. }
    ));
    assert!(matches!(
        compile_err("#RULES\nLOOP FOR -> is \"for\"\n"),
        RuleError::UnknownKind { line: 2, .. }
    ));
}

#[test]
fn between_needs_two_strings() {
    assert_eq!(
        compile_err("#RULES\nLITERAL STRING -> between '\"'\n"),
        RuleError::MissingQuoted {
            line: 2,
            keyword: "between",
            expected: 2
        }
    );
}

#[test]
fn malformed_constant_and_group() {
    assert_eq!(
        compile_err("#CONSTANTS\nNL\n"),
        RuleError::MalformedConstant { line: 2 }
    );
    assert!(matches!(
        compile_err("#GROUPS\nOPERATION EQUAL_TO -> OPERATION ASSIGN\n"),
        RuleError::MalformedGroup { line: 2, .. }
    ));
    assert!(matches!(
        compile_err("#GROUPS\nOPERATION X -> A B + C D + E F\n"),
        RuleError::MalformedGroup { line: 2, .. }
    ));
}

#[test]
fn matchers_render_in_rule_syntax() {
    let rules = compile(
        "#RULES\nIDENTIFIER VARIABLE => matches /[a-z]+/\nIGNORE COMMENT -> between \"#\" \"\\n\"\nOPERATION PLUS -> is \"+\"\nIDENTIFIER VARIABLE -> endswith \"_\"\n",
    );
    let rendered: Vec<String> = rules
        .match_rules
        .iter()
        .map(|rule| format!("{} {}", rule.match_type.arrow(), rule.matcher))
        .collect();
    assert_eq!(
        rendered,
        vec![
            "=> matches /[a-z]+/".to_owned(),
            r##"-> between "#" "\n""##.to_owned(),
            r#"-> is "+""#.to_owned(),
            r#"-> endswith "_""#.to_owned(),
        ]
    );
}
