//! Rule compilation.
//!
//! A `.lexif` file has three sections:
//!
//! ```text
//! #CONSTANTS
//! NL -> \n
//!
//! #RULES
//! IGNORE WHITESPACE => matches /[ \t\r\n]+/
//! IGNORE COMMENT -> between "#" "NL"
//! OPERATION ASSIGN -> is "="
//!
//! #GROUPS
//! OPERATION EQUAL_TO -> OPERATION ASSIGN + OPERATION ASSIGN
//! ```
//!
//! Compilation is a pure function of the rule text. All `CLASS SUBCLASS`
//! tags are resolved into [`TokenKind`]s here, so the tokenizer never looks
//! at tag strings.

use std::fmt;

use prism_ir::{Token, TokenClass, TokenKind};
use regex::Regex;

use crate::escape::{decoded, extract_quoted};
use crate::RuleError;

/// When a matching rule commits its buffer.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MatchType {
    /// `->`: commit on the first character that makes the buffer match.
    Normal,
    /// `=>`: commit only when one more character would break the match, or
    /// at end of input.
    Greedy,
}

impl MatchType {
    /// Arrow that selects this match type in rule text.
    pub fn arrow(self) -> &'static str {
        match self {
            MatchType::Normal => "->",
            MatchType::Greedy => "=>",
        }
    }
}

/// The test a rule applies to the tokenizer buffer.
#[derive(Clone, Debug)]
pub enum Matcher {
    /// `is "lit"`
    Equal(String),
    /// `between "a" "b"`: starts with `a`, ends with `b`, at least two chars.
    Between { start: String, end: String },
    /// `matches /pattern/`, anchored to the whole buffer.
    Regex(Regex),
    /// `endswith "s"`
    EndsWith(String),
}

impl Matcher {
    pub fn is_match(&self, buffer: &str) -> bool {
        match self {
            Matcher::Equal(text) => buffer == text,
            Matcher::Between { start, end } => {
                buffer.starts_with(start.as_str())
                    && buffer.ends_with(end.as_str())
                    && buffer.chars().nth(1).is_some()
            }
            Matcher::Regex(pattern) => pattern.is_match(buffer),
            Matcher::EndsWith(suffix) => buffer.ends_with(suffix.as_str()),
        }
    }
}

/// Renders the match expression in rule-file syntax.
impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Equal(text) => write!(f, "is {text:?}"),
            Matcher::Between { start, end } => write!(f, "between {start:?} {end:?}"),
            Matcher::Regex(pattern) => {
                let anchored = pattern.as_str();
                let inner = anchored
                    .strip_prefix(r"\A(?:")
                    .and_then(|rest| rest.strip_suffix(r")\z"))
                    .unwrap_or(anchored);
                write!(f, "matches /{inner}/")
            }
            Matcher::EndsWith(suffix) => write!(f, "endswith {suffix:?}"),
        }
    }
}

/// A compiled `CLASS SUBCLASS <arrow> <match-expr>` line.
#[derive(Clone, Debug)]
pub struct MatchRule {
    pub kind: TokenKind,
    pub match_type: MatchType,
    pub matcher: Matcher,
}

impl MatchRule {
    /// Whether this rule commits `buffer` given the character after it.
    pub fn commits(&self, buffer: &str, next: Option<char>) -> bool {
        if !self.matcher.is_match(buffer) {
            return false;
        }
        match (self.match_type, next) {
            (MatchType::Normal, _) | (MatchType::Greedy, None) => true,
            (MatchType::Greedy, Some(next)) => {
                let mut extended = String::with_capacity(buffer.len() + next.len_utf8());
                extended.push_str(buffer);
                extended.push(next);
                !self.matcher.is_match(&extended)
            }
        }
    }
}

/// A compiled `RCLASS RSUB -> CLASS1 SUB1 + CLASS2 SUB2` line.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GroupRule {
    pub result: TokenKind,
    pub parts: [TokenKind; 2],
}

impl GroupRule {
    #[inline]
    pub fn applies(&self, first: &Token, second: &Token) -> bool {
        first.kind == self.parts[0] && second.kind == self.parts[1]
    }
}

/// Output of [`compile_rules`].
#[derive(Clone, Debug, Default)]
pub struct CompiledRules {
    /// Tried in declaration order; the first rule that commits wins.
    pub match_rules: Vec<MatchRule>,
    pub group_rules: Vec<GroupRule>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Section {
    Constants,
    Rules,
    Groups,
}

struct Constant {
    name: String,
    replacement: String,
}

/// Compile rule text into match and group rules.
#[tracing::instrument(level = "debug", skip_all, fields(rule_len = rule_text.len()))]
pub fn compile_rules(rule_text: &str) -> Result<CompiledRules, RuleError> {
    let mut section = None;
    let mut constants = Vec::new();
    let mut compiled = CompiledRules::default();

    for (idx, raw) in rule_text.lines().enumerate() {
        let line = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        if text.starts_with('#') {
            section = Some(match text {
                "#CONSTANTS" => Section::Constants,
                "#RULES" => Section::Rules,
                "#GROUPS" => Section::Groups,
                _ => {
                    return Err(RuleError::UnknownSection {
                        line,
                        header: text.to_owned(),
                    })
                }
            });
            continue;
        }

        match section {
            None => return Err(RuleError::OutsideSection { line }),
            Some(Section::Constants) => constants.push(parse_constant(raw.trim_start(), line)?),
            Some(Section::Rules) => compiled
                .match_rules
                .push(parse_match_rule(text, line, &constants)?),
            Some(Section::Groups) => compiled.group_rules.push(parse_group_rule(text, line)?),
        }
    }

    tracing::debug!(
        constants = constants.len(),
        rules = compiled.match_rules.len(),
        groups = compiled.group_rules.len(),
        "compiled rules"
    );
    Ok(compiled)
}

/// `NAME -> replacement`. Only the single space after the arrow separates;
/// the rest of the line, trailing whitespace included, is the replacement.
fn parse_constant(text: &str, line: u32) -> Result<Constant, RuleError> {
    let (name, replacement) = text
        .split_once("->")
        .ok_or(RuleError::MalformedConstant { line })?;
    let name = name.trim();
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(RuleError::MalformedConstant { line });
    }
    let replacement = replacement.strip_prefix(' ').unwrap_or(replacement);
    Ok(Constant {
        name: name.to_owned(),
        replacement: decoded(replacement),
    })
}

/// Split off the first whitespace-delimited word.
fn next_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((text, "")),
    }
}

fn resolve_kind(class: &str, subclass: &str, line: u32) -> Result<TokenKind, RuleError> {
    let class_tag = TokenClass::from_tag(class).ok_or_else(|| RuleError::UnknownClass {
        line,
        class: class.to_owned(),
    })?;
    TokenKind::from_tags(class_tag, subclass).ok_or_else(|| RuleError::UnknownKind {
        line,
        class: class.to_owned(),
        subclass: subclass.to_owned(),
    })
}

fn parse_match_rule(text: &str, line: u32, constants: &[Constant]) -> Result<MatchRule, RuleError> {
    let malformed = || RuleError::MalformedRule {
        line,
        text: text.to_owned(),
    };
    let (class, rest) = next_word(text).ok_or_else(malformed)?;
    let (subclass, rest) = next_word(rest).ok_or_else(malformed)?;
    let (arrow, rest) = next_word(rest).ok_or_else(malformed)?;

    let match_type = match arrow {
        "->" => MatchType::Normal,
        "=>" => MatchType::Greedy,
        _ => {
            return Err(RuleError::UnknownArrow {
                line,
                arrow: arrow.to_owned(),
            })
        }
    };
    let kind = resolve_kind(class, subclass, line)?;

    let mut expr = rest.trim().to_owned();
    for constant in constants {
        expr = expr.replace(&constant.name, &constant.replacement);
    }
    let matcher = parse_matcher(&expr, line)?;

    tracing::trace!(%kind, ?match_type, "match rule");
    Ok(MatchRule {
        kind,
        match_type,
        matcher,
    })
}

fn parse_matcher(expr: &str, line: u32) -> Result<Matcher, RuleError> {
    let unknown = || RuleError::UnknownMatch {
        line,
        expr: expr.to_owned(),
    };
    let (keyword, operand) = next_word(expr).ok_or_else(unknown)?;

    let quoted = |keyword: &'static str, expected: usize| {
        let strings = extract_quoted(operand);
        if strings.len() < expected {
            Err(RuleError::MissingQuoted {
                line,
                keyword,
                expected,
            })
        } else {
            Ok(strings)
        }
    };

    match keyword {
        "is" => {
            let mut strings = quoted("is", 1)?;
            Ok(Matcher::Equal(strings.swap_remove(0)))
        }
        "between" => {
            let mut strings = quoted("between", 2)?.into_iter();
            match (strings.next(), strings.next()) {
                (Some(start), Some(end)) => Ok(Matcher::Between { start, end }),
                _ => Err(RuleError::MissingQuoted {
                    line,
                    keyword: "between",
                    expected: 2,
                }),
            }
        }
        "endswith" => {
            let mut strings = quoted("endswith", 1)?;
            Ok(Matcher::EndsWith(strings.swap_remove(0)))
        }
        "matches" => compile_pattern(operand.trim(), line).map(Matcher::Regex),
        _ => Err(unknown()),
    }
}

/// Compile a `matches` operand, with or without `/…/` delimiters.
fn compile_pattern(operand: &str, line: u32) -> Result<Regex, RuleError> {
    let body = operand
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .unwrap_or(operand);
    let pattern = decoded(body);
    Regex::new(&format!(r"\A(?:{pattern})\z")).map_err(|err| RuleError::InvalidRegex {
        line,
        pattern,
        message: err.to_string(),
    })
}

fn parse_group_rule(text: &str, line: u32) -> Result<GroupRule, RuleError> {
    let malformed = || RuleError::MalformedGroup {
        line,
        text: text.to_owned(),
    };
    let (result, parts) = text.split_once("->").ok_or_else(malformed)?;

    let tag_pair = |words: &str| -> Result<TokenKind, RuleError> {
        let mut iter = words.split_whitespace();
        match (iter.next(), iter.next(), iter.next()) {
            (Some(class), Some(subclass), None) => resolve_kind(class, subclass, line),
            _ => Err(malformed()),
        }
    };

    let result = tag_pair(result)?;
    let mut parts_iter = parts.split('+');
    let (Some(first), Some(second), None) = (parts_iter.next(), parts_iter.next(), parts_iter.next())
    else {
        return Err(malformed());
    };

    Ok(GroupRule {
        result,
        parts: [tag_pair(first)?, tag_pair(second)?],
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
