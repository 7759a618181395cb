//! Rule-driven tokenizer.
//!
//! One left-to-right scan: each character is appended to a buffer and the
//! match rules are tried in order against it. The first rule that commits
//! turns the buffer into a token. Whatever is left in the buffer at end of
//! input becomes a single `ERROR UNFINISHED_TOKEN` token, so the emitted
//! contents always concatenate back to the source.
//!
//! Greedy rules look exactly one character ahead. A rule whose match can be
//! interrupted and later resumed (`a`, `ab` no, `abc` yes) does not get
//! maximal munch.

use prism_ir::{LineOffsetTable, Span, Token, TokenKind};
use thiserror::Error;

use crate::{CompiledRules, GroupRule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("source is {len} bytes; at most {max} bytes are supported")]
    SourceTooLarge { len: usize, max: u32 },
}

/// Tokenize `source` and apply grouping to fixpoint.
#[allow(
    clippy::cast_possible_truncation,
    reason = "source length checked against u32::MAX up front"
)]
#[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str, rules: &CompiledRules) -> Result<Vec<Token>, TokenizeError> {
    if u32::try_from(source.len()).is_err() {
        return Err(TokenizeError::SourceTooLarge {
            len: source.len(),
            max: u32::MAX,
        });
    }

    let table = LineOffsetTable::build(source);
    let make_token = |kind: TokenKind, content: &str, start: usize, end: usize| {
        let span = Span::new(start as u32, end as u32);
        Token::new(kind, content, span, table.line_from_offset(span.start))
    };

    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut start = 0usize;
    let mut chars = source.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        buffer.push(ch);
        let next = chars.peek().map(|&(_, c)| c);

        let committed = rules
            .match_rules
            .iter()
            .find(|rule| rule.commits(&buffer, next));

        if let Some(rule) = committed {
            let end = offset + ch.len_utf8();
            tracing::trace!(kind = %rule.kind, content = %buffer.escape_debug(), "commit");
            tokens.push(make_token(rule.kind.clone(), &buffer, start, end));
            buffer.clear();
            start = end;
        }
    }

    if !buffer.is_empty() {
        tracing::debug!(start, "unfinished token at end of input");
        tokens.push(make_token(
            TokenKind::Error(TokenKind::UNFINISHED_TOKEN.to_owned()),
            &buffer,
            start,
            source.len(),
        ));
    }

    let tokens = group_tokens(tokens, &rules.group_rules);
    tracing::debug!(tokens = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Merge adjacent token pairs until no group rule applies.
///
/// Each step merges the leftmost eligible pair (first matching group rule
/// wins). Everything left of the merged token was already checked and did
/// not change, so scanning resumes one token back instead of at the start;
/// the fixpoint is the same as rescanning from the beginning after every
/// merge. A merged token keeps the first part's line and is itself
/// eligible for further merging.
pub fn group_tokens(mut tokens: Vec<Token>, groups: &[GroupRule]) -> Vec<Token> {
    if groups.is_empty() {
        return tokens;
    }

    let mut i = 0;
    while i + 1 < tokens.len() {
        let group = groups
            .iter()
            .find(|group| group.applies(&tokens[i], &tokens[i + 1]));

        let Some(group) = group else {
            i += 1;
            continue;
        };

        let second = tokens.remove(i + 1);
        let first = &mut tokens[i];
        first.kind = group.result.clone();
        first.content.push_str(&second.content);
        first.span = first.span.merge(second.span);
        tracing::trace!(kind = %first.kind, content = %first.content, "merge");

        i = i.saturating_sub(1);
    }

    tokens
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
