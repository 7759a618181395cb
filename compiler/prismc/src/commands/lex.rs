//! The `lex` command: show the token stream for a program.

use super::{report_error, RunOptions};
use crate::{lex_source, read_source, RuleSource};

/// Print every token of the file at `path`, including ignored ones.
pub fn lex_file(path: &str, options: &RunOptions) -> bool {
    let loaded = read_source(path).and_then(|source| {
        let rules = RuleSource::resolve(options.rules.as_deref())?;
        Ok((source, rules))
    });
    let (source, rules) = match loaded {
        Ok(loaded) => loaded,
        Err(err) => {
            report_error(&err, None, None, options.color);
            return false;
        }
    };

    let tokens = match rules.compile().and_then(|compiled| lex_source(&source, &compiled)) {
        Ok(tokens) => tokens,
        Err(err) => {
            report_error(&err, Some((path, &source)), Some(&rules), options.color);
            return false;
        }
    };

    println!("Tokens for '{path}' ({} tokens):", tokens.len());
    for token in &tokens {
        println!(
            "  {:>4}  {:<10} {:<24} {:?}",
            token.line,
            token.span.to_string(),
            token.kind.to_string(),
            token.content
        );
    }
    true
}
