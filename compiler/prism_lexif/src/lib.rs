//! Prism lexif - rule-driven tokenizer.
//!
//! Lexing is configured entirely by a `.lexif` rule file: match rules turn
//! characters into tokens and group rules merge adjacent tokens afterwards.
//!
//! ```
//! use prism_lexif::{compile_rules, tokenize, STANDARD_RULES};
//!
//! let rules = compile_rules(STANDARD_RULES).unwrap();
//! let tokens = tokenize("set x = 1 != 2;", &rules).unwrap();
//! assert!(tokens.iter().any(|t| t.subclass() == "NOT_EQUAL"));
//! ```

mod escape;
mod rule_error;
mod rules;
mod tokenizer;

pub use rule_error::RuleError;
pub use rules::{compile_rules, CompiledRules, GroupRule, MatchRule, MatchType, Matcher};
pub use tokenizer::{group_tokens, tokenize, TokenizeError};

/// The rule set for the Prism language, used when no rule file is given.
pub const STANDARD_RULES: &str = include_str!("../rules/prism.lexif");

/// Compile [`STANDARD_RULES`].
pub fn standard_rules() -> Result<CompiledRules, RuleError> {
    compile_rules(STANDARD_RULES)
}
