//! The `explain` command: describe an error code.

use prism_diagnostic::ErrorCode;

pub fn explain_error(code_str: &str) -> bool {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit.");
        eprintln!("Examples: E0001, E1001, E2001, E3001");
        return false;
    };

    let phase = if code.is_lexical_error() {
        "lexical"
    } else if code.is_syntax_error() {
        "syntax"
    } else if code.is_semantic_error() {
        "semantic"
    } else if code.is_config_error() {
        "rule file"
    } else {
        "internal"
    };
    println!("{code} ({phase} error): {}", code.description());
    true
}
