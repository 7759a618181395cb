//! Prism driver.
//!
//! ```text
//! rule text ──► compile_rules ──► CompiledRules
//!                                      │
//! program text ──────────────────► tokenize ──► Vec<Token>
//!                                                   │
//!                                                   ▼
//!                                  Interpreter::run ──► VariableTable
//! ```
//!
//! The library half exposes the pipeline so tests and embedders can run
//! programs without a process; the `prism` binary adds argument handling
//! and terminal reporting on top.

pub mod commands;
mod pipeline;

pub use pipeline::{
    check_rules_extension, lex_source, read_source, run_source, PrismError, RuleSource,
    DEFAULT_RULES_FILE, RULES_EXTENSION, STANDARD_RULES_NAME,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once per process.
///
/// Nothing is installed unless `RUST_LOG` is set, so normal runs pay no
/// logging cost. Example: `RUST_LOG=prism_eval=debug prism run demo.prsm`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
