//! The `rules` command: compile a rule file and list what it defines.

use prism_diagnostic::emitter::ColorMode;
use prism_eval::BuiltinRegistry;
use prism_ir::TokenKind;
use prism_lexif::CompiledRules;

use super::report_error;
use crate::RuleSource;

/// FUNCTION subclasses the rules can produce that name no registered
/// built-in, in rule order without repeats.
pub(crate) fn unbound_functions<'r>(
    compiled: &'r CompiledRules,
    builtins: &BuiltinRegistry,
) -> Vec<&'r str> {
    let mut unbound: Vec<&str> = Vec::new();
    let results = compiled
        .match_rules
        .iter()
        .map(|rule| &rule.kind)
        .chain(compiled.group_rules.iter().map(|group| &group.result));
    for kind in results {
        if let TokenKind::Function(name) = kind {
            if builtins.get(name).is_none() && !unbound.contains(&name.as_str()) {
                unbound.push(name);
            }
        }
    }
    unbound
}

pub fn check_rules_file(path: &str, color: ColorMode) -> bool {
    let rules = match RuleSource::from_path(path) {
        Ok(rules) => rules,
        Err(err) => {
            report_error(&err, None, None, color);
            return false;
        }
    };
    let compiled = match rules.compile() {
        Ok(compiled) => compiled,
        Err(err) => {
            report_error(&err, None, Some(&rules), color);
            return false;
        }
    };

    println!(
        "Rules in '{path}': {} match rules, {} group rules",
        compiled.match_rules.len(),
        compiled.group_rules.len()
    );
    if !compiled.match_rules.is_empty() {
        println!();
        println!("Match rules (in priority order):");
        for rule in &compiled.match_rules {
            println!(
                "  {:<28} {} {}",
                rule.kind.to_string(),
                rule.match_type.arrow(),
                rule.matcher
            );
        }
    }
    if !compiled.group_rules.is_empty() {
        println!();
        println!("Group rules:");
        for group in &compiled.group_rules {
            println!(
                "  {:<28} -> {} + {}",
                group.result.to_string(),
                group.parts[0],
                group.parts[1]
            );
        }
    }

    let builtins = BuiltinRegistry::standard();
    println!();
    println!("Built-ins: {}", builtins.names().join(", "));
    for name in unbound_functions(&compiled, &builtins) {
        println!("  warning: FUNCTION {name} has no built-in; calls fail with E2006");
    }
    true
}
