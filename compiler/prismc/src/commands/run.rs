//! The `run` command: tokenize and execute a Prism program.

use prism_eval::{silent_handler, stdout_handler, VariableTable};

use super::{report_error, RunOptions};
use crate::{read_source, run_source, RuleSource};

/// Run the program at `path`. Diagnostics go to stderr.
pub fn run_file(path: &str, options: &RunOptions) -> bool {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(err) => {
            report_error(&err, None, None, options.color);
            return false;
        }
    };
    let rules = match RuleSource::resolve(options.rules.as_deref()) {
        Ok(rules) => rules,
        Err(err) => {
            report_error(&err, None, None, options.color);
            return false;
        }
    };
    let compiled = match rules.compile() {
        Ok(compiled) => compiled,
        Err(err) => {
            report_error(&err, None, Some(&rules), options.color);
            return false;
        }
    };
    tracing::debug!(rules = %rules.origin, "rules loaded");

    let print = if options.quiet {
        silent_handler()
    } else {
        stdout_handler()
    };
    match run_source(&source, &compiled, print) {
        Ok(variables) => {
            if options.show_vars {
                print_variables(&variables);
            }
            true
        }
        Err(err) => {
            report_error(&err, Some((path, &source)), Some(&rules), options.color);
            false
        }
    }
}

fn print_variables(variables: &VariableTable) {
    println!("Variables ({}):", variables.len());
    for (name, value) in variables.sorted() {
        println!("  {name} = {value} ({})", value.type_name());
    }
}
