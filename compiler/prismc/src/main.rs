//! Prism CLI

use prism_diagnostic::emitter::ColorMode;
use prismc::commands::{check_rules_file, explain_error, lex_file, parse_run_args, run_file};

fn main() {
    prismc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let ok = match command.as_str() {
        "run" => match parse_run_args(&args[2..]) {
            Ok((path, options)) => run_file(&path, &options),
            Err(message) => {
                eprintln!("error: {message}");
                eprintln!("Usage: prism run <file.prsm> [--rules=<file.lexif>] [--color=<mode>] [--show-vars] [--quiet]");
                false
            }
        },
        "lex" => match parse_run_args(&args[2..]) {
            Ok((path, options)) => lex_file(&path, &options),
            Err(message) => {
                eprintln!("error: {message}");
                eprintln!("Usage: prism lex <file.prsm> [--rules=<file.lexif>]");
                false
            }
        },
        "rules" => {
            if args.len() < 3 {
                eprintln!("Usage: prism rules <file.lexif>");
                std::process::exit(1);
            }
            let color = args
                .iter()
                .skip(3)
                .find_map(|arg| arg.strip_prefix("--color="))
                .and_then(ColorMode::from_flag)
                .unwrap_or_default();
            check_rules_file(&args[2], color)
        }
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: prism explain <ERROR_CODE>");
                eprintln!("Example: prism explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("Prism {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            // A bare program path runs it with default options
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("prsm"))
            {
                match parse_run_args(&args[1..]) {
                    Ok((path, options)) => run_file(&path, &options),
                    Err(message) => {
                        eprintln!("error: {message}");
                        false
                    }
                }
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                false
            }
        }
    };

    if !ok {
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Prism - a rule-driven scripting language");
    println!();
    println!("Usage: prism <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.prsm>      Run a Prism program");
    println!("  lex <file.prsm>      Tokenize and display tokens");
    println!("  rules <file.lexif>   Compile a rule file and list its rules");
    println!("  explain <code>       Explain an error code (e.g., E2001)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run and lex options:");
    println!("  --rules=<file.lexif> Rule file (default: ./rules.lexif, else built-in rules)");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Run options:");
    println!("  --show-vars          Print the variable table after the run");
    println!("  --quiet, -q          Discard program output");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing (e.g., RUST_LOG=prism_eval=debug)");
    println!();
    println!("Examples:");
    println!("  prism run demo.prsm");
    println!("  prism run demo.prsm --rules=custom.lexif --show-vars");
    println!("  prism lex demo.prsm");
    println!("  prism rules custom.lexif");
    println!("  prism explain E1001");
}
