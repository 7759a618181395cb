use super::*;
use pretty_assertions::assert_eq;
use prism_ir::{Span, TokenKind};
use prism_lexif::{standard_rules, tokenize};

use crate::print_handler::BufferPrintHandler;

fn call_site() -> Token {
    Token::new(
        TokenKind::Function("OUTPUT".into()),
        "output",
        Span::new(0, 6),
        1,
    )
}

fn lex(source: &str) -> Vec<Token> {
    tokenize(source, &standard_rules().unwrap()).unwrap()
}

#[test]
fn standard_registry_has_output() {
    let registry = BuiltinRegistry::standard();
    assert_eq!(registry.names(), vec!["OUTPUT"]);
    assert_eq!(registry.get("OUTPUT").map(|b| b.arity), Some(1));
    assert!(registry.get("output").is_none());
}

#[test]
fn register_replaces_existing_entry() {
    fn noop(_: &mut CallContext<'_>, _: &[&[Token]]) -> EvalResult<()> {
        Ok(())
    }

    let mut registry = BuiltinRegistry::standard();
    let previous = registry.register("OUTPUT", Builtin { arity: 0, call: noop });
    assert_eq!(previous.map(|b| b.arity), Some(1));
    assert_eq!(registry.get("OUTPUT").map(|b| b.arity), Some(0));
}

#[test]
fn output_prints_display_form() {
    let print = PrintHandlerImpl::Buffer(BufferPrintHandler::new());
    let mut variables = VariableTable::new();
    variables.set("x", Value::Int(4));
    let site = call_site();
    let mut cx = CallContext {
        variables: &mut variables,
        print: &print,
        call_site: &site,
    };

    for source in ["x / 2", "\"hi\"", "x > 3"] {
        let tokens = lex(source);
        output(&mut cx, &[&tokens]).unwrap();
    }
    assert_eq!(print.output(), "2.0\nhi\ntrue\n");
}

#[test]
fn output_rejects_wrong_parameter_count() {
    let print = PrintHandlerImpl::Silent;
    let mut variables = VariableTable::new();
    let site = call_site();
    let mut cx = CallContext {
        variables: &mut variables,
        print: &print,
        call_site: &site,
    };

    let err = output(&mut cx, &[]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::WrongParameterCount {
            name: "output".into(),
            expected: 1,
            got: 0
        }
    );
    assert_eq!(err.span, site.span);
}

#[test]
fn empty_parameter_is_placed_at_call_site() {
    let print = PrintHandlerImpl::Silent;
    let mut variables = VariableTable::new();
    let site = call_site();
    let cx = CallContext {
        variables: &mut variables,
        print: &print,
        call_site: &site,
    };

    let err = cx.evaluate(&lex(" ")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::MissingExpression);
    assert_eq!(err.line, 1);
    assert_eq!(err.span, site.span);
}
