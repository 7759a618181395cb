use super::*;
use pretty_assertions::assert_eq;

#[test]
fn no_backslash_is_fast_path() {
    assert_eq!(decode_escapes("plain"), None);
    assert_eq!(decoded("plain"), "plain");
}

#[test]
fn simple_escapes() {
    assert_eq!(decoded(r"a\nb\tc\r\0"), "a\nb\tc\r\0");
    assert_eq!(decoded(r#"\\ \' \""#), "\\ ' \"");
}

#[test]
fn hex_and_unicode_escapes() {
    assert_eq!(decoded(r"\x41\x7a"), "Az");
    assert_eq!(decoded(r"\u00e9"), "é");
    assert_eq!(decoded(r"\u{1F600}"), "\u{1F600}");
}

#[test]
fn unknown_escapes_are_kept() {
    assert_eq!(decoded(r"\d+\.\d*"), r"\d+\.\d*");
    assert_eq!(decoded(r"\xZZ"), r"\xZZ");
    assert_eq!(decoded(r"\u12"), r"\u12");
}

#[test]
fn trailing_backslash_is_kept() {
    assert_eq!(decoded("end\\"), "end\\");
}

#[test]
fn extract_mixed_quotes() {
    assert_eq!(extract_quoted(r##"between "#" "x""##), vec!["#", "x"]);
    assert_eq!(extract_quoted(r#"between '"' '"'"#), vec!["\"", "\""]);
    assert_eq!(extract_quoted(r#"is "it's""#), vec!["it's"]);
}

#[test]
fn extract_decodes_and_skips_unterminated() {
    assert_eq!(extract_quoted(r#"is "\t" "open"#), vec!["\t"]);
    assert!(extract_quoted("is nothing").is_empty());
}
