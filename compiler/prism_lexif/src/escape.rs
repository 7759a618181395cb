//! Escape decoding for rule file text.
//!
//! Constant replacements, quoted operands and `matches` patterns are all
//! decoded with the same escape set:
//! `\n` `\t` `\r` `\0` `\\` `\'` `\"` `\xHH` `\u{...}`/`\uXXXX`.
//!
//! Unknown escapes are kept verbatim (backslash included) so regex classes
//! such as `\d` or `\.` reach the pattern compiler untouched.

/// Resolve a single-character escape.
#[inline]
fn resolve_simple_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        _ => None,
    }
}

/// Read exactly `digits` hex digits from the front of `rest`.
fn take_hex(rest: &str, digits: usize) -> Option<(char, usize)> {
    let hex = rest.get(..digits)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(value).map(|c| (c, digits))
}

/// Read a braced `{1F600}` code point from the front of `rest`.
fn take_braced_hex(rest: &str) -> Option<(char, usize)> {
    let body = rest.strip_prefix('{')?;
    let close = body.find('}')?;
    let hex = &body[..close];
    if hex.is_empty() || hex.len() > 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(value).map(|c| (c, close + 2))
}

/// Decode escapes in `text`.
///
/// Returns `None` when `text` has no backslash, so callers can keep the
/// original slice.
pub(crate) fn decode_escapes(text: &str) -> Option<String> {
    if !text.contains('\\') {
        return None;
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('\\') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let Some(esc) = after.chars().next() else {
            // Trailing backslash
            result.push('\\');
            rest = "";
            break;
        };
        let tail = &after[esc.len_utf8()..];

        let decoded = match esc {
            'x' => take_hex(tail, 2),
            'u' => take_braced_hex(tail).or_else(|| take_hex(tail, 4)),
            _ => resolve_simple_escape(esc).map(|c| (c, 0)),
        };

        match decoded {
            Some((c, consumed)) => {
                result.push(c);
                rest = &tail[consumed..];
            }
            None => {
                result.push('\\');
                result.push(esc);
                rest = tail;
            }
        }
    }
    result.push_str(rest);

    Some(result)
}

/// Decode escapes, returning an owned string either way.
pub(crate) fn decoded(text: &str) -> String {
    decode_escapes(text).unwrap_or_else(|| text.to_owned())
}

/// Extract every quoted substring from `text`, escape-decoded.
///
/// Quotes may be `'…'` or `"…"`; each pair uses the same character, so the
/// other kind may appear inside (`'"'` yields `"`). An unterminated quote is
/// ignored.
pub(crate) fn extract_quoted(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut open: Option<(char, usize)> = None;

    for (i, c) in text.char_indices() {
        match open {
            None if c == '"' || c == '\'' => open = Some((c, i + c.len_utf8())),
            Some((quote, start)) if c == quote => {
                found.push(decoded(&text[start..i]));
                open = None;
            }
            _ => {}
        }
    }

    found
}

#[cfg(test)]
mod tests;
