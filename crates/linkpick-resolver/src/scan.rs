//! Balanced-object scanning over JS object literals embedded in HTML.
//!
//! Script-state assignments like `window.__MSS__.product.state = {…}` cannot
//! be delimited with a regex: the object nests braces and may hold the
//! literal `}` inside string values. The scanner walks the text character by
//! character with an explicit string/escape state machine and a depth
//! counter, stopping at the brace that returns the depth to zero.

/// Scanner state. The `char` is the active quote (`'` or `"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString(char),
    InEscape(char),
}

/// Extract the minimal balanced `{…}` object literal from the start of `s`.
///
/// Braces inside single- or double-quoted strings are ignored, and a
/// backslash suppresses quote handling for the following character. Returns
/// `None` if `s` does not start with `{` or the object never closes.
pub(crate) fn extract_balanced_object(s: &str) -> Option<&str> {
    if !s.starts_with('{') {
        return None;
    }
    let mut state = ScanState::Normal;
    let mut depth: i32 = 0;
    for (i, c) in s.char_indices() {
        match state {
            ScanState::InEscape(quote) => state = ScanState::InString(quote),
            ScanState::InString(quote) => match c {
                '\\' => state = ScanState::InEscape(quote),
                _ if c == quote => state = ScanState::Normal,
                _ => {}
            },
            ScanState::Normal => match c {
                '"' | '\'' => state = ScanState::InString(c),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&s[..=i]);
                    }
                }
                _ => {}
            },
        }
    }
    None
}

/// Parse an extracted object literal, strict JSON first.
///
/// Pages sometimes emit JS object-literal syntax (bare keys, single-quoted
/// strings, trailing commas) rather than strict JSON. When strict parsing
/// fails, the literal is rewritten into strict JSON character by character
/// and parsed again. The fallback never evaluates the fetched content.
///
/// # Errors
///
/// Returns the strict-parse error when both passes fail.
pub(crate) fn parse_object_literal(literal: &str) -> Result<serde_json::Value, serde_json::Error> {
    match serde_json::from_str(literal) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            let relaxed = normalize_loose_json(literal);
            serde_json::from_str(&relaxed).map_err(|_| strict_err)
        }
    }
}

/// Rewrite a JS-flavored object literal into strict JSON: quote bare keys,
/// convert single-quoted strings to double-quoted, drop trailing commas.
fn normalize_loose_json(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' => {
                let quote = c;
                out.push('"');
                i += 1;
                while i < chars.len() {
                    let ch = chars[i];
                    if ch == '\\' && i + 1 < chars.len() {
                        let next = chars[i + 1];
                        if quote == '\'' && next == '\'' {
                            // \' has no meaning inside a JSON string
                            out.push('\'');
                        } else {
                            out.push('\\');
                            out.push(next);
                        }
                        i += 2;
                        continue;
                    }
                    if ch == quote {
                        i += 1;
                        break;
                    }
                    if ch == '"' {
                        out.push('\\');
                    }
                    out.push(ch);
                    i += 1;
                }
                out.push('"');
            }
            ',' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                // trailing comma before a closer is dropped
                if j >= chars.len() || chars[j] == '}' || chars[j] == ']' {
                    i += 1;
                } else {
                    out.push(',');
                    i += 1;
                }
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                let mut j = i;
                while j < chars.len() && chars[j].is_whitespace() {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ':' {
                    // bare object key
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    // keyword or other bare word (true/false/null)
                    out.push_str(&ident);
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
