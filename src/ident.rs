//! Utility functions for working with Go identifiers.

/// Converts a Protobuf name into an exported Go identifier.
///
/// Words are delimited by `_` or by an upper case letter; the first letter of every word is upper
/// cased and the `_` before a lower case letter is dropped. A `.` separating nested type names
/// becomes `_`, and a leading `_` becomes `X` so that the result is always exported. Digits are
/// words of their own.
pub fn to_go_camel(s: &str) -> String {
    let src = s.as_bytes();
    let len = src.len();
    let is_lower_at = |i: usize| i < len && src[i].is_ascii_lowercase();

    let mut dst = Vec::with_capacity(len);
    let mut i = 0;
    while i < len {
        let c = src[i];
        match c {
            b'.' if is_lower_at(i + 1) => {}
            b'.' => dst.push(b'_'),
            b'_' if i == 0 || src[i - 1] == b'.' => dst.push(b'X'),
            b'_' if is_lower_at(i + 1) => {}
            c if c.is_ascii_digit() => dst.push(c),
            c => {
                dst.push(c.to_ascii_uppercase());
                // Keep the lower case run that completes the word.
                while is_lower_at(i + 1) {
                    i += 1;
                    dst.push(src[i]);
                }
            }
        }
        i += 1;
    }

    // Only ASCII bytes are ever rewritten, so multi-byte sequences survive intact.
    String::from_utf8_lossy(&dst).into_owned()
}

/// Derives the JSON name protoc assigns to a field: underscores are removed and the character
/// following each underscore is upper cased.
pub fn to_json_name(field_name: &str) -> String {
    let mut json_name = String::with_capacity(field_name.len());
    let mut capitalize_next = false;
    for c in field_name.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            json_name.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            json_name.push(c);
        }
    }
    json_name
}

/// Sanitizes an arbitrary string into a valid Go identifier.
///
/// Every character that is not a letter or digit becomes `_`. A leading `_` is added when the
/// result would not start with a letter or would collide with a Go keyword.
pub fn to_go_sanitized(s: &str) -> String {
    let ident: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();

    match ident.chars().next() {
        Some(first) if first.is_alphabetic() && !is_go_keyword(&ident) => ident,
        _ => format!("_{}", ident),
    }
}

fn is_go_keyword(ident: &str) -> bool {
    matches!(
        ident,
        "break"
            | "case"
            | "chan"
            | "const"
            | "continue"
            | "default"
            | "defer"
            | "else"
            | "fallthrough"
            | "for"
            | "func"
            | "go"
            | "goto"
            | "if"
            | "import"
            | "interface"
            | "map"
            | "package"
            | "range"
            | "return"
            | "select"
            | "struct"
            | "switch"
            | "type"
            | "var"
    )
}
