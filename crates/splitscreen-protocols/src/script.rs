//! Quoting for text interpolated into generated scripts.
//!
//! Window scripts and reminder notifications both embed user-controlled
//! names in AppleScript. They all go through [`escape_applescript`].

/// Escape `s` for use inside an AppleScript string literal.
///
/// Line breaks become spaces: a raw newline would end the `-e` statement.
pub fn escape_applescript(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}
