//! Neutralization of user supplied text.
//!
//! Every text field of a contact submission passes through [`sanitize`] before
//! it is validated, rendered into an email or written to the audit log.

/// Trims surrounding whitespace, removes backslash escaping and encodes the
/// HTML special characters of `input`.
pub fn sanitize(input: &str) -> String {
    encode_html(&strip_slashes(input.trim()))
}

/// Removes one level of backslash escaping (`\'` becomes `'`, `\\` becomes `\`).
///
/// A trailing lone backslash is dropped.
pub fn strip_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Encodes `&`, `<`, `>`, `"` and `'` so the text renders literally in HTML.
pub fn encode_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}
