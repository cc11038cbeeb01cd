//! Comment stripping
//!
//! Removes `/* ... */` spans from stylesheet text while leaving quoted
//! strings alone, so `content: "/* not a comment */"` survives intact.

/// Quote state while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Strip all block comments that appear outside string literals.
///
/// An unterminated comment swallows the rest of the input.
pub fn strip_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut quote = Quote::None;
    let mut in_comment = false;

    while let Some(c) = chars.next() {
        if in_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_comment = false;
            }
            continue;
        }

        match (quote, c) {
            (Quote::None, '\'') => quote = Quote::Single,
            (Quote::None, '"') => quote = Quote::Double,
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::None, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                in_comment = true;
                continue;
            }
            _ => {}
        }

        output.push(c);
    }

    output
}
