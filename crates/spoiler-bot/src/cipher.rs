//! ROT13 text transform.

/// Rotate every ASCII letter 13 places within its case's alphabet. All other
/// characters pass through unchanged, so applying the transform twice
/// returns the original text.
pub fn rot13(text: &str) -> String {
    text.chars().map(rot13_char).collect()
}

fn rot13_char(c: char) -> char {
    match c {
        'a'..='z' => ((c as u8 - b'a' + 13) % 26 + b'a') as char,
        'A'..='Z' => ((c as u8 - b'A' + 13) % 26 + b'A') as char,
        _ => c,
    }
}
