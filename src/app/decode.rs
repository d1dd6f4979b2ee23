/// Result of a permissive UTF-8 decode.
#[derive(Debug, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Number of invalid bytes dropped from the input.
    pub dropped: usize,
}

/// Decodes `bytes` as UTF-8, dropping invalid sequences instead of failing.
/// Line endings are normalized to `\n`.
pub fn decode_lossy(bytes: &[u8]) -> Decoded {
    let mut raw = String::with_capacity(bytes.len());
    let mut dropped = 0;

    for chunk in bytes.utf8_chunks() {
        raw.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }

    Decoded {
        text: normalize_newlines(raw),
        dropped,
    }
}

fn normalize_newlines(raw: String) -> String {
    if !raw.contains('\r') {
        return raw;
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}
