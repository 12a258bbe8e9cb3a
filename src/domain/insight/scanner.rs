//! Bracket-depth scanning over possibly-truncated JSON text.
//!
//! Scanning works on bytes. Every delimiter it cares about is ASCII and
//! UTF-8 continuation bytes never collide with ASCII, so byte offsets found
//! here are always valid `str` slice boundaries.

/// Outcome of scanning one array that starts at an opening `[`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySpan<'a> {
    /// Brackets balanced. Holds the full `[...]` text.
    Closed(&'a str),
    /// Input ended before the array closed.
    ///
    /// `complete_prefix` runs from the `[` up to, not including, the last
    /// top-level comma, so appending `]` yields the elements known to be
    /// complete. `None` when no element was followed by a comma.
    Truncated { complete_prefix: Option<&'a str> },
}

impl<'a> ArraySpan<'a> {
    /// Text that should parse as a JSON array, if any part survived.
    pub fn recoverable(&self) -> Option<String> {
        match self {
            ArraySpan::Closed(text) => Some((*text).to_string()),
            ArraySpan::Truncated {
                complete_prefix: Some(prefix),
            } => Some(format!("{prefix}]")),
            ArraySpan::Truncated {
                complete_prefix: None,
            } => None,
        }
    }
}

/// Scans the array whose `[` sits at byte offset `open`.
///
/// Depth counts both `[`/`{` against `]`/`}` and ignores anything inside
/// string literals, honoring backslash escapes.
pub fn scan_array(text: &str, open: usize) -> ArraySpan<'_> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;
    let mut last_separator = None;

    for (offset, &byte) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escape_next {
                escape_next = false;
            } else if byte == b'\\' {
                escape_next = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return ArraySpan::Closed(&text[open..=offset]);
                }
            }
            b',' if depth == 1 => last_separator = Some(offset),
            _ => {}
        }
    }

    ArraySpan::Truncated {
        complete_prefix: last_separator.map(|end| &text[open..end]),
    }
}

/// Byte offsets of every `[` that opens the value of `"name":` in `text`.
///
/// Whitespace is allowed around the colon. Occurrences whose value is not
/// an array are skipped.
pub fn field_array_starts<'a>(text: &'a str, name: &str) -> impl Iterator<Item = usize> + 'a {
    let needle = format!("\"{name}\"");
    let mut cursor = 0usize;

    std::iter::from_fn(move || {
        while let Some(found) = text.get(cursor..).and_then(|rest| rest.find(&needle)) {
            let after_key = cursor + found + needle.len();
            cursor = after_key;

            let rest = &text[after_key..];
            let Some(colon_rest) = rest.trim_start().strip_prefix(':') else {
                continue;
            };
            let value = colon_rest.trim_start();
            if value.starts_with('[') {
                return Some(text.len() - value.len());
            }
        }
        None
    })
}

/// Longest prefix of `text` no longer than `max_bytes`, cut on a char
/// boundary.
pub fn bounded(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
