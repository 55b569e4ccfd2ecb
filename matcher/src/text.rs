use std::borrow::Cow;

pub const DEFAULT_TRUNCATE_LEN: usize = 150;
pub const TRUNCATION_MARKER: &str = "...";

/// Shorten `text` to at most `length` characters for display, appending
/// [`TRUNCATION_MARKER`] when anything was cut. Lengths count chars, not bytes.
pub fn truncate(text: &str, length: usize) -> Cow<'_, str> {
    match text.char_indices().nth(length) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
            out.push_str(&text[..cut]);
            out.push_str(TRUNCATION_MARKER);
            Cow::Owned(out)
        }
    }
}
