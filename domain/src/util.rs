//! Shared utility functions.

use std::borrow::Cow;

/// Shorten text for log lines to at most `max_chars` characters.
///
/// Cuts on a character boundary and appends `...` when something was
/// dropped. Short input is borrowed unchanged.
pub fn preview(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        None => Cow::Borrowed(s),
        Some((end, _)) => Cow::Owned(format!("{}...", &s[..end])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_ascii() {
        assert_eq!(preview("apa itu tawaf", 7), "apa itu...");
    }

    #[test]
    fn preview_no_op_when_short() {
        assert!(matches!(preview("niat", 10), Cow::Borrowed("niat")));
        assert_eq!(preview("niat", 4), "niat");
    }

    #[test]
    fn preview_multibyte_boundary() {
        // Each Arabic letter is two bytes in UTF-8
        assert_eq!(preview("لبيك", 2), "لب...");
    }

    #[test]
    fn preview_empty() {
        assert_eq!(preview("", 10), "");
    }
}
