//! Sentence-unit boundary scanning

/// Byte length of the shortest complete sentence unit at the start of
/// `buffer`, terminator included.
///
/// A unit ends with `.`, `!`, or `?` followed by one whitespace character
/// (included in the unit) or the end of the available text, or with a
/// newline. A terminator at the exact end of the buffer matches eagerly even
/// though later fragments could extend it; committed text is never revisited.
/// Returns `None` when the available text does not yet contain a boundary.
pub(crate) fn unit_prefix_len(buffer: &str) -> Option<usize> {
    let mut chars = buffer.char_indices().peekable();
    while let Some((pos, ch)) = chars.next() {
        if ch == '\n' {
            return Some(pos + 1);
        }
        if matches!(ch, '.' | '!' | '?') {
            match chars.peek() {
                None => return Some(buffer.len()),
                Some(&(next_pos, next)) if next.is_whitespace() => {
                    return Some(next_pos + next.len_utf8());
                }
                Some(_) => {}
            }
        }
    }
    None
}
