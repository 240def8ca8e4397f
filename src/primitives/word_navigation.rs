//! Word boundary helpers for single lines of source text
//!
//! Columns are byte offsets into the line, like the columns rc reports. Only ASCII
//! identifier bytes count as word characters, so every boundary returned here is
//! also a char boundary.

/// Check if a byte is part of a C/C++ identifier
pub fn is_word_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Find the start of the word that ends right before `column`.
///
/// Returns `column` itself when the byte before it is not a word character.
pub fn find_word_start(line: &str, column: usize) -> usize {
    let bytes = line.as_bytes();
    let mut start = column.min(bytes.len());
    while start > 0 && is_word_char(bytes[start - 1]) {
        start -= 1;
    }
    start
}

/// Find the end (exclusive) of the word starting at or containing `column`.
pub fn find_word_end(line: &str, column: usize) -> usize {
    let bytes = line.as_bytes();
    let mut end = column.min(bytes.len());
    while end < bytes.len() && is_word_char(bytes[end]) {
        end += 1;
    }
    end
}

/// Byte range of the word under `column`, if the cursor sits on a word character.
pub fn word_range_at(line: &str, column: usize) -> Option<std::ops::Range<usize>> {
    let bytes = line.as_bytes();
    if column >= bytes.len() || !is_word_char(bytes[column]) {
        return None;
    }
    Some(find_word_start(line, column)..find_word_end(line, column))
}
