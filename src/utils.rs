

/// Length in characters, which is what every length rule in this crate counts.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
