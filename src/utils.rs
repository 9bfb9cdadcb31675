//! Shared helpers for working with text as `char` slices.
//!
//! All positions in this crate count Unicode scalar values, so the text and
//! input buffers are handled as `Vec<char>` rather than byte-indexed `str`.

/// Length of the longest common prefix of `a` and `b`.
///
/// # Example
///
/// ```
/// use typing_log::utils::common_prefix_len;
///
/// let a: Vec<char> = "hello".chars().collect();
/// let b: Vec<char> = "help".chars().collect();
/// assert_eq!(common_prefix_len(&a, &b), 3);
/// ```
pub fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the longest common suffix of `a` and `b`.
pub fn common_suffix_len(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Number of leading chars of `input` that match `text` starting at `offset`.
///
/// Stops at the first mismatch or when either side runs out.
pub fn matching_prefix_len(text: &[char], offset: usize, input: &[char]) -> usize {
    match text.get(offset..) {
        Some(rest) => common_prefix_len(rest, input),
        None => 0,
    }
}

/// Collects a string into a char vector.
pub fn to_chars(s: &str) -> Vec<char> {
    s.chars().collect()
}
