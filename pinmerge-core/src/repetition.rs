//! Repetition filter for dirty training text

use std::collections::HashMap;

/// Default n-gram window in characters
pub const DEFAULT_WINDOW: usize = 2;

/// Default number of occurrences tolerated per pattern
pub const DEFAULT_TOLERANCE: usize = 10;

/// Whether any `length`-character pattern occurs more than `tolerance` times.
///
/// Windows overlap and are counted over characters. A window length of zero
/// or longer than the text yields no windows.
pub fn repetition_found(text: &str, length: usize, tolerance: usize) -> bool {
    if length == 0 {
        return false;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut counts: HashMap<&[char], usize> = HashMap::new();

    for window in chars.windows(length) {
        let count = counts.entry(window).or_insert(0);
        *count += 1;
        if *count > tolerance {
            return true;
        }
    }

    false
}

/// Repetition gate with fixed parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepetitionFilter {
    /// Window length in characters
    pub window: usize,
    /// Occurrences tolerated per pattern
    pub tolerance: usize,
}

impl Default for RepetitionFilter {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl RepetitionFilter {
    /// Create a filter
    pub fn new(window: usize, tolerance: usize) -> Self {
        Self { window, tolerance }
    }

    /// Whether `text` repeats too much
    pub fn is_repetitive(&self, text: &str) -> bool {
        repetition_found(text, self.window, self.tolerance)
    }

    /// Whether `text` passes the gate
    pub fn accepts(&self, text: &str) -> bool {
        !self.is_repetitive(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_pattern_over_tolerance() {
        assert!(repetition_found("ababab", 2, 2));
    }

    #[test]
    fn test_distinct_patterns() {
        assert!(!repetition_found("abcdef", 2, 2));
    }

    #[test]
    fn test_at_tolerance_is_accepted() {
        // "ab" occurs exactly twice
        assert!(!repetition_found("abab", 2, 2));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(repetition_found("哈哈哈哈", 1, 3));
        assert!(!repetition_found("哈哈哈", 1, 3));
    }

    #[test]
    fn test_degenerate_windows() {
        assert!(!repetition_found("aaaa", 0, 0));
        assert!(!repetition_found("ab", 3, 0));
        assert!(!repetition_found("", 2, 0));
    }

    #[test]
    fn test_filter_defaults() {
        let filter = RepetitionFilter::default();
        assert_eq!(filter.window, 2);
        assert_eq!(filter.tolerance, 10);
        assert!(filter.accepts("今天天气很好"));
        assert!(filter.is_repetitive(&"好的".repeat(12)));
    }
}
