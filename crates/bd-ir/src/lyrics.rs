//! Lyric entries keyed to the melody cursor.

/// A word or phrase shown while the melody is at or past `trigger`.
///
/// Tables are expected in non-decreasing `trigger` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LyricEntry<'a> {
    /// Text token to display
    pub text: &'a str,
    /// Melody note index at which this entry becomes current
    pub trigger: u16,
}

impl<'a> LyricEntry<'a> {
    pub const fn new(text: &'a str, trigger: u16) -> Self {
        Self { text, trigger }
    }
}

/// Index of the entry with the greatest trigger `<= cursor`.
///
/// Returns `None` when the cursor has not reached the first entry yet.
pub fn lyric_at(entries: &[LyricEntry<'_>], cursor: usize) -> Option<usize> {
    let mut found = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.trigger as usize <= cursor {
            found = Some(i);
        } else {
            break;
        }
    }
    found
}

/// Split space-delimited text into entries, one per word. Word `i`
/// triggers at melody note `i`.
pub fn words(text: &str) -> impl Iterator<Item = LyricEntry<'_>> {
    text.split(' ')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, word)| LyricEntry::new(word, i.min(u16::MAX as usize) as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: [LyricEntry<'static>; 3] = [
        LyricEntry::new("a", 0),
        LyricEntry::new("b", 2),
        LyricEntry::new("c", 5),
    ];

    #[test]
    fn selects_greatest_trigger_not_after_cursor() {
        assert_eq!(lyric_at(&ABC, 3), Some(1));
        assert_eq!(lyric_at(&ABC, 0), Some(0));
        assert_eq!(lyric_at(&ABC, 2), Some(1));
        assert_eq!(lyric_at(&ABC, 5), Some(2));
        assert_eq!(lyric_at(&ABC, 10), Some(2));
    }

    #[test]
    fn nothing_before_first_trigger() {
        let late = [LyricEntry::new("x", 4)];
        assert_eq!(lyric_at(&late, 3), None);
        assert_eq!(lyric_at(&late, 4), Some(0));
        assert_eq!(lyric_at(&[], 7), None);
    }

    #[test]
    fn words_skip_repeated_spaces() {
        let mut it = words("  hello  big world ");
        assert_eq!(it.next(), Some(LyricEntry::new("hello", 0)));
        assert_eq!(it.next(), Some(LyricEntry::new("big", 1)));
        assert_eq!(it.next(), Some(LyricEntry::new("world", 2)));
        assert_eq!(it.next(), None);
    }
}
