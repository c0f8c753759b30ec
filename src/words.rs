//! Word counting over arbitrary copied text.

use once_cell::sync::Lazy;
use regex::Regex;

/// A word starts with a letter and continues through letters, combining
/// marks, dash punctuation and apostrophes. Full Unicode categories, so
/// "naïve", "don’t" and "well-known" each count once regardless of script.
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}[\p{L}\p{Mn}\p{Pd}'’]*").expect("word pattern is valid"));

/// Count the words in `text`. Empty or letterless input yields 0.
pub fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_english() {
        assert_eq!(count_words("hello world"), 2);
    }

    #[test]
    fn apostrophes_and_dashes_stay_inside_a_word() {
        assert_eq!(count_words("don't stop"), 2);
        assert_eq!(count_words("don’t"), 1);
        assert_eq!(count_words("a-b"), 1);
    }

    #[test]
    fn accents_count_once() {
        assert_eq!(count_words("naïve café"), 2);
        // decomposed form: 'e' + combining acute
        assert_eq!(count_words("cafe\u{0301}"), 1);
    }

    #[test]
    fn no_letters_no_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \t\r\n"), 0);
        assert_eq!(count_words("... !!! 123 ---"), 0);
    }
}
