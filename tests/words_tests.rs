//! Tests for the word tokenizer.
//!
//! The rule: a word starts with a letter and continues through letters,
//! combining marks, dash punctuation and apostrophes; counting scans left
//! to right over the whole string.

use wordtoast::count_words;

// === Basic counting ===

#[test]
fn two_plain_words() {
    assert_eq!(count_words("hello world"), 2);
}

#[test]
fn empty_input_is_zero() {
    assert_eq!(count_words(""), 0);
}

#[test]
fn whitespace_only_is_zero() {
    assert_eq!(count_words(" \t \r\n  "), 0);
}

#[test]
fn punctuation_only_is_zero() {
    assert_eq!(count_words("... --- !!! ??? ()[]{}"), 0);
}

#[test]
fn digits_alone_are_not_words() {
    assert_eq!(count_words("2025 12 7"), 0);
}

// === Continuation characters ===

#[test]
fn straight_apostrophe_joins() {
    assert_eq!(count_words("don't stop"), 2);
}

#[test]
fn curly_apostrophe_joins() {
    assert_eq!(count_words("don’t"), 1);
}

#[test]
fn hyphenated_compound_is_one_word() {
    assert_eq!(count_words("a-b"), 1);
    assert_eq!(count_words("well-known fact"), 2);
}

#[test]
fn en_dash_is_dash_punctuation_too() {
    // U+2013 is in \p{Pd}, so it continues a word just like '-'
    assert_eq!(count_words("pages 4\u{2013}7 follow"), 2);
}

// === Unicode letters ===

#[test]
fn precomposed_accents() {
    assert_eq!(count_words("naïve café"), 2);
}

#[test]
fn decomposed_combining_marks() {
    // "café" with a combining acute accent instead of the precomposed é
    assert_eq!(count_words("cafe\u{0301} au lait"), 3);
}

#[test]
fn non_latin_scripts() {
    assert_eq!(count_words("привет мир"), 2);
    assert_eq!(count_words("καλημέρα"), 1);
}

// === Whitespace invariance ===

#[test]
fn leading_and_trailing_whitespace_ignored() {
    let bare = count_words("one two three");
    assert_eq!(count_words("   one two three   "), bare);
    assert_eq!(count_words("\none two three\t"), bare);
}

#[test]
fn repeated_internal_whitespace_ignored() {
    assert_eq!(count_words("one     two\t\tthree"), 3);
    assert_eq!(count_words("one two three"), 3);
}

// === Mixed content ===

#[test]
fn words_between_punctuation_and_digits() {
    assert_eq!(count_words("The 3 quick (brown) foxes!"), 4);
}

#[test]
fn sentence_from_the_clipboard() {
    assert_eq!(count_words("The quick brown fox"), 4);
}
