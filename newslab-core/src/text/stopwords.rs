//! Shared English stop-word list.

use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Process-wide stop-word set, built once on first use and shared read-only
/// after that.
pub fn stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| WORDS.iter().copied().collect())
}

/// Expects an already-lowercased word.
pub fn is_stop_word(word: &str) -> bool {
    stop_words().contains(word)
}

#[rustfmt::skip]
const WORDS: &[&str] = &[
    // Articles
    "a", "an", "the",
    // Pronouns
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those",
    // Verbs
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "would", "should", "could", "ought", "might", "must",
    "shall", "will", "can", "may",
    // Prepositions
    "at", "by", "for", "from", "in", "into", "of", "on", "to", "with", "about", "against",
    "between", "during", "before", "after", "above", "below", "up", "down", "out", "off",
    "over", "under", "again", "further", "then", "once",
    // Conjunctions
    "and", "but", "or", "nor", "so", "yet", "both", "either", "neither", "not", "only",
    "than", "when", "where", "while", "if", "because", "as", "until", "although",
    // Other common words
    "here", "there", "all", "each", "few", "more", "most", "other", "some", "such", "no",
    "any", "own", "same", "too", "very", "just", "also", "now", "how", "why", "well",
];
