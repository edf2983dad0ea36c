//! Headline cleaning and tokenization.

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::text::stopwords::is_stop_word;

const MIN_TOKEN_LEN: usize = 2;
const MAX_TOKEN_LEN: usize = 50;

/// Splits headlines into lowercase analysis tokens.
///
/// All regexes are compiled once at construction; build a single tokenizer
/// and reuse it across every headline in the run.
#[derive(Debug)]
pub struct Tokenizer {
    url: Regex,
    email: Regex,
    html: Regex,
    punct: Regex,
    number: Regex,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            url: Regex::new(r"https?://\S+").expect("static regex"),
            email: Regex::new(r"\S+@\S+\.\S+").expect("static regex"),
            html: Regex::new(r"<[^>]+>").expect("static regex"),
            punct: Regex::new(r"[^\w\s]").expect("static regex"),
            number: Regex::new(r"\b\d+\b").expect("static regex"),
        }
    }

    /// Strips markup, URLs and standalone numbers, then lowercases.
    pub fn clean(&self, text: &str) -> String {
        let cleaned = self.url.replace_all(text, " ");
        let cleaned = self.email.replace_all(&cleaned, " ");
        let cleaned = self.html.replace_all(&cleaned, " ");
        let cleaned = self.punct.replace_all(&cleaned, " ");
        let cleaned = self.number.replace_all(&cleaned, " ");
        cleaned.to_lowercase()
    }

    /// Cleans, splits on word boundaries, drops stop words and
    /// out-of-bounds tokens, and normalizes simple plurals.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .unicode_words()
            .filter(|w| w.len() >= MIN_TOKEN_LEN && w.len() <= MAX_TOKEN_LEN)
            .filter(|w| !is_stop_word(w))
            .map(normalize_token)
            .filter(|w| w.len() >= MIN_TOKEN_LEN && !is_stop_word(w))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Crude plural stripping. Not a stemmer, just enough to fold
/// "shares"/"share" and "companies"/"company" together.
fn normalize_token(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        // Leave words like "business", "analysis" and short roots alone.
        if stem.len() >= 3 && !stem.ends_with('s') && !stem.ends_with('i') && !stem.ends_with('u')
        {
            return stem.to_string();
        }
    }
    word.to_string()
}

/// Adjacent-pair n-grams, joined with underscores.
pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens.windows(2).map(|pair| pair.join("_")).collect()
}
