//! Text Normalizer — lowercases, tokenizes and filters raw document text.
//!
//! Output keeps only purely alphabetic, non-stopword tokens joined by single
//! spaces. Tokenization follows Unicode word boundaries (UAX #29) with a few
//! Treebank-style adjustments so that hyphen/slash compounds, `c++`-like
//! symbols, leading quotes and contractions behave like a conventional
//! English tokenizer.

use std::collections::HashSet;
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// Standard English stopword list (179 entries).
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Cleaned document text: lowercase alphabetic tokens, stopwords removed,
/// single-space separated. Only [`TextNormalizer`] can build one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the surviving tokens in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stateless normalizer holding the immutable stopword set.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: HashSet<String>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::with_stopwords(ENGLISH_STOPWORDS.iter().copied())
    }
}

impl TextNormalizer {
    pub fn with_stopwords<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            stopwords: words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Lowercase → tokenize → keep alphabetic non-stopwords → join with spaces.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let lowered = raw.to_lowercase();
        let mut kept: Vec<&str> = Vec::new();

        for chunk in lowered.split_whitespace() {
            for unit in word_units(chunk) {
                let token = strip_clitic(unit);
                if is_alphabetic_token(token) && !self.is_stopword(token) {
                    kept.push(token);
                }
            }
        }

        NormalizedText(kept.join(" "))
    }
}

/// Splits one whitespace-free chunk into word units.
///
/// A single `-` or `/` between two words keeps them in one unit
/// (`scikit-learn`, `python/sql`); a doubled one (`--`) separates.
/// Trailing `+`/`#` stay attached (`c++`), as does a leading apostrophe
/// (`'python`). Any other punctuation separates.
fn word_units(chunk: &str) -> Vec<&str> {
    let mut units = Vec::new();
    // Byte range of the unit being assembled.
    let mut current: Option<(usize, usize)> = None;
    // End of a `-`/`/` seen right after `current`, not yet confirmed by a word.
    let mut pending_link: Option<usize> = None;
    // Start of a leading apostrophe waiting for its word.
    let mut pending_quote: Option<usize> = None;

    for (offset, segment) in chunk.split_word_bound_indices() {
        let end = offset + segment.len();

        if segment.chars().any(char::is_alphanumeric) {
            match (current, pending_link.take()) {
                (Some((start, _)), Some(_)) => current = Some((start, end)),
                (Some(_), None) => {
                    flush(chunk, &mut units, &mut current, None);
                    current = Some((offset, end));
                }
                (None, _) => current = Some((pending_quote.unwrap_or(offset), end)),
            }
            pending_quote = None;
            continue;
        }

        pending_quote = None;
        match segment {
            "-" | "/" if current.is_some() && pending_link.is_none() => {
                pending_link = Some(end);
            }
            "-" | "/" => {
                pending_link = None;
                flush(chunk, &mut units, &mut current, None);
            }
            "+" | "#" if current.is_some() && pending_link.is_none() => {
                current = current.map(|(start, _)| (start, end));
            }
            "'" | "\u{2019}" if current.is_none() => pending_quote = Some(offset),
            _ => {
                let link = pending_link.take();
                flush(chunk, &mut units, &mut current, link);
            }
        }
    }

    let link = pending_link.take();
    flush(chunk, &mut units, &mut current, link);
    units
}

/// Emits the unit in progress, extended over a dangling link when given.
fn flush<'a>(
    chunk: &'a str,
    units: &mut Vec<&'a str>,
    current: &mut Option<(usize, usize)>,
    link_end: Option<usize>,
) {
    if let Some((start, end)) = current.take() {
        units.push(&chunk[start..link_end.unwrap_or(end)]);
    }
}

/// Drops an English clitic: `don't` → `do`, `candidate's` → `candidate`.
/// The clitic itself is never alphabetic, so only the stem matters.
fn strip_clitic(unit: &str) -> &str {
    if let Some(stem) = unit.strip_suffix("n't").or_else(|| unit.strip_suffix("n\u{2019}t")) {
        if !stem.is_empty() {
            return stem;
        }
    }
    match unit.find(['\'', '\u{2019}']) {
        Some(pos) if pos > 0 => &unit[..pos],
        _ => unit,
    }
}

fn is_alphabetic_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
