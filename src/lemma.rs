//! Lemma extraction for keyword-overlap matching.
//!
//! Real lemmatization is an external NLP capability; this module defines
//! the [`Lemmatizer`] seam and ships a best-effort default that is good
//! enough for set-intersection relevance: case folding, diacritic
//! stripping, stop-word and punctuation exclusion, and light Portuguese
//! plural normalization. No ranking and no similarity scores — the
//! matcher only ever asks whether two lemma sets intersect.

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Produces the normalized content-token set of a text.
pub trait Lemmatizer: Send + Sync {
    /// Lemma set of `text`: lowercased, punctuation-free, stop-words
    /// removed. An empty text yields an empty set.
    fn lemmas(&self, text: &str) -> BTreeSet<String>;
}

/// Portuguese stop words, already diacritic-folded.
const STOP_WORDS: &[&str] = &[
    "a", "o", "e", "de", "do", "da", "dos", "das", "em", "um", "uma", "uns", "umas", "para",
    "com", "nao", "os", "as", "no", "na", "nos", "nas", "se", "por", "mais", "mas", "ao", "aos",
    "ele", "ela", "eles", "elas", "seu", "sua", "seus", "suas", "ou", "ser", "quando", "muito",
    "ha", "ja", "esta", "estao", "eu", "tambem", "so", "pelo", "pela", "pelos", "pelas", "ate",
    "isso", "isto", "entre", "era", "eram", "depois", "sem", "mesmo", "ter", "tem", "tinha",
    "foi", "foram", "quem", "me", "esse", "essa", "esses", "essas", "este", "estes", "deste",
    "desta", "num", "numa", "nem", "meu", "minha", "lhe", "dele", "dela", "deles", "delas",
    "havia", "seja", "qual", "sera", "tenho", "fosse", "como", "que", "sobre",
];

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("static word regex"))
}

/// Default [`Lemmatizer`]: folding plus suffix normalization.
pub struct FoldingLemmatizer {
    stop_words: HashSet<&'static str>,
}

impl FoldingLemmatizer {
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }
}

impl Default for FoldingLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FoldingLemmatizer {
    /// Number of content tokens in `text`: punctuation and stop words
    /// excluded, duplicates kept. Used for "relevant words" counts in
    /// screening output, where the set semantics of [`Lemmatizer::lemmas`]
    /// would undercount.
    pub fn content_word_count(&self, text: &str) -> usize {
        let folded = fold(text);
        word_regex()
            .find_iter(&folded)
            .map(|m| normalize_plural(m.as_str()))
            .filter(|token| !self.stop_words.contains(token.as_str()))
            .count()
    }
}

impl Lemmatizer for FoldingLemmatizer {
    fn lemmas(&self, text: &str) -> BTreeSet<String> {
        let folded = fold(text);
        word_regex()
            .find_iter(&folded)
            .map(|m| normalize_plural(m.as_str()))
            .filter(|token| !self.stop_words.contains(token.as_str()))
            .collect()
    }
}

/// Lowercase and strip combining marks (NFD decomposition).
fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Light Portuguese plural normalization on an already-folded token:
/// `-oes` collapses to `-ao` (obrigacoes -> obrigacao) and a trailing
/// `s` is dropped from longer words (contratos -> contrato).
fn normalize_plural(token: &str) -> String {
    if token.len() > 5 {
        if let Some(stem) = token.strip_suffix("oes") {
            return format!("{}ao", stem);
        }
    }
    if token.len() > 3 {
        if let Some(stem) = token.strip_suffix('s') {
            return stem.to_string();
        }
    }
    token.to_string()
}
