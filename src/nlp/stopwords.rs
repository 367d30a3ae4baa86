//! Stopword filtering
//!
//! Multi-language stopword filtering using the `stop-words` crate, with a
//! built-in Indonesian list and support for custom additions.

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

/// A filter for removing stopwords from a token stream
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::new("en")
    }
}

impl StopwordFilter {
    /// Create a stopword filter for the given language.
    ///
    /// Supported codes: en, id, de, fr, es, it, pt, nl, ru. Unknown codes
    /// fall back to English.
    pub fn new(language: &str) -> Self {
        Self {
            stopwords: Self::load_stopwords(language),
        }
    }

    /// Create an empty stopword filter (no filtering).
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add additional stopwords to the filter.
    pub fn add_stopwords(&mut self, words: &[&str]) {
        for word in words {
            self.stopwords.insert(word.to_lowercase());
        }
    }

    /// Check if a word is a stopword. Expects lowercase input (the tokenizer
    /// lowercases everything upstream).
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Number of stopwords in the filter.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Whether the filter is empty.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_stopwords(language: &str) -> FxHashSet<String> {
        let lang = match language.to_lowercase().as_str() {
            "en" | "english" => LANGUAGE::English,
            "de" | "german" => LANGUAGE::German,
            "fr" | "french" => LANGUAGE::French,
            "es" | "spanish" => LANGUAGE::Spanish,
            "it" | "italian" => LANGUAGE::Italian,
            "pt" | "portuguese" => LANGUAGE::Portuguese,
            "nl" | "dutch" => LANGUAGE::Dutch,
            "ru" | "russian" => LANGUAGE::Russian,
            "id" | "indonesian" => {
                // The review corpus language; ship our own list so the
                // negation words sentiment depends on stay out of it.
                return Self::indonesian_stopwords();
            }
            _ => LANGUAGE::English,
        };

        get(lang).iter().map(|s| s.to_string()).collect()
    }

    /// Common Indonesian stopwords.
    ///
    /// Function words, pronouns, particles, and intensifiers. Negations
    /// (tidak, bukan, jangan, belum) are deliberately absent: they carry
    /// sentiment.
    fn indonesian_stopwords() -> FxHashSet<String> {
        [
            "yang", "dan", "di", "ke", "dari", "ini", "itu", "dengan", "untuk", "pada", "adalah",
            "saya", "aku", "kamu", "anda", "dia", "kami", "kita", "mereka", "ada", "akan", "sudah",
            "udah", "telah", "masih", "juga", "atau", "tapi", "tetapi", "karena", "jadi", "kalau",
            "kalo", "jika", "bisa", "dapat", "harus", "saat", "ketika", "waktu", "lagi", "sangat",
            "sekali", "banget", "saja", "aja", "hanya", "cuma", "lebih", "paling", "agar", "supaya",
            "oleh", "dalam", "luar", "atas", "bawah", "antara", "setelah", "sebelum", "sejak",
            "hingga", "sampai", "para", "pun", "lah", "kah", "nya", "ya", "sih", "deh", "dong",
            "kok", "kan", "gitu", "gini", "begitu", "begini", "apa", "siapa", "mana", "dimana",
            "kemana", "kapan", "bagaimana", "gimana", "kenapa", "mengapa", "berapa", "semua",
            "setiap", "sendiri", "tersebut", "yaitu", "yakni", "ialah", "merupakan", "terhadap",
            "tentang", "seperti", "sebagai", "secara", "bahwa", "namun", "serta", "maupun",
            "sedangkan", "melainkan", "meski", "meskipun", "walaupun", "walau", "agak", "memang",
            "mungkin", "biar", "malah", "terus", "trus", "nih", "tuh", "eh", "oh", "wah",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new("en");

        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("is"));
        assert!(!filter.is_stopword("shipping"));
    }

    #[test]
    fn test_indonesian_stopwords() {
        let filter = StopwordFilter::new("id");

        assert!(filter.is_stopword("yang"));
        assert!(filter.is_stopword("sangat"));
        assert!(filter.is_stopword("sekali"));
        assert!(filter.is_stopword("saja"));
        assert!(!filter.is_stopword("pengiriman"));
        assert!(!filter.is_stopword("lama"));
    }

    #[test]
    fn test_negations_are_not_stopwords() {
        let filter = StopwordFilter::new("id");

        assert!(!filter.is_stopword("tidak"));
        assert!(!filter.is_stopword("bukan"));
        assert!(!filter.is_stopword("jangan"));
    }

    #[test]
    fn test_custom_stopwords() {
        let mut filter = StopwordFilter::from_list(&["custom", "words"]);

        assert!(filter.is_stopword("custom"));
        assert!(!filter.is_stopword("yang"));

        filter.add_stopwords(&["extra"]);
        assert!(filter.is_stopword("extra"));
    }

    #[test]
    fn test_empty_filter() {
        let filter = StopwordFilter::empty();

        assert!(!filter.is_stopword("the"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let filter = StopwordFilter::new("xx");
        assert!(filter.is_stopword("the"));
    }
}
