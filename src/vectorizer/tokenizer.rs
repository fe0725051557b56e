/// Splits document text into terms
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Default word tokenizer.
/// Lowercases the text and keeps runs of alphanumeric characters or `_`
/// that are at least `MIN_TOKEN_LEN` characters long.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub const MIN_TOKEN_LEN: usize = 2;

    #[inline]
    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !Self::is_word_char(c))
            .filter(|word| word.chars().count() >= Self::MIN_TOKEN_LEN)
            .map(|word| word.to_lowercase())
            .collect()
    }
}
