//! Word accumulator driven by grammar actions

/// Collects pushed text until it is flushed as one word.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Accumulator {
    acc: String,
    words: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator::default()
    }

    /// Append `text` to the word being built.
    pub fn push(&mut self, text: &str) {
        self.acc.push_str(text);
    }

    /// Commit the word being built, even if empty, and start a new one.
    pub fn flush(&mut self) {
        self.words.push(std::mem::take(&mut self.acc));
    }

    /// The word being built.
    pub fn current(&self) -> &str {
        &self.acc
    }

    /// Committed words, in flush order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    pub fn clear(&mut self) {
        self.acc.clear();
        self.words.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_commits_concatenation() {
        let mut acc = Accumulator::new();
        acc.push("A");
        acc.push("B");
        assert_eq!(acc.current(), "AB");
        acc.flush();
        assert_eq!(acc.words(), ["AB"]);
        assert_eq!(acc.current(), "");
    }

    #[test]
    fn flush_empty_commits_empty_word() {
        let mut acc = Accumulator::new();
        acc.flush();
        acc.push("x");
        acc.flush();
        acc.flush();
        assert_eq!(acc.into_words(), vec!["", "x", ""]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut acc = Accumulator::new();
        acc.push("left");
        acc.flush();
        acc.push("over");
        acc.clear();
        assert_eq!(acc, Accumulator::default());
    }
}
