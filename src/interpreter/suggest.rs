//! Autocomplete over a fixed command vocabulary.

/// Vocabulary entries whose name starts with `input`, ignoring case.
///
/// Vocabulary order is preserved. Empty input yields no suggestions.
pub fn filter_vocabulary(vocabulary: &[&str], input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }

    let needle = input.to_lowercase();
    vocabulary
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&needle))
        .map(|name| name.to_string())
        .collect()
}

/// Suggestion panel state: the filtered candidates plus the highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    items: Vec<String>,
    highlighted: Option<usize>,
    dismissed: bool,
}

impl Suggestions {
    /// Recompute from the current buffer. Clears the highlight.
    pub fn refresh(&mut self, vocabulary: &[&str], input: &str) {
        self.items = filter_vocabulary(vocabulary, input);
        self.highlighted = None;
        self.dismissed = false;
    }

    /// The panel is shown when there is something to show and it was not dismissed.
    pub fn is_visible(&self) -> bool {
        !self.dismissed && !self.items.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_item(&self) -> Option<&str> {
        self.highlighted
            .and_then(|idx| self.items.get(idx))
            .map(String::as_str)
    }

    /// Highlighted item, or the first one when nothing is highlighted.
    pub fn accept_target(&self) -> Option<&str> {
        self.highlighted_item()
            .or_else(|| self.items.first().map(String::as_str))
    }

    /// Move the highlight backward, wrapping from the first to the last.
    pub fn cycle_back(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => len - 1,
            Some(idx) => idx - 1,
        });
    }

    /// Move the highlight forward, wrapping from the last to the first.
    pub fn cycle_forward(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(idx) => (idx + 1) % len,
        });
    }

    /// Hide the panel and drop the highlight.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
        self.highlighted = None;
    }

    /// Drop everything (after a submission).
    pub fn clear(&mut self) {
        self.items.clear();
        self.highlighted = None;
        self.dismissed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOCAB: &[&str] = &["help", "history", "cd", "calc", "clear", "color", "contact"];

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(filter_vocabulary(VOCAB, "HE"), vec!["help"]);
        assert_eq!(filter_vocabulary(VOCAB, "c"), vec!["cd", "calc", "clear", "color", "contact"]);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_vocabulary(VOCAB, "").is_empty());
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut s = Suggestions::default();
        s.refresh(VOCAB, "co");
        assert_eq!(s.items(), &["color".to_string(), "contact".to_string()]);

        s.cycle_back();
        assert_eq!(s.highlighted_item(), Some("contact"));
        s.cycle_back();
        assert_eq!(s.highlighted_item(), Some("color"));
        s.cycle_back();
        assert_eq!(s.highlighted_item(), Some("contact"));

        s.cycle_forward();
        assert_eq!(s.highlighted_item(), Some("color"));
    }

    #[test]
    fn test_dismiss_hides() {
        let mut s = Suggestions::default();
        s.refresh(VOCAB, "h");
        assert!(s.is_visible());
        s.cycle_forward();
        s.dismiss();
        assert!(!s.is_visible());
        assert_eq!(s.highlighted(), None);
    }
}
