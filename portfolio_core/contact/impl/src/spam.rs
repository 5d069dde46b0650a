use regex::RegexSet;

/// Keywords rejected by default if no explicit list is configured.
pub const DEFAULT_SPAM_KEYWORDS: &[&str] = &["viagra", "cialis", "lottery", "winner"];

/// Heuristic spam filter applied to the subject and message of incoming
/// submissions.
#[derive(Debug, Clone)]
pub struct SpamFilter {
    keywords: RegexSet,
}

impl SpamFilter {
    pub fn new(keywords: impl IntoIterator<Item = impl AsRef<str>>) -> anyhow::Result<Self> {
        let patterns = keywords
            .into_iter()
            .map(|keyword| format!("(?i){}", regex::escape(keyword.as_ref())));

        Ok(Self {
            keywords: RegexSet::new(patterns)?,
        })
    }

    pub fn is_spam(&self, text: &str) -> bool {
        self.keywords.is_match(text) || has_long_char_run(text)
    }
}

impl Default for SpamFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SPAM_KEYWORDS).unwrap()
    }
}

/// Returns whether the text contains a run of more than ten identical
/// consecutive characters.
fn has_long_char_run(text: &str) -> bool {
    let mut run = 0;
    let mut prev = None;

    for c in text.chars() {
        if prev == Some(c) {
            run += 1;
            if run > 10 {
                return true;
            }
        } else {
            prev = Some(c);
            run = 1;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_case_insensitive() {
        let filter = SpamFilter::default();

        assert!(filter.is_spam("cheap viagra here"));
        assert!(filter.is_spam("You are our LOTTERY WiNnEr!"));
        assert!(!filter.is_spam("I would like to hire you for a project."));
    }

    #[test]
    fn custom_keywords() {
        let filter = SpamFilter::new(["crypto"]).unwrap();

        assert!(filter.is_spam("free CRYPTO"));
        assert!(!filter.is_spam("cheap viagra here"));
    }

    #[test]
    fn long_char_runs() {
        let filter = SpamFilter::default();

        assert!(filter.is_spam("aaaaaaaaaaa"));
        assert!(filter.is_spam("hello!!!!!!!!!!!!!"));
        assert!(!filter.is_spam("aaaaaaaaaa"));
        assert!(!filter.is_spam("ababababababababababab"));
    }
}
