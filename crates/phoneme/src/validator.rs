use crate::{
    phoneme_set::{Compatibility, PhonemeSet, compatibility},
    profile::ProfileDefinition,
};

/// Candidate symbols split by membership, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl Classification {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// One piece of a segmented phoneme string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Known(&'a str),
    Unknown(char),
}

/// Membership and compatibility queries against one profile's phoneme set.
#[derive(Debug, Clone, Copy)]
pub struct PhonemeSetValidator<'a> {
    profile: &'a ProfileDefinition,
}

impl<'a> PhonemeSetValidator<'a> {
    pub fn new(profile: &'a ProfileDefinition) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &'a ProfileDefinition {
        self.profile
    }

    fn set(&self) -> &'a PhonemeSet {
        self.profile.phoneme_set()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.set().contains(symbol)
    }

    pub fn classify<I, S>(&self, candidates: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classification = Classification::default();
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if self.contains(candidate) {
                classification.valid.push(candidate.to_string());
            } else {
                classification.invalid.push(candidate.to_string());
            }
        }
        classification
    }

    pub fn compatibility_score<I, S>(&self, other: I) -> Compatibility
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let other: Vec<S> = other.into_iter().collect();
        compatibility(
            self.set().iter(),
            other.iter().map(|symbol| AsRef::<str>::as_ref(symbol)),
        )
    }

    /// Split an unsegmented phoneme string into this profile's symbols.
    ///
    /// At each position the longest matching symbol wins, so `"tʃ"` is read
    /// as one affricate when the set has it, and as `t` + `ʃ` otherwise.
    /// Whitespace separates words and is dropped. A char that starts no
    /// symbol becomes `Segment::Unknown`.
    pub fn segment(&self, text: &str) -> Vec<Segment<'a>> {
        let set = self.set();
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut segments = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let (start, c) = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }
            let max_len = set.longest_symbol().min(chars.len() - i);
            let found = (1..=max_len).rev().find_map(|len| {
                let end = chars.get(i + len).map_or(text.len(), |&(pos, _)| pos);
                set.get(&text[start..end]).map(|symbol| (len, symbol))
            });
            match found {
                Some((len, symbol)) => {
                    segments.push(Segment::Known(symbol));
                    i += len;
                }
                None => {
                    segments.push(Segment::Unknown(c));
                    i += 1;
                }
            }
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoding;

    fn profile(symbols: &[&str]) -> ProfileDefinition {
        ProfileDefinition::manual("test", "Test", Encoding::Ipa, symbols.iter().copied()).unwrap()
    }

    #[test]
    fn test_contains_exact_match() {
        let p = profile(&["a", "i", "k"]);
        let v = PhonemeSetValidator::new(&p);
        assert!(v.contains("a"));
        assert!(!v.contains("A"));
        assert!(!v.contains("a "));
        assert!(!v.contains(""));
    }

    #[test]
    fn test_classify_preserves_order() {
        let p = profile(&["a", "i", "k"]);
        let result = PhonemeSetValidator::new(&p).classify(["a", "x", "k"]);
        assert_eq!(result.valid, vec!["a", "k"]);
        assert_eq!(result.invalid, vec!["x"]);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_classify_keeps_repeats() {
        let p = profile(&["a", "i"]);
        let result = PhonemeSetValidator::new(&p).classify(vec![
            "i".to_string(),
            "z".to_string(),
            "i".to_string(),
            "q".to_string(),
        ]);
        assert_eq!(result.valid, vec!["i", "i"]);
        assert_eq!(result.invalid, vec!["z", "q"]);
    }

    #[test]
    fn test_classify_empty_input() {
        let p = profile(&["a"]);
        let result = PhonemeSetValidator::new(&p).classify(Vec::<&str>::new());
        assert!(result.valid.is_empty());
        assert!(result.is_valid());
    }

    #[test]
    fn test_compatibility_score() {
        let p = profile(&["a", "i", "k"]);
        let v = PhonemeSetValidator::new(&p);
        assert_eq!(v.compatibility_score(["k", "i", "a"]), Compatibility::Exact);
        assert_eq!(v.compatibility_score(["a", "e"]), Compatibility::Partial);
        assert_eq!(v.compatibility_score(["o", "u"]), Compatibility::Incompatible);
        assert_eq!(
            v.compatibility_score(Vec::<String>::new()),
            Compatibility::Incompatible
        );
    }

    #[test]
    fn test_segment_prefers_longest() {
        let p = profile(&["t", "ʃ", "tʃ", "iː", "i", "z"]);
        let segments = PhonemeSetValidator::new(&p).segment("tʃiːz");
        assert_eq!(
            segments,
            vec![Segment::Known("tʃ"), Segment::Known("iː"), Segment::Known("z")]
        );
    }

    #[test]
    fn test_segment_falls_back_to_shorter() {
        let p = profile(&["t", "ʃ", "tʃ"]);
        let segments = PhonemeSetValidator::new(&p).segment("tt");
        assert_eq!(segments, vec![Segment::Known("t"), Segment::Known("t")]);
    }

    #[test]
    fn test_segment_reports_unknown_and_skips_space() {
        let p = profile(&["a", "k"]);
        let segments = PhonemeSetValidator::new(&p).segment("ka xa");
        assert_eq!(
            segments,
            vec![
                Segment::Known("k"),
                Segment::Known("a"),
                Segment::Unknown('x'),
                Segment::Known("a"),
            ]
        );
    }

    #[test]
    fn test_segment_empty() {
        let p = profile(&["a"]);
        assert!(PhonemeSetValidator::new(&p).segment("").is_empty());
    }
}
