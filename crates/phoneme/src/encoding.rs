use std::fmt;

/// Symbol notation a phoneme set is written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ipa,
    Arpabet,
    XSampa,
    Other(String),
}

impl Encoding {
    /// Parse an encoding tag such as `"ipa"` or `"x-sampa"`.
    ///
    /// Known tags match case-insensitively; anything else is kept verbatim as
    /// `Other`. Returns `None` for an empty tag.
    pub fn from_tag(tag: &str) -> Option<Encoding> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        Some(match tag.to_ascii_lowercase().as_str() {
            "ipa" => Encoding::Ipa,
            "arpabet" => Encoding::Arpabet,
            "x-sampa" | "xsampa" => Encoding::XSampa,
            _ => Encoding::Other(tag.to_string()),
        })
    }

    pub fn to_tag(&self) -> &str {
        match self {
            Encoding::Ipa => "IPA",
            Encoding::Arpabet => "ARPABET",
            Encoding::XSampa => "X-SAMPA",
            Encoding::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Ipa => write!(f, "International Phonetic Alphabet"),
            Encoding::Arpabet => write!(f, "ARPAbet"),
            Encoding::XSampa => write!(f, "X-SAMPA"),
            Encoding::Other(tag) => write!(f, "{tag}"),
        }
    }
}
