use {
    crate::error::{RegistryError, Result},
    std::{collections::HashSet, fmt},
};

/// How closely two phoneme sets match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compatibility {
    /// Same symbols, in any order.
    Exact,
    /// Some symbols shared, but the sets differ.
    Partial,
    /// No symbol in common.
    Incompatible,
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compatibility::Exact => write!(f, "exact"),
            Compatibility::Partial => write!(f, "partial"),
            Compatibility::Incompatible => write!(f, "none"),
        }
    }
}

/// Score two symbol collections against each other.
///
/// Both sides are treated as sets: order and repeats are ignored, symbols are
/// compared as exact strings. An empty side shares nothing, so it scores
/// `Incompatible` even against another empty side. The result does not
/// depend on argument order.
pub fn compatibility<'a, 'b>(
    a: impl IntoIterator<Item = &'a str>,
    b: impl IntoIterator<Item = &'b str>,
) -> Compatibility {
    let a: HashSet<&str> = a.into_iter().collect();
    let b: HashSet<&str> = b.into_iter().collect();
    if a.is_empty() || b.is_empty() {
        Compatibility::Incompatible
    } else if a == b {
        Compatibility::Exact
    } else if a.intersection(&b).next().is_some() {
        Compatibility::Partial
    } else {
        Compatibility::Incompatible
    }
}

/// Ordered, duplicate-free collection of phoneme symbols.
#[derive(Debug, Clone)]
pub struct PhonemeSet {
    symbols: Vec<String>,
    index: HashSet<String>,
    longest: usize,
}

impl PhonemeSet {
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(RegistryError::MalformedProfile(
                "phoneme set is empty".to_string(),
            ));
        }
        let mut index = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if symbol.is_empty() {
                return Err(RegistryError::MalformedProfile(
                    "phoneme set contains an empty symbol".to_string(),
                ));
            }
            if !index.insert(symbol.clone()) {
                return Err(RegistryError::MalformedProfile(format!(
                    "duplicate symbol {symbol:?} in phoneme set"
                )));
            }
        }
        let longest = symbols.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        Ok(Self {
            symbols,
            index,
            longest,
        })
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains(symbol)
    }

    /// Symbols in declaration order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Length in chars of the longest symbol.
    pub fn longest_symbol(&self) -> usize {
        self.longest
    }

    /// Look up the stored copy of `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.index.get(symbol).map(String::as_str)
    }

    /// Re-check the construction invariants.
    pub fn validate(&self) -> Result<()> {
        Self::new(self.symbols.iter().map(String::as_str)).map(|_| ())
    }

    pub fn compatibility(&self, other: &PhonemeSet) -> Compatibility {
        compatibility(self.iter(), other.iter())
    }
}

impl PartialEq for PhonemeSet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for PhonemeSet {}
