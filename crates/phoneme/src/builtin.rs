//! Profiles shipped with the crate.
//!
//! Every consumer that needs a phoneme list (validators, scoring views,
//! aligners) should read it from the registry instead of keeping a copy.

use crate::{
    encoding::Encoding,
    error::Result,
    profile::ProfileDefinition,
    registry::ProfileRegistry,
};

pub const MANUAL: &str = "manual";
pub const ENGLISH_IPA: &str = "english_ipa";
pub const MULTILINGUAL_IPA: &str = "multilingual_ipa";

const VOWELS: &[&str] = &[
    "i", "ɪ", "e", "ɛ", "æ", "ə", "ɚ", "ɜ", "ʌ", "u", "ʊ", "o", "ɔ", "ɑ",
];

const DIPHTHONGS: &[&str] = &["aɪ", "aʊ", "ɔɪ", "eɪ", "oʊ"];

// ɡ is U+0261, not ASCII g
const STOPS: &[&str] = &["p", "b", "t", "d", "k", "ɡ", "ʔ"];

const AFFRICATES: &[&str] = &["tʃ", "dʒ"];

const FRICATIVES: &[&str] = &["f", "v", "θ", "ð", "s", "z", "ʃ", "ʒ", "h"];

const NASALS: &[&str] = &["m", "n", "ŋ"];

const LIQUIDS: &[&str] = &["l", "ɹ", "ɾ"];

const GLIDES: &[&str] = &["j", "w"];

const EXTRA_VOWELS: &[&str] = &[
    "a", "y", "ø", "œ", "ɶ", "ɯ", "ɨ", "ʉ", "ɒ", "ɐ", "ɤ", "ɵ",
];

const EXTRA_STOPS: &[&str] = &["c", "ɟ", "q", "ɢ", "ʈ", "ɖ"];

const EXTRA_AFFRICATES: &[&str] = &["ts", "dz"];

const EXTRA_FRICATIVES: &[&str] = &[
    "x", "ɣ", "χ", "ʁ", "ħ", "ʕ", "ɸ", "β", "ç", "ʝ", "ɕ", "ʑ", "ʂ", "ʐ", "ɬ", "ɮ",
];

const EXTRA_NASALS: &[&str] = &["ɲ", "ɳ", "ɴ", "ɱ"];

const EXTRA_APPROXIMANTS: &[&str] = &["ʎ", "ʟ", "r", "ʀ", "ɽ", "ʋ", "ɰ", "ɥ"];

const SUPRASEGMENTALS: &[&str] = &["ː", "ˈ", "ˌ"];

const ENGLISH_GROUPS: &[&[&str]] = &[
    VOWELS, DIPHTHONGS, STOPS, AFFRICATES, FRICATIVES, NASALS, LIQUIDS, GLIDES,
];

const MULTILINGUAL_GROUPS: &[&[&str]] = &[
    VOWELS,
    EXTRA_VOWELS,
    DIPHTHONGS,
    STOPS,
    EXTRA_STOPS,
    AFFRICATES,
    EXTRA_AFFRICATES,
    FRICATIVES,
    EXTRA_FRICATIVES,
    NASALS,
    EXTRA_NASALS,
    LIQUIDS,
    GLIDES,
    EXTRA_APPROXIMANTS,
    SUPRASEGMENTALS,
];

fn symbols(groups: &[&[&'static str]]) -> impl Iterator<Item = &'static str> {
    groups.iter().flat_map(|group| group.iter().copied())
}

/// The shipped profiles, in listing order.
pub fn profiles() -> Result<Vec<ProfileDefinition>> {
    Ok(vec![
        ProfileDefinition::manual(MANUAL, "Manual (IPA)", Encoding::Ipa, symbols(ENGLISH_GROUPS))?,
        ProfileDefinition::model(
            ENGLISH_IPA,
            "English (IPA)",
            Encoding::Ipa,
            "models/english_ipa.onnx",
            Some("models/english_ipa_refiner.onnx".into()),
            symbols(ENGLISH_GROUPS),
        )?,
        ProfileDefinition::model(
            MULTILINGUAL_IPA,
            "Multilingual (IPA)",
            Encoding::Ipa,
            "models/multilingual_ipa.onnx",
            Some("models/multilingual_ipa_refiner.onnx".into()),
            symbols(MULTILINGUAL_GROUPS),
        )?,
    ])
}

/// An open registry holding the shipped profiles.
pub fn registry() -> Result<ProfileRegistry> {
    let mut registry = ProfileRegistry::new();
    registry.register_all(profiles()?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::phoneme_set::Compatibility};

    #[test]
    fn test_builtin_profiles_are_valid() {
        for profile in profiles().unwrap() {
            assert!(profile.validate().is_ok(), "{} is invalid", profile.id());
        }
    }

    #[test]
    fn test_builtin_order() {
        let ids: Vec<String> = profiles()
            .unwrap()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, [MANUAL, ENGLISH_IPA, MULTILINGUAL_IPA]);
    }

    #[test]
    fn test_builtin_sizes() {
        let profiles = profiles().unwrap();
        assert_eq!(profiles[0].phoneme_set().len(), 45);
        assert_eq!(profiles[2].phoneme_set().len(), 45 + 51);
    }

    #[test]
    fn test_manual_has_no_artifacts() {
        let manual = &profiles().unwrap()[0];
        assert!(manual.is_manual());
        assert!(manual.model_file().is_none());
        assert!(manual.refiner_file().is_none());
    }

    #[test]
    fn test_builtin_compatibility() {
        let profiles = profiles().unwrap();
        let manual = profiles[0].phoneme_set();
        let english = profiles[1].phoneme_set();
        let multilingual = profiles[2].phoneme_set();
        assert_eq!(manual.compatibility(english), Compatibility::Exact);
        assert_eq!(english.compatibility(multilingual), Compatibility::Partial);
    }

    #[test]
    fn test_builtin_registry_has_no_conflicts() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.conflicts().is_empty());
    }
}
