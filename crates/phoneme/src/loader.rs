use {
    crate::{
        error::{RegistryError, Result},
        profile::{ProfileDefinition, ProfileRecord},
    },
    base::log::info,
    serde_json::Value,
    std::{fs, path::Path},
};

/// Parse profile definitions from JSON.
///
/// The document is either one record object or an array of them. Field names
/// follow [`ProfileRecord`]; unknown fields are rejected.
pub fn parse_profiles(json: &str) -> Result<Vec<ProfileDefinition>> {
    let records: Vec<ProfileRecord> = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).map_err(|err| {
                    RegistryError::MalformedProfile(format!("record {}: {}", i, err))
                })
            })
            .collect::<Result<_>>()?,
        value @ Value::Object(_) => vec![serde_json::from_value(value)?],
        _ => {
            return Err(RegistryError::MalformedProfile(
                "expected a profile object or an array of profiles".to_string(),
            ));
        }
    };
    records
        .into_iter()
        .map(ProfileDefinition::try_from)
        .collect()
}

/// Read profile definitions from one JSON file.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<ProfileDefinition>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| RegistryError::Io(format!("cannot read {}: {}", path.display(), e)))?;
    let profiles = parse_profiles(&contents).map_err(|err| match err {
        RegistryError::MalformedProfile(msg) => {
            RegistryError::MalformedProfile(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;
    info!("loaded {} profiles from {}", profiles.len(), path.display());
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_object() {
        let profiles = parse_profiles(
            r#"{"id": "m", "display_name": "M", "encoding": "IPA", "mode": "manual",
                "phoneme_set": ["a", "i"]}"#,
        )
        .unwrap();
        assert_eq!(profiles.len(), 1);
        assert!(profiles[0].is_manual());
    }

    #[test]
    fn test_parse_array_keeps_order() {
        let profiles = parse_profiles(
            r#"[
                {"id": "b", "display_name": "B", "encoding": "ipa", "mode": "manual", "phoneme_set": ["a"]},
                {"id": "a", "display_name": "A", "encoding": "ipa", "model_file": "a.onnx", "phoneme_set": ["a"]}
            ]"#,
        )
        .unwrap();
        let ids: Vec<&str> = profiles.iter().map(|p| p.id()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_parse_null_files_mean_absent() {
        let profiles = parse_profiles(
            r#"{"id": "m", "display_name": "M", "encoding": "ipa", "mode": "manual",
                "model_file": null, "refiner_file": null, "phoneme_set": ["a"]}"#,
        )
        .unwrap();
        assert!(profiles[0].model_file().is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let err = parse_profiles(
            r#"{"id": "m", "display_name": "M", "encoding": "ipa", "mode": "manual",
                "phonemes": ["a"], "phoneme_set": ["a"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::MalformedProfile(_)));
    }

    #[test]
    fn test_parse_array_error_names_record() {
        let err = parse_profiles(r#"[{"id": "ok"}, 3]"#).unwrap_err();
        match err {
            RegistryError::MalformedProfile(msg) => assert!(msg.starts_with("record 0:"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_scalar_document() {
        assert!(parse_profiles("42").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(
            parse_profiles("{").unwrap_err(),
            RegistryError::MalformedProfile(_)
        ));
    }
}
