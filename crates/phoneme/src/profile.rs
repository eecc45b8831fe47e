use {
    crate::{
        encoding::Encoding,
        error::{RegistryError, Result},
        phoneme_set::PhonemeSet,
    },
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

/// Mode tag used in profile records for model-free profiles.
pub const MANUAL_MODE: &str = "manual";

/// Mode tag accepted for model-driven profiles (same as leaving `mode` out).
pub const MODEL_MODE: &str = "model";

/// How a profile produces alignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileMode {
    /// Elastic alignment without a neural model.
    Manual,
    /// Alignment driven by an external model artifact.
    Model {
        model_file: PathBuf,
        refiner_file: Option<PathBuf>,
    },
}

impl ProfileMode {
    pub fn model(model_file: impl Into<PathBuf>, refiner_file: Option<PathBuf>) -> Self {
        ProfileMode::Model {
            model_file: model_file.into(),
            refiner_file,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ProfileMode::Manual => MANUAL_MODE,
            ProfileMode::Model { .. } => MODEL_MODE,
        }
    }
}

/// One alignment profile: identity, artifacts and the symbols it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefinition {
    id: String,
    display_name: String,
    encoding: Encoding,
    mode: ProfileMode,
    phoneme_set: PhonemeSet,
}

impl ProfileDefinition {
    pub fn new<I, S>(
        id: impl Into<String>,
        display_name: impl Into<String>,
        encoding: Encoding,
        mode: ProfileMode,
        symbols: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        check_id(&id)?;
        let phoneme_set = PhonemeSet::new(symbols)
            .map_err(|err| RegistryError::MalformedProfile(format!("{id}: {}", detail(&err))))?;
        let definition = Self {
            id,
            display_name: display_name.into(),
            encoding,
            mode,
            phoneme_set,
        };
        definition.check_mode()?;
        Ok(definition)
    }

    pub fn manual<I, S>(
        id: impl Into<String>,
        display_name: impl Into<String>,
        encoding: Encoding,
        symbols: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, display_name, encoding, ProfileMode::Manual, symbols)
    }

    pub fn model<I, S>(
        id: impl Into<String>,
        display_name: impl Into<String>,
        encoding: Encoding,
        model_file: impl Into<PathBuf>,
        refiner_file: Option<PathBuf>,
        symbols: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mode = ProfileMode::model(model_file, refiner_file);
        Self::new(id, display_name, encoding, mode, symbols)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn mode(&self) -> &ProfileMode {
        &self.mode
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.mode, ProfileMode::Manual)
    }

    pub fn model_file(&self) -> Option<&Path> {
        match &self.mode {
            ProfileMode::Manual => None,
            ProfileMode::Model { model_file, .. } => Some(model_file),
        }
    }

    pub fn refiner_file(&self) -> Option<&Path> {
        match &self.mode {
            ProfileMode::Manual => None,
            ProfileMode::Model { refiner_file, .. } => refiner_file.as_deref(),
        }
    }

    pub fn phoneme_set(&self) -> &PhonemeSet {
        &self.phoneme_set
    }

    /// Re-run every construction check. Passing once means passing always.
    pub fn validate(&self) -> Result<()> {
        check_id(&self.id)?;
        self.phoneme_set.validate().map_err(|err| {
            RegistryError::MalformedProfile(format!("{}: {}", self.id, detail(&err)))
        })?;
        self.check_mode()
    }

    fn check_mode(&self) -> Result<()> {
        if let ProfileMode::Model {
            model_file,
            refiner_file,
        } = &self.mode
        {
            if model_file.as_os_str().is_empty() {
                return Err(RegistryError::MalformedProfile(format!(
                    "{}: model-driven profile has an empty model_file",
                    self.id
                )));
            }
            if refiner_file
                .as_ref()
                .is_some_and(|path| path.as_os_str().is_empty())
            {
                return Err(RegistryError::MalformedProfile(format!(
                    "{}: refiner_file is empty",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

fn check_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(RegistryError::MalformedProfile(
            "profile id is empty".to_string(),
        ));
    }
    Ok(())
}

fn detail(err: &RegistryError) -> String {
    match err {
        RegistryError::MalformedProfile(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Loose profile record as written in data files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileRecord {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refiner_file: Option<PathBuf>,
    pub encoding: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    pub phoneme_set: Vec<String>,
}

impl TryFrom<ProfileRecord> for ProfileDefinition {
    type Error = RegistryError;

    fn try_from(record: ProfileRecord) -> Result<Self> {
        let ProfileRecord {
            id,
            display_name,
            model_file,
            refiner_file,
            encoding,
            mode,
            phoneme_set,
        } = record;

        check_id(&id)?;
        let encoding = Encoding::from_tag(&encoding).ok_or_else(|| {
            RegistryError::MalformedProfile(format!("{id}: encoding is empty"))
        })?;

        let mode = match mode.as_deref().map(str::trim) {
            Some(MANUAL_MODE) => {
                if model_file.is_some() || refiner_file.is_some() {
                    return Err(RegistryError::MalformedProfile(format!(
                        "{id}: manual profile must not name model_file or refiner_file"
                    )));
                }
                ProfileMode::Manual
            }
            None | Some(MODEL_MODE) => match model_file {
                Some(model_file) => ProfileMode::Model {
                    model_file,
                    refiner_file,
                },
                None => {
                    return Err(RegistryError::MalformedProfile(format!(
                        "{id}: model-driven profile has no model_file"
                    )));
                }
            },
            Some(other) => {
                return Err(RegistryError::MalformedProfile(format!(
                    "{id}: unknown mode {other:?}"
                )));
            }
        };

        ProfileDefinition::new(id, display_name, encoding, mode, phoneme_set)
    }
}

impl From<&ProfileDefinition> for ProfileRecord {
    fn from(definition: &ProfileDefinition) -> Self {
        ProfileRecord {
            id: definition.id.clone(),
            display_name: definition.display_name.clone(),
            model_file: definition.model_file().map(Path::to_path_buf),
            refiner_file: definition.refiner_file().map(Path::to_path_buf),
            encoding: definition.encoding.to_tag().to_string(),
            mode: definition
                .is_manual()
                .then(|| MANUAL_MODE.to_string()),
            phoneme_set: definition.phoneme_set.symbols().to_vec(),
        }
    }
}
