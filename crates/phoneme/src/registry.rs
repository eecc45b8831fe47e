use {
    crate::{
        error::{RegistryError, Result},
        phoneme_set::Compatibility,
        profile::{ProfileDefinition, ProfileRecord},
        validator::PhonemeSetValidator,
    },
    base::log::{debug, info, warn},
    std::{
        collections::{BTreeSet, HashMap},
        fmt,
        path::{Path, PathBuf},
        sync::OnceLock,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistryState {
    /// Accepting registrations.
    #[default]
    Open,
    /// Read-only. Sealing cannot be undone.
    Sealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Model,
    Refiner,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Model => write!(f, "model_file"),
            Artifact::Refiner => write!(f, "refiner_file"),
        }
    }
}

/// Two profiles point at the same artifact but disagree on the phoneme set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub file: PathBuf,
    pub first: (String, Artifact),
    pub second: (String, Artifact),
    pub compatibility: Compatibility,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is the {} of {} and the {} of {}, but their phoneme sets are {}",
            self.file.display(),
            self.first.1,
            self.first.0,
            self.second.1,
            self.second.0,
            match self.compatibility {
                Compatibility::Exact => "identical",
                Compatibility::Partial => "only partly shared",
                Compatibility::Incompatible => "disjoint",
            }
        )
    }
}

fn artifacts(definition: &ProfileDefinition) -> impl Iterator<Item = (Artifact, &Path)> {
    [
        definition.model_file().map(|path| (Artifact::Model, path)),
        definition.refiner_file().map(|path| (Artifact::Refiner, path)),
    ]
    .into_iter()
    .flatten()
}

fn shared_artifacts(first: &ProfileDefinition, second: &ProfileDefinition) -> Vec<Conflict> {
    let compatibility = first.phoneme_set().compatibility(second.phoneme_set());
    if compatibility == Compatibility::Exact {
        return Vec::new();
    }
    let mut conflicts = Vec::new();
    for (first_kind, first_path) in artifacts(first) {
        for (second_kind, second_path) in artifacts(second) {
            if first_path == second_path {
                conflicts.push(Conflict {
                    file: first_path.to_path_buf(),
                    first: (first.id().to_string(), first_kind),
                    second: (second.id().to_string(), second_kind),
                    compatibility,
                });
            }
        }
    }
    conflicts
}

/// All known alignment profiles, indexed by id and by phoneme.
///
/// Filled sequentially at startup, then sealed. Nothing mutates a sealed
/// registry, so readers need no locking.
#[derive(Debug, Default)]
pub struct ProfileRegistry {
    state: RegistryState,
    profiles: Vec<ProfileDefinition>,
    ids: HashMap<String, usize>,
    phonemes: HashMap<String, Vec<usize>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    pub fn is_sealed(&self) -> bool {
        self.state == RegistryState::Sealed
    }

    pub fn register(&mut self, definition: ProfileDefinition) -> Result<()> {
        if self.is_sealed() {
            return Err(RegistryError::RegistryClosed(definition.id().to_string()));
        }
        definition.validate()?;
        if self.ids.contains_key(definition.id()) {
            return Err(RegistryError::DuplicateProfileId(
                definition.id().to_string(),
            ));
        }

        for existing in &self.profiles {
            for conflict in shared_artifacts(existing, &definition) {
                warn!("{}", conflict);
            }
        }

        let slot = self.profiles.len();
        for symbol in definition.phoneme_set().iter() {
            self.phonemes
                .entry(symbol.to_string())
                .or_default()
                .push(slot);
        }
        self.ids.insert(definition.id().to_string(), slot);
        debug!(
            "registered profile {} ({}, {} symbols, {})",
            definition.id(),
            definition.display_name(),
            definition.phoneme_set().len(),
            definition.mode().tag()
        );
        self.profiles.push(definition);
        Ok(())
    }

    pub fn register_record(&mut self, record: ProfileRecord) -> Result<()> {
        self.register(ProfileDefinition::try_from(record)?)
    }

    /// Register every definition, stopping at the first failure.
    pub fn register_all(
        &mut self,
        definitions: impl IntoIterator<Item = ProfileDefinition>,
    ) -> Result<()> {
        definitions
            .into_iter()
            .try_for_each(|definition| self.register(definition))
    }

    /// Stop accepting registrations.
    pub fn seal(&mut self) {
        if !self.is_sealed() {
            self.state = RegistryState::Sealed;
            info!("profile registry sealed with {} profiles", self.len());
        }
    }

    pub fn get(&self, id: &str) -> Result<&ProfileDefinition> {
        self.ids
            .get(id)
            .map(|&slot| &self.profiles[slot])
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Profiles in registration order.
    pub fn list(&self) -> &[ProfileDefinition] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Ids of the profiles whose phoneme set contains `symbol`.
    pub fn find_by_phoneme(&self, symbol: &str) -> BTreeSet<&str> {
        self.phonemes
            .get(symbol)
            .into_iter()
            .flatten()
            .map(|&slot| self.profiles[slot].id())
            .collect()
    }

    pub fn validator(&self, id: &str) -> Result<PhonemeSetValidator<'_>> {
        self.get(id).map(PhonemeSetValidator::new)
    }

    /// Pairs of profiles sharing a model or refiner file with differing phoneme sets.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for (i, first) in self.profiles.iter().enumerate() {
            for second in &self.profiles[i + 1..] {
                conflicts.extend(shared_artifacts(first, second));
            }
        }
        conflicts
    }
}

static INSTALLED: OnceLock<ProfileRegistry> = OnceLock::new();

/// Seal `registry` and make it the process-wide instance.
pub fn install(mut registry: ProfileRegistry) -> Result<&'static ProfileRegistry> {
    registry.seal();
    INSTALLED
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled)?;
    INSTALLED.get().ok_or(RegistryError::AlreadyInstalled)
}

/// The registry passed to [`install`], if any.
pub fn global() -> Option<&'static ProfileRegistry> {
    INSTALLED.get()
}
