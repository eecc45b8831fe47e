use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    MalformedProfile(String),
    DuplicateProfileId(String),
    RegistryClosed(String),
    NotFound(String),
    Io(String),
    AlreadyInstalled,
}

impl RegistryError {
    /// Errors that leave the profile table unusable and should stop startup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RegistryError::MalformedProfile(_) | RegistryError::DuplicateProfileId(_)
        )
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::MalformedProfile(msg) => write!(f, "malformed profile: {msg}"),
            RegistryError::DuplicateProfileId(id) => write!(f, "duplicate profile id: {id}"),
            RegistryError::RegistryClosed(id) => {
                write!(f, "registry is sealed, cannot register: {id}")
            }
            RegistryError::NotFound(id) => write!(f, "profile not found: {id}"),
            RegistryError::Io(msg) => write!(f, "io error: {msg}"),
            RegistryError::AlreadyInstalled => write!(f, "a profile registry is already installed"),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::MalformedProfile(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
