pub mod builtin;
pub mod encoding;
pub mod error;
pub mod loader;
pub mod phoneme_set;
pub mod profile;
pub mod registry;
pub mod validator;

pub use encoding::Encoding;
pub use error::{RegistryError, Result};
pub use phoneme_set::{Compatibility, PhonemeSet, compatibility};
pub use profile::{MANUAL_MODE, MODEL_MODE, ProfileDefinition, ProfileMode, ProfileRecord};
pub use registry::{Artifact, Conflict, ProfileRegistry, RegistryState, global, install};
pub use validator::{Classification, PhonemeSetValidator, Segment};
