use std::fmt;
use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default profile file name, looked up next to the executable.
pub const PROFILE_FILE: &str = "profiles.yaml";

/// A named bundle of static network settings, loaded once at startup and
/// never mutated afterwards. The DNS servers are optional; everything else
/// is required for a static assignment to make sense.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkProfile {
    pub name: String,
    pub ip: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub subnet: Ipv4Addr,
    #[serde(default)]
    pub dns1: Option<Ipv4Addr>,
    #[serde(default)]
    pub dns2: Option<Ipv4Addr>,
}

impl NetworkProfile {
    /// Short form used by selection prompts, e.g. `office (192.168.0.20)`.
    pub fn summary(&self) -> String {
        format!("{} ({})", self.name, self.ip)
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    profiles: Vec<NetworkProfile>,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile file not found: {0} (create it or point --config at one)")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("profile entry {index} has an empty name")]
    EmptyName { index: usize },

    #[error("no profiles defined in {0}")]
    Empty(PathBuf),
}

/// Loads every profile from a YAML file with a top-level `profiles` list.
///
/// Missing, unreadable, malformed and empty files are all reported through the
/// error variants; callers treat them as "nothing to select" rather than a
/// crash.
pub fn load_profiles(path: &Path) -> Result<Vec<NetworkProfile>, ProfileError> {
    if !path.exists() {
        return Err(ProfileError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let profiles = parse_profiles(&contents).map_err(|error| match error {
        ParseError::Yaml(source) => ProfileError::Parse {
            path: path.to_path_buf(),
            source,
        },
        ParseError::EmptyName { index } => ProfileError::EmptyName { index },
        ParseError::NoProfiles => ProfileError::Empty(path.to_path_buf()),
    })?;

    tracing::debug!("loaded {} profile(s) from {}", profiles.len(), path.display());
    Ok(profiles)
}

enum ParseError {
    Yaml(serde_yaml::Error),
    EmptyName { index: usize },
    NoProfiles,
}

fn parse_profiles(contents: &str) -> Result<Vec<NetworkProfile>, ParseError> {
    let file: ProfileFile = serde_yaml::from_str(contents).map_err(ParseError::Yaml)?;

    if file.profiles.is_empty() {
        return Err(ParseError::NoProfiles);
    }
    for (index, profile) in file.profiles.iter().enumerate() {
        if profile.name.trim().is_empty() {
            return Err(ParseError::EmptyName { index });
        }
    }

    Ok(file.profiles)
}

/// `profiles.yaml` next to the executable, falling back to the working
/// directory when the executable path cannot be resolved.
pub fn default_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map(|dir| dir.join(PROFILE_FILE))
        .unwrap_or_else(|| PathBuf::from(PROFILE_FILE))
}
