use crate::language::Language;
use crate::session::{SessionConfig, TimeLimit};
use crate::word_generator::Mode;
use crate::PtResult;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Preferences remembered between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub mode: Mode,
    pub time_limit: TimeLimit,
    pub binary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default().code(),
            mode: Mode::default(),
            time_limit: TimeLimit::default(),
            binary: false,
        }
    }
}

impl Config {
    /// Session configuration for these preferences. Unknown language codes fall back to English.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            time_limit: self.time_limit,
            mode: self.mode,
            language: Language::from_code(&self.language),
            binary: self.binary,
        }
    }
}

impl From<SessionConfig> for Config {
    fn from(sc: SessionConfig) -> Self {
        Self {
            language: sc.language.code(),
            mode: sc.mode,
            time_limit: sc.time_limit,
            binary: sc.binary,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> PtResult<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "pixeltype") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("pixeltype_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no saved config");
                return Config::default();
            }
        };
        serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), %err, "ignoring invalid config");
            Config::default()
        })
    }

    fn save(&self, cfg: &Config) -> PtResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
