//! Generator configuration.
//!
//! Loads config from:
//! 1. Global: ~/.config/protodto/config.toml
//! 2. Per-project: .protodto/config.toml (overrides global)
//! 3. Environment: `ALL_PUBLIC` (any non-empty value)
//!
//! Example config.toml:
//! ```toml
//! all_public = false
//! output_suffix = ".huma.go"
//! one_of_imports = ["net/http", "reflect", "strings", "github.com/istreamlabs/huma"]
//! ```

use crate::error::{Result, TypegenError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment switch forcing every field public.
pub const ALL_PUBLIC_ENV: &str = "ALL_PUBLIC";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Treat every field as public, whatever its annotations say.
    pub all_public: bool,
    /// Replaces the input extension to form the output identifier.
    pub output_suffix: String,
    /// Imports required by the well-known timestamp type.
    pub timestamp_imports: Vec<String>,
    /// Imports required by a unit with public one-of fields.
    pub one_of_imports: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            all_public: false,
            output_suffix: ".huma.go".to_string(),
            timestamp_imports: vec![
                "time".to_string(),
                "google.golang.org/protobuf/types/known/timestamppb".to_string(),
            ],
            one_of_imports: vec![
                "net/http".to_string(),
                "reflect".to_string(),
                "strings".to_string(),
                "github.com/istreamlabs/huma".to_string(),
            ],
        }
    }
}

impl GeneratorConfig {
    /// Load configuration for a project root, then apply the environment.
    ///
    /// A config file that exists but cannot be read or parsed is skipped
    /// with a warning.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = Self::global_config_path().and_then(|p| Self::load_lenient(&p)) {
            config = global;
        }

        // Per-project config overrides global
        let project_path = root.join(".protodto").join("config.toml");
        if let Some(project) = Self::load_lenient(&project_path) {
            config = project;
        }

        config.with_env()
    }

    /// Load one config file. Missing keys take their defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load one config file, `None` if it does not exist.
    pub fn load_optional(path: &Path) -> Result<Option<Self>> {
        match Self::load_file(path) {
            Ok(config) => Ok(Some(config)),
            Err(TypegenError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn load_lenient(path: &Path) -> Option<Self> {
        match Self::load_optional(path) {
            Ok(Some(config)) => {
                debug!(path = %path.display(), "loaded config file");
                Some(config)
            }
            Ok(None) => None,
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring invalid config file");
                None
            }
        }
    }

    /// Apply `ALL_PUBLIC` from the process environment.
    pub fn with_env(self) -> Self {
        let all_public = std::env::var(ALL_PUBLIC_ENV).ok();
        self.with_all_public_override(all_public.as_deref())
    }

    fn with_all_public_override(mut self, value: Option<&str>) -> Self {
        if value.is_some_and(|v| !v.is_empty()) {
            self.all_public = true;
        }
        self
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("protodto").join("config.toml"))
    }
}
