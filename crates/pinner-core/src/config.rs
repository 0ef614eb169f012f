use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use pinner_util::errors::PinnerError;

use crate::library::SourceRules;
use crate::version::TagScheme;

/// Environment variable overriding the staging root.
pub const STAGING_ENV: &str = "PINNER_STAGING";

/// Global user configuration loaded from `~/.pinner/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub staging: StagingConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub tags: TagScheme,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,
}

/// Where libraries are cloned, from `[staging]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagingConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Supported hosting pattern, from `[sources]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
            protocol: default_protocol(),
        }
    }
}

fn default_hosts() -> Vec<String> {
    vec!["github.com".to_string()]
}

fn default_protocol() -> String {
    "https".to_string()
}

/// How a materialized library is asked for its dependencies, from `[probe]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Program and arguments, run inside the library's working tree.
    #[serde(default = "default_probe_command")]
    pub command: Vec<String>,
    /// The probe only runs when this file exists in the working tree.
    #[serde(default = "default_probe_manifest")]
    pub manifest: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            command: default_probe_command(),
            manifest: default_probe_manifest(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_probe_command() -> Vec<String> {
    vec!["pinner".to_string(), "report".to_string()]
}

fn default_probe_manifest() -> String {
    crate::MANIFEST_FILE.to_string()
}

fn default_delimiter() -> char {
    ' '
}

/// Resolution strategy, from `[resolve]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default)]
    pub strategy: ResolveStrategy,
    #[serde(default = "default_max_rounds", rename = "max-rounds")]
    pub max_rounds: u32,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            strategy: ResolveStrategy::default(),
            max_rounds: default_max_rounds(),
        }
    }
}

fn default_max_rounds() -> u32 {
    8
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveStrategy {
    /// Probe each library at its locally-picked version only.
    #[default]
    SinglePass,
    /// Re-probe libraries at their resolved versions until nothing changes.
    FixedPoint,
}

impl Config {
    /// Load `~/.pinner/config.toml` (or defaults if absent) and apply
    /// environment overrides.
    pub fn load() -> miette::Result<Self> {
        let path = Self::default_path();
        let mut config = if path.is_file() {
            Self::from_path(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PinnerError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            PinnerError::Config {
                message: format!("Failed to parse config: {e}"),
            }
            .into()
        })
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup(STAGING_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(root = %root, "staging root overridden from environment");
            self.staging.root = Some(PathBuf::from(root));
        }
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// The staging root under which every library is cloned.
    pub fn staging_root(&self) -> PathBuf {
        self.staging
            .root
            .clone()
            .unwrap_or_else(|| dirs_path().join("staging"))
    }

    pub fn source_rules(&self) -> SourceRules {
        SourceRules {
            hosts: self.sources.hosts.clone(),
            protocol: self.sources.protocol.clone(),
        }
    }
}

/// Returns the path to the pinner data directory (`~/.pinner/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".pinner")
}
