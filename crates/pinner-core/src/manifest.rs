use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use pinner_util::errors::PinnerError;

/// The parsed representation of a `Pin.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PinManifest {
    #[serde(default)]
    pub package: Option<PackageInfo>,

    /// Library name to constraint expression.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Optional identity of the project from `[package]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
}

impl PinManifest {
    /// Load and parse a `Pin.toml` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PinnerError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Parse a `Pin.toml` from a string.
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            PinnerError::Manifest {
                message: format!("Failed to parse Pin.toml: {e}"),
            }
            .into()
        })
    }

    /// Display name of the project, used as the root of the dependency tree.
    pub fn root_name(&self) -> &str {
        self.package
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("(root)")
    }
}
