use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all pinner operations.
///
/// The discovery walk collects these per branch instead of aborting, so every
/// variant names the library it concerns where there is one.
#[derive(Debug, Error, Diagnostic)]
pub enum PinnerError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The library name does not match a supported hosting pattern.
    #[error("Unsupported dependency '{library}': {reason}")]
    #[diagnostic(help("Only libraries hosted on a configured host ([sources] hosts) can be pinned"))]
    UnsupportedDependency { library: String, reason: String },

    /// A constraint expression failed to parse.
    #[error("Malformed constraint '{expression}': {message}")]
    #[diagnostic(help("Constraints look like \">= 1.0, < 2.0\", \"= 1.2.3\" or \"~> 1.4\""))]
    MalformedConstraint { expression: String, message: String },

    /// Clone, fetch, tag listing or checkout failed.
    #[error("Source control failure for '{library}': {message}")]
    SourceControl { library: String, message: String },

    /// Running a library's manifest probe or reading its output failed.
    #[error("Manifest probe failed for '{library}': {message}")]
    ManifestProbe { library: String, message: String },

    /// No known version satisfies every constraint recorded for a library.
    #[error("No available version of '{library}' satisfies all constraints")]
    #[diagnostic(help("{details}"))]
    NoSatisfyingVersion { library: String, details: String },

    /// A library depends on itself, directly or transitively.
    #[error("Dependency cycle detected: {path}")]
    DependencyCycle { path: String },

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check ~/.pinner/config.toml for syntax errors"))]
    Config { message: String },

    /// Invalid or malformed project manifest (e.g. Pin.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Pin.toml for syntax errors"))]
    Manifest { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl PinnerError {
    /// The library this error concerns, if any.
    pub fn library(&self) -> Option<&str> {
        match self {
            Self::UnsupportedDependency { library, .. }
            | Self::SourceControl { library, .. }
            | Self::ManifestProbe { library, .. }
            | Self::NoSatisfyingVersion { library, .. } => Some(library),
            _ => None,
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type PinnerResult<T> = miette::Result<T>;
