//! Operation: the mode-switched entry point a library exposes to its
//! dependents' probes.

use std::fmt;

use pinner_scm::probe::MODE_ENV;
use pinner_util::errors::PinnerError;

use crate::ops_pin::{self, PinCommandOptions};
use crate::ops_report;
use crate::ops_setup::GlobalOptions;

/// What `pinner run` does, selected by `PIN_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Report,
    Pin,
}

impl Mode {
    /// Unset or empty means [`Mode::Report`].
    pub fn from_env_value(value: Option<&str>) -> Result<Self, PinnerError> {
        match value.map(str::trim) {
            None | Some("") | Some("report") => Ok(Self::Report),
            Some("pin") => Ok(Self::Pin),
            Some(other) => Err(PinnerError::Generic {
                message: format!("unknown {MODE_ENV} '{other}', expected 'report' or 'pin'"),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => write!(f, "report"),
            Self::Pin => write!(f, "pin"),
        }
    }
}

/// Dispatch on `PIN_MODE`.
pub fn run(opts: &GlobalOptions) -> miette::Result<()> {
    let value = std::env::var(MODE_ENV).ok();
    let mode = Mode::from_env_value(value.as_deref())?;
    tracing::debug!(%mode, "dispatching on {}", MODE_ENV);
    match mode {
        Mode::Report => ops_report::report(opts),
        Mode::Pin => ops_pin::pin(opts, &PinCommandOptions::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_means_report() {
        assert_eq!(Mode::from_env_value(None).unwrap(), Mode::Report);
        assert_eq!(Mode::from_env_value(Some("")).unwrap(), Mode::Report);
        assert_eq!(Mode::from_env_value(Some("report")).unwrap(), Mode::Report);
    }

    #[test]
    fn pin_mode() {
        assert_eq!(Mode::from_env_value(Some("pin")).unwrap(), Mode::Pin);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = Mode::from_env_value(Some("deploy")).unwrap_err();
        assert!(err.to_string().contains("deploy"));
    }
}
