//! Version constraint expressions.
//!
//! The grammar is semver's `VersionReq` (comma-separated comparators,
//! ANDed) with two additions:
//! - `~> X.Y` pessimistic terms: at least `X.Y`, below the next release of
//!   the second-to-last given component (`~> 1.2` is `>= 1.2.0, < 2.0.0`,
//!   `~> 1.2.3` is `>= 1.2.3, < 1.3.0`)
//! - `!= X.Y.Z` exclusion terms
//!
//! Operands of `=`, `!=`, `>`, `>=`, `<`, `<=` and `~>` are zero-padded the
//! same way tags are (`> 1.2` is `> 1.2.0`), and a bare version means `=`.
//! `^`, `~` and wildcard terms keep semver's meaning.

use std::fmt;
use std::str::FromStr;

use pinner_util::errors::PinnerError;
use semver::{Version, VersionReq};
use serde::{Serialize, Serializer};

use crate::version::{numeric_core, parse_lenient, precedence, VersionTag};

/// A parsed constraint, remembering the text it was written as.
#[derive(Debug, Clone)]
pub struct Constraint {
    expression: String,
    req: VersionReq,
    excluded: Vec<Version>,
}

impl Constraint {
    /// Parse a constraint expression, failing with `MalformedConstraint`.
    pub fn parse(expression: &str) -> Result<Self, PinnerError> {
        let malformed = |message: String| PinnerError::MalformedConstraint {
            expression: expression.to_string(),
            message,
        };

        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(malformed("empty constraint".to_string()));
        }

        let mut comparators = Vec::new();
        let mut excluded = Vec::new();
        for term in trimmed.split(',').map(str::trim) {
            if term.is_empty() {
                return Err(malformed("empty term between commas".to_string()));
            }
            if let Some(rest) = term.strip_prefix("~>") {
                let (lower, upper) = pessimistic_bounds(rest.trim())
                    .ok_or_else(|| malformed(format!("invalid pessimistic term '{term}'")))?;
                comparators.push(comparator(">=", &lower));
                comparators.push(comparator("<", &upper));
            } else if let Some(rest) = term.strip_prefix("!=") {
                let version = parse_lenient(rest.trim())
                    .ok_or_else(|| malformed(format!("invalid version in '{term}'")))?;
                excluded.push(version);
            } else if let Some((op, operand)) = split_operator(term) {
                let version = parse_lenient(operand)
                    .ok_or_else(|| malformed(format!("invalid version in '{term}'")))?;
                comparators.push(comparator(op, &version));
            } else if let Some(version) = parse_lenient(term) {
                comparators.push(comparator("=", &version));
            } else {
                comparators.push(term.to_string());
            }
        }

        let req = if comparators.is_empty() {
            VersionReq::STAR
        } else {
            VersionReq::parse(&comparators.join(", ")).map_err(|e| malformed(e.to_string()))?
        };

        Ok(Self {
            expression: trimmed.to_string(),
            req,
            excluded,
        })
    }

    /// The expression as written (trimmed).
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.req.matches(version)
            && !self
                .excluded
                .iter()
                .any(|x| precedence(x, version).is_eq())
    }

    pub fn matches_tag(&self, tag: &VersionTag) -> bool {
        self.matches(&tag.version)
    }
}

/// Split a plain comparison term into operator and trimmed operand.
fn split_operator(term: &str) -> Option<(&str, &str)> {
    [">=", "<=", "=", ">", "<"]
        .into_iter()
        .find_map(|op| term.strip_prefix(op).map(|rest| (op, rest.trim())))
}

/// A semver comparator on the full `X.Y.Z[-pre]` form of `version`.
fn comparator(op: &str, version: &Version) -> String {
    let mut text = format!("{op}{}.{}.{}", version.major, version.minor, version.patch);
    if !version.pre.is_empty() {
        text.push('-');
        text.push_str(version.pre.as_str());
    }
    text
}

/// Lower and upper bound of a `~>` operand.
fn pessimistic_bounds(operand: &str) -> Option<(Version, Version)> {
    let split = operand
        .find(|c| c == '-' || c == '+')
        .unwrap_or(operand.len());
    let parts = numeric_core(&operand[..split])?;
    let lower = parse_lenient(operand)?;
    let upper = match parts.len() {
        1 | 2 => Version::new(lower.major.checked_add(1)?, 0, 0),
        _ => Version::new(lower.major, lower.minor.checked_add(1)?, 0),
    };
    Some((lower, upper))
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl FromStr for Constraint {
    type Err = PinnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for Constraint {}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.expression)
    }
}
