//! Domain value objects: ModuleName, Prefix, Stage, Layout, GuardRule.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! Validated newtypes (`ModuleName`, `Prefix`) can only be constructed
//! through their checked constructors, so everything downstream can assume
//! a name is usable as both a path component and an include-path segment.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns the reason a string is unusable as a single path component.
fn component_problem(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("cannot be empty");
    }
    if value == "." || value == ".." {
        return Some("cannot be '.' or '..'");
    }
    if value.contains('/') || value.contains('\\') {
        return Some("cannot contain path separators");
    }
    if value.chars().any(char::is_control) {
        return Some("cannot contain control characters");
    }
    None
}

// ── ModuleName ───────────────────────────────────────────────────────────────

/// Name of the module being scaffolded.
///
/// Used verbatim (case preserved) as the directory segment of include paths
/// (`"<name>/pub_consts.h"`) and as the stem of the export header and source
/// template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        match component_problem(&name) {
            Some(reason) => Err(DomainError::InvalidModuleName {
                name,
                reason: reason.into(),
            }),
            None => Ok(Self(name)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Prefix ───────────────────────────────────────────────────────────────────

/// Filename prefix shared by every file of one tier (`pub`, `priv`, or a
/// custom prefix in add mode).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Prefix(String);

impl Prefix {
    pub const PUBLIC: &'static str = "pub";
    pub const PRIVATE: &'static str = "priv";

    pub fn new(prefix: impl Into<String>) -> Result<Self, DomainError> {
        let prefix = prefix.into();
        match component_problem(&prefix) {
            Some(reason) => Err(DomainError::InvalidPrefix {
                prefix,
                reason: reason.into(),
            }),
            None => Ok(Self(prefix)),
        }
    }

    /// The default first-tier prefix.
    pub fn public() -> Self {
        Self(Self::PUBLIC.to_string())
    }

    /// The second-tier prefix of the pyramid flow.
    pub fn private() -> Self {
        Self(Self::PRIVATE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self::public()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Stage ────────────────────────────────────────────────────────────────────

/// One link of a tier chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Consts,
    Types,
    Inlines,
    /// Per-tier export collector, only present in the collector layout.
    Includes,
}

impl Stage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Consts => "consts",
            Self::Types => "types",
            Self::Inlines => "inlines",
            Self::Includes => "includes",
        }
    }

    /// Logical filename of this stage for a tier prefix, e.g. `pub_types.h`.
    pub fn file_name(&self, prefix: &Prefix) -> String {
        format!("{}_{}.h", prefix, self.as_str())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Shape of a pyramid tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// consts → types → inlines.
    #[default]
    Compact,
    /// consts → types → inlines → includes (the historical 8-file pipeline).
    #[serde(alias = "legacy")]
    Collector,
}

impl Layout {
    const COMPACT: &'static [Stage] = &[Stage::Consts, Stage::Types, Stage::Inlines];
    const COLLECTOR: &'static [Stage] =
        &[Stage::Consts, Stage::Types, Stage::Inlines, Stage::Includes];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Collector => "collector",
        }
    }

    pub const fn stages(&self) -> &'static [Stage] {
        match self {
            Self::Compact => Self::COMPACT,
            Self::Collector => Self::COLLECTOR,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── GuardRule ────────────────────────────────────────────────────────────────

/// How non-letter bytes of an include path are normalized into a guard token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardRule {
    /// Every byte that is not an ASCII letter becomes `_`, digits included.
    #[default]
    LettersOnly,
    /// ASCII digits are kept; every other non-letter byte becomes `_`.
    KeepDigits,
}

impl GuardRule {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LettersOnly => "letters-only",
            Self::KeepDigits => "keep-digits",
        }
    }

    /// Normalize one byte of an include path.
    pub const fn map_byte(&self, b: u8) -> u8 {
        match b {
            b'A'..=b'Z' => b,
            b'a'..=b'z' => b.to_ascii_uppercase(),
            b'0'..=b'9' if matches!(self, Self::KeepDigits) => b,
            _ => b'_',
        }
    }
}

impl fmt::Display for GuardRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── FileKind / FileRole ──────────────────────────────────────────────────────

/// Whether a planned file carries an include guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Include,
    Source,
}

/// What a planned file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "role", content = "stage")]
pub enum FileRole {
    Tier(Stage),
    ExportHeader,
    Source,
}

impl FileRole {
    pub const fn kind(&self) -> FileKind {
        match self {
            Self::Tier(_) | Self::ExportHeader => FileKind::Include,
            Self::Source => FileKind::Source,
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tier(stage) => write!(f, "{stage}"),
            Self::ExportHeader => f.write_str("export header"),
            Self::Source => f.write_str("source"),
        }
    }
}
