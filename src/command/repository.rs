//! Publish repositories an upload command may target.

use crate::rejection::{Rejection, Result};
use std::fmt;

/// Repository for template uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateRepository {
    /// `templates-itl`: templates maintained by the core team.
    Itl,
    /// `templates-community`: community-maintained templates.
    Community,
}

impl TemplateRepository {
    /// The repository name as written in commands.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Itl => "templates-itl",
            Self::Community => "templates-community",
        }
    }
}

impl TryFrom<&str> for TemplateRepository {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "templates-itl" => Ok(Self::Itl),
            "templates-community" => Ok(Self::Community),
            _ => Err(Rejection::UnsupportedRepository),
        }
    }
}

impl fmt::Display for TemplateRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository for component uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRepository {
    /// `current`: the stable package repository.
    Current,
    /// `security-testing`: embargoed security fixes.
    SecurityTesting,
}

impl ComponentRepository {
    /// The repository name as written in commands.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::SecurityTesting => "security-testing",
        }
    }
}

impl TryFrom<&str> for ComponentRepository {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "current" => Ok(Self::Current),
            "security-testing" => Ok(Self::SecurityTesting),
            _ => Err(Rejection::UnsupportedRepository),
        }
    }
}

impl fmt::Display for ComponentRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
