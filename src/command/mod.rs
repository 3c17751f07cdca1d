//! Command grammar.
//!
//! A command is one line of text: a keyword followed by space-separated
//! fields. Parsing runs the byte-level [`charset`] checks first, then
//! dispatches on the exact keyword and validates each field into a
//! [`fields`] newtype. There is no fallback command.
//!
//! # Sub-modules
//!
//! - [`charset`]: alphabet, spacing and length rules.
//! - [`fields`]: validated field newtypes.
//! - [`repository`]: publish repository enums.

pub mod charset;
pub mod fields;
pub mod repository;

use self::fields::{
    CommitSha, ComponentName, Distribution, Distributions, IsoVersion, Release, TemplateName,
    TemplateSha, Timestamp,
};
use self::repository::{ComponentRepository, TemplateRepository};
use crate::rejection::{Rejection, Result};
use std::fmt;

/// Length of the shortest command the grammar admits
/// (`Build-iso R V YYYYMMDDhhmm`).
pub const SHORTEST_COMMAND_LEN: usize = CommandKind::BuildIso.keyword().len() + 1 + 4 + 12;

/// The four command kinds, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `Build-template`.
    BuildTemplate,
    /// `Upload-template`.
    UploadTemplate,
    /// `Upload-component`.
    UploadComponent,
    /// `Build-iso`.
    BuildIso,
}

impl CommandKind {
    const ALL: [Self; 4] = [
        Self::BuildTemplate,
        Self::UploadTemplate,
        Self::UploadComponent,
        Self::BuildIso,
    ];

    /// The keyword that opens the command line.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::BuildTemplate => "Build-template",
            Self::UploadTemplate => "Upload-template",
            Self::UploadComponent => "Upload-component",
            Self::BuildIso => "Build-iso",
        }
    }

    /// The build dispatcher action this command maps to.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::BuildTemplate => "build-template",
            Self::UploadTemplate => "upload-template",
            Self::UploadComponent => "upload-component",
            Self::BuildIso => "build-iso",
        }
    }

    /// Strip `<keyword> ` from `text`, returning the matching kind and the
    /// argument string.
    fn split(text: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|kind| {
            text.strip_prefix(kind.keyword())
                .and_then(|rest| rest.strip_prefix(' '))
                .map(|args| (kind, args))
        })
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A fully validated build command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build a template.
    BuildTemplate {
        /// Target release.
        release: Release,
        /// Template to build.
        template: TemplateName,
        /// Build timestamp.
        timestamp: Timestamp,
    },
    /// Publish a built template.
    UploadTemplate {
        /// Target release.
        release: Release,
        /// Template to publish.
        template: TemplateName,
        /// Identifier of the template build (`RELEASE-TIMESTAMP`).
        template_sha: TemplateSha,
        /// Destination repository.
        repo: TemplateRepository,
    },
    /// Publish a built component.
    UploadComponent {
        /// Target release.
        release: Release,
        /// Component to publish.
        component: ComponentName,
        /// Commit the packages were built from.
        commit_sha: CommitSha,
        /// Destination repository.
        repo: ComponentRepository,
        /// Distributions to publish.
        dists: Distributions,
    },
    /// Build an installation ISO.
    BuildIso {
        /// Target release.
        release: Release,
        /// ISO version.
        version: IsoVersion,
        /// Build timestamp.
        timestamp: Timestamp,
    },
}

impl Command {
    /// Parse a command line (without its newline).
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] describing the first grammar rule the command
    /// breaks.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_command_gate::command::{Command, CommandKind};
    ///
    /// let command = Command::parse(b"Build-template r4.2 fedora-38-xfce 202401010000")
    ///     .expect("valid command");
    /// assert_eq!(command.kind(), CommandKind::BuildTemplate);
    /// assert_eq!(command.timestamp().map(|t| t.as_str()), Some("202401010000"));
    /// ```
    pub fn parse(line: &[u8]) -> Result<Self> {
        let text = charset::check(line)?;
        let (kind, args) = CommandKind::split(text).ok_or(Rejection::UnknownCommand)?;
        match kind {
            CommandKind::BuildTemplate => parse_build_template(args),
            CommandKind::UploadTemplate => parse_upload_template(args),
            CommandKind::UploadComponent => parse_upload_component(args),
            CommandKind::BuildIso => parse_build_iso(args),
        }
    }

    /// The kind of this command.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::BuildTemplate { .. } => CommandKind::BuildTemplate,
            Self::UploadTemplate { .. } => CommandKind::UploadTemplate,
            Self::UploadComponent { .. } => CommandKind::UploadComponent,
            Self::BuildIso { .. } => CommandKind::BuildIso,
        }
    }

    /// The release every command targets.
    #[must_use]
    pub const fn release(&self) -> &Release {
        match self {
            Self::BuildTemplate { release, .. }
            | Self::UploadTemplate { release, .. }
            | Self::UploadComponent { release, .. }
            | Self::BuildIso { release, .. } => release,
        }
    }

    /// The timestamp the dispatcher attaches to the build.
    ///
    /// Template uploads take it from the suffix of the template SHA;
    /// component uploads have none.
    #[must_use]
    pub const fn timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::BuildTemplate { timestamp, .. } | Self::BuildIso { timestamp, .. } => {
                Some(timestamp)
            }
            Self::UploadTemplate { template_sha, .. } => Some(template_sha.timestamp()),
            Self::UploadComponent { .. } => None,
        }
    }

    /// The repository an upload publishes to.
    #[must_use]
    pub const fn repository(&self) -> Option<&'static str> {
        match self {
            Self::UploadTemplate { repo, .. } => Some(repo.as_str()),
            Self::UploadComponent { repo, .. } => Some(repo.as_str()),
            Self::BuildTemplate { .. } | Self::BuildIso { .. } => None,
        }
    }

    /// One-line summary of what the dispatcher will be asked to do.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut summary = format!("{} release={}", self.kind().action(), self.release());
        if let Some(repo) = self.repository() {
            summary.push_str(" repository=");
            summary.push_str(repo);
        }
        if let Some(timestamp) = self.timestamp() {
            summary.push_str(" timestamp=");
            summary.push_str(timestamp.as_str());
        }
        summary
    }
}

/// Renders the command line. Tokens after `all` in a component upload are
/// not part of the parsed command and are not rendered.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.kind().keyword();
        match self {
            Self::BuildTemplate {
                release,
                template,
                timestamp,
            } => write!(f, "{keyword} {release} {template} {timestamp}"),
            Self::UploadTemplate {
                release,
                template,
                template_sha,
                repo,
            } => write!(f, "{keyword} {release} {template} {template_sha} {repo}"),
            Self::UploadComponent {
                release,
                component,
                commit_sha,
                repo,
                dists,
            } => write!(f, "{keyword} {release} {component} {commit_sha} {repo} {dists}"),
            Self::BuildIso {
                release,
                version,
                timestamp,
            } => write!(f, "{keyword} {release} {version} {timestamp}"),
        }
    }
}

/// Split `args` into exactly `N` fields.
fn exact_fields<const N: usize>(args: &str, kind: CommandKind) -> Result<[&str; N]> {
    let fields: Vec<&str> = args.split(' ').collect();
    <[&str; N]>::try_from(fields).map_err(|_| Rejection::WrongArgumentCount {
        command: kind.keyword(),
    })
}

fn parse_build_template(args: &str) -> Result<Command> {
    let [release, template, timestamp] = exact_fields(args, CommandKind::BuildTemplate)?;
    Ok(Command::BuildTemplate {
        release: Release::try_from(release)?,
        template: TemplateName::try_from(template)?,
        timestamp: Timestamp::parse(timestamp, "template")?,
    })
}

fn parse_upload_template(args: &str) -> Result<Command> {
    let [release, template, template_sha, repo] = exact_fields(args, CommandKind::UploadTemplate)?;
    Ok(Command::UploadTemplate {
        release: Release::try_from(release)?,
        template: TemplateName::try_from(template)?,
        template_sha: TemplateSha::try_from(template_sha)?,
        repo: TemplateRepository::try_from(repo)?,
    })
}

fn parse_upload_component(args: &str) -> Result<Command> {
    let fields: Vec<&str> = args.split(' ').collect();
    let [release, component, commit_sha, repo, first_dist, more_dists @ ..] = fields.as_slice()
    else {
        return Err(Rejection::WrongArgumentCount {
            command: CommandKind::UploadComponent.keyword(),
        });
    };
    let release = Release::try_from(*release)?;
    let component = ComponentName::try_from(*component)?;
    let commit_sha = CommitSha::try_from(*commit_sha)?;
    let repo = ComponentRepository::try_from(*repo)?;
    let dists = if *first_dist == "all" {
        Distributions::All
    } else {
        let selected = std::iter::once(first_dist)
            .chain(more_dists)
            .map(|token| Distribution::try_from(*token))
            .collect::<Result<Vec<_>>>()?;
        Distributions::Selected(selected)
    };
    Ok(Command::UploadComponent {
        release,
        component,
        commit_sha,
        repo,
        dists,
    })
}

fn parse_build_iso(args: &str) -> Result<Command> {
    let [release, version, timestamp] = exact_fields(args, CommandKind::BuildIso)?;
    Ok(Command::BuildIso {
        release: Release::try_from(release)?,
        version: IsoVersion::try_from(version)?,
        timestamp: Timestamp::parse(timestamp, "ISO")?,
    })
}
