//! Validated command fields.
//!
//! Each newtype can only be obtained through its validating constructor, so a
//! value of the type is proof that the token satisfied the grammar.

use crate::rejection::{Rejection, Result};
use std::fmt;

/// Number of digits in a command timestamp (`YYYYMMDDhhmm`).
const TIMESTAMP_LEN: usize = 12;

/// Number of hex digits in a full git commit SHA.
const COMMIT_SHA_LEN: usize = 40;

fn require_non_empty(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(Rejection::EmptyField { field });
    }
    Ok(())
}

fn validate_name(value: &str, field: &'static str) -> Result<()> {
    require_non_empty(value, field)?;
    if value.contains('.') {
        return Err(Rejection::DotInField { field });
    }
    Ok(())
}

/// A Qubes release identifier such as `r4.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Release(String);

impl Release {
    /// Return the release as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Release {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        require_non_empty(value, "release")?;
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A template name such as `fedora-38-xfce`; never contains `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateName(String);

impl TemplateName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for TemplateName {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        validate_name(value, "template name")?;
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A component name such as `app-linux-split-gpg`; never contains `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(String);

impl ComponentName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ComponentName {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        validate_name(value, "component name")?;
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An installation ISO version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsoVersion(String);

impl IsoVersion {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for IsoVersion {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        require_non_empty(value, "ISO version")?;
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for IsoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A twelve-digit `YYYYMMDDhhmm` build timestamp.
///
/// Only the shape is checked: leading zeros are required, and no sign or
/// separator is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    /// Validate a timestamp token; `field` names it in the rejection.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::InvalidTimestamp`] unless `value` is exactly
    /// twelve ASCII digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_command_gate::command::fields::Timestamp;
    ///
    /// assert!(Timestamp::parse("202401010000", "template").is_ok());
    /// assert!(Timestamp::parse("20240101", "template").is_err());
    /// ```
    pub fn parse(value: &str, field: &'static str) -> Result<Self> {
        if value.len() != TIMESTAMP_LEN || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(Rejection::InvalidTimestamp { field });
        }
        Ok(Self(value.to_owned()))
    }

    /// Return the timestamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A built template identifier of the form `RELEASE-TIMESTAMP`.
///
/// Only the timestamp suffix after the last `-` is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateSha {
    value: String,
    timestamp: Timestamp,
}

impl TemplateSha {
    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The timestamp suffix.
    #[must_use]
    pub const fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

impl TryFrom<&str> for TemplateSha {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        let (_, suffix) = value
            .rsplit_once('-')
            .ok_or(Rejection::InvalidTemplateSha)?;
        let timestamp =
            Timestamp::parse(suffix, "template SHA").map_err(|_| Rejection::InvalidTemplateSha)?;
        Ok(Self {
            value: value.to_owned(),
            timestamp,
        })
    }
}

impl fmt::Display for TemplateSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A full forty-character lowercase hexadecimal git commit SHA.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    /// Return the SHA as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CommitSha {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        if value.len() != COMMIT_SHA_LEN {
            return Err(Rejection::CommitShaLength { len: value.len() });
        }
        if !value
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
        {
            return Err(Rejection::CommitShaNotHex);
        }
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a distribution targets dom0 or template VMs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    /// A `host-` distribution.
    Host,
    /// A `vm-` distribution.
    Vm,
}

impl DistributionKind {
    /// The token prefix, including its dash.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Host => "host-",
            Self::Vm => "vm-",
        }
    }
}

/// A single upload target such as `host-fc38` or `vm-bookworm`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Distribution {
    kind: DistributionKind,
    name: String,
}

impl Distribution {
    /// Host or VM.
    #[must_use]
    pub const fn kind(&self) -> DistributionKind {
        self.kind
    }

    /// The name after the prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<&str> for Distribution {
    type Error = Rejection;

    fn try_from(value: &str) -> Result<Self> {
        if value.contains('.') {
            return Err(Rejection::DotInField {
                field: "distribution",
            });
        }
        let (kind, name) = [DistributionKind::Host, DistributionKind::Vm]
            .into_iter()
            .find_map(|kind| value.strip_prefix(kind.prefix()).map(|name| (kind, name)))
            .ok_or(Rejection::DistributionPrefix)?;
        require_non_empty(name, "distribution name")?;
        if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(Rejection::DistributionStart);
        }
        Ok(Self {
            kind,
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.name)
    }
}

/// The distributions an upload applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Distributions {
    /// Every distribution the component is built for.
    All,
    /// An explicit, ordered selection.
    Selected(Vec<Distribution>),
}

impl fmt::Display for Distributions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Selected(dists) => {
                let mut first = true;
                for dist in dists {
                    if !first {
                        f.write_str(" ")?;
                    }
                    write!(f, "{dist}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::twelve_digits("202401010000")]
    #[case::leading_zeros("000000000000")]
    fn accepts_twelve_digit_timestamps(#[case] value: &str) {
        assert!(Timestamp::parse(value, "template").is_ok());
    }

    #[rstest]
    #[case::seven_digits("0230101")]
    #[case::eight_digits("20240101")]
    #[case::thirteen_digits("2024010100000")]
    #[case::letters("20230101abcd")]
    #[case::separator("2024-0101000")]
    #[case::empty("")]
    fn rejects_malformed_timestamps(#[case] value: &str) {
        assert_eq!(
            Timestamp::parse(value, "ISO"),
            Err(Rejection::InvalidTimestamp { field: "ISO" })
        );
    }

    #[rstest]
    #[case::forty_lowercase("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")]
    #[case::digits_and_letters("0123456789abcdef0123456789abcdef01234567")]
    fn accepts_full_lowercase_commit_sha(#[case] value: &str) {
        assert!(CommitSha::try_from(value).is_ok());
    }

    #[rstest]
    #[case::thirty_nine(39)]
    #[case::forty_one(41)]
    #[case::empty(0)]
    fn rejects_commit_sha_of_wrong_length(#[case] len: usize) {
        let value = "a".repeat(len);

        assert_eq!(
            CommitSha::try_from(value.as_str()),
            Err(Rejection::CommitShaLength { len })
        );
    }

    #[rstest]
    #[case::uppercase("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA")]
    #[case::mixed_case("0123456789ABCDEF0123456789abcdef01234567")]
    #[case::non_hex("gggggggggggggggggggggggggggggggggggggggg")]
    fn rejects_non_lowercase_hex_sha(#[case] value: &str) {
        assert_eq!(CommitSha::try_from(value), Err(Rejection::CommitShaNotHex));
    }

    #[test]
    fn template_sha_exposes_timestamp_suffix() {
        let sha = TemplateSha::try_from("4.2.0-202401010000").expect("valid template SHA");

        assert_eq!(sha.timestamp().as_str(), "202401010000");
        assert_eq!(sha.as_str(), "4.2.0-202401010000");
    }

    #[rstest]
    #[case::no_dash("202401010000")]
    #[case::short_suffix("4.2.0-20240101")]
    #[case::suffix_after_last_dash("4.2.0-202401010000-1")]
    fn rejects_template_sha_without_timestamp_suffix(#[case] value: &str) {
        assert_eq!(
            TemplateSha::try_from(value),
            Err(Rejection::InvalidTemplateSha)
        );
    }

    #[rstest]
    #[case::host("host-fc38", DistributionKind::Host, "fc38")]
    #[case::vm("vm-bookworm", DistributionKind::Vm, "bookworm")]
    fn parses_distributions(
        #[case] token: &str,
        #[case] kind: DistributionKind,
        #[case] name: &str,
    ) {
        let dist = Distribution::try_from(token).expect("valid distribution");

        assert_eq!(dist.kind(), kind);
        assert_eq!(dist.name(), name);
        assert_eq!(dist.to_string(), token);
    }

    #[rstest]
    #[case::no_prefix("net-bookworm", Rejection::DistributionPrefix)]
    #[case::bare_prefix("vm-", Rejection::EmptyField { field: "distribution name" })]
    #[case::digit_start("host-38", Rejection::DistributionStart)]
    #[case::uppercase_start("vm-Bookworm", Rejection::DistributionStart)]
    #[case::dotted("vm-fc38.1", Rejection::DotInField { field: "distribution" })]
    #[case::uppercase_prefix("Host-fc38", Rejection::DistributionPrefix)]
    fn rejects_malformed_distributions(#[case] token: &str, #[case] expected: Rejection) {
        assert_eq!(Distribution::try_from(token), Err(expected));
    }

    #[rstest]
    #[case::component_empty("", Rejection::EmptyField { field: "component name" })]
    #[case::component_dot("app.evil", Rejection::DotInField { field: "component name" })]
    fn rejects_bad_component_names(#[case] value: &str, #[case] expected: Rejection) {
        assert_eq!(ComponentName::try_from(value), Err(expected));
    }

    #[test]
    fn release_and_version_may_contain_dots() {
        assert_eq!(Release::try_from("r4.2").expect("release").as_str(), "r4.2");
        assert_eq!(
            IsoVersion::try_from("4.2.1-rc1").expect("version").as_str(),
            "4.2.1-rc1"
        );
    }

    #[test]
    fn template_name_rejects_dot() {
        assert_eq!(
            TemplateName::try_from("fedora-38.xfce"),
            Err(Rejection::DotInField {
                field: "template name"
            })
        );
    }

    #[test]
    fn selected_distributions_display_in_order() {
        let dists = Distributions::Selected(vec![
            Distribution::try_from("vm-bookworm").expect("valid"),
            Distribution::try_from("host-fc38").expect("valid"),
        ]);

        assert_eq!(dists.to_string(), "vm-bookworm host-fc38");
    }
}
