//! Clear-sign envelope framing.
//!
//! The envelope is matched against fixed literals only: the clear-sign
//! header, a single `Hash:` armor header naming one of three algorithms, and
//! a blank line. Any other armor header would move the start of the signed
//! text, so none is accepted. What follows is split on the first newline into
//! the command line and the armored signature.

use crate::armor::MIN_ARMORED_LEN;
use crate::command::SHORTEST_COMMAND_LEN;
use crate::rejection::{Rejection, Result};
use std::fmt;

/// Largest accepted message, in bytes.
pub const MAX_INPUT_LEN: usize = 8192;

/// Clear-sign header up to and including the `Hash: ` key.
const CLEARSIGN_HEADER: &[u8] = b"-----BEGIN PGP SIGNED MESSAGE-----\nHash: ";

/// Width of every accepted hash algorithm token (`SHA256`, `SHA384`, `SHA512`).
const HASH_TOKEN_LEN: usize = 6;

/// End of the `Hash:` line followed by the blank line closing the headers.
const HEADER_TERMINATOR: &[u8] = b"\n\n";

/// Smallest message that could possibly be valid.
pub const MIN_MESSAGE_LEN: usize = CLEARSIGN_HEADER.len()
    + HASH_TOKEN_LEN
    + HEADER_TERMINATOR.len()
    + SHORTEST_COMMAND_LEN
    + 1
    + MIN_ARMORED_LEN;

/// Hash algorithms a request may be signed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256 (OpenPGP id 8).
    Sha256,
    /// SHA-384 (OpenPGP id 9).
    Sha384,
    /// SHA-512 (OpenPGP id 10).
    Sha512,
}

impl HashAlgorithm {
    /// Resolve the six-byte token from the `Hash:` armor header.
    fn from_armor_token(token: &[u8; HASH_TOKEN_LEN]) -> Option<Self> {
        match token {
            b"SHA256" => Some(Self::Sha256),
            b"SHA384" => Some(Self::Sha384),
            b"SHA512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Resolve an OpenPGP hash algorithm identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_command_gate::envelope::HashAlgorithm;
    ///
    /// assert_eq!(HashAlgorithm::from_packet_id(10), Some(HashAlgorithm::Sha512));
    /// assert_eq!(HashAlgorithm::from_packet_id(2), None);
    /// ```
    #[must_use]
    pub const fn from_packet_id(id: u8) -> Option<Self> {
        match id {
            8 => Some(Self::Sha256),
            9 => Some(Self::Sha384),
            10 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// The OpenPGP identifier for this algorithm.
    #[must_use]
    pub const fn packet_id(self) -> u8 {
        match self {
            Self::Sha256 => 8,
            Self::Sha384 => 9,
            Self::Sha512 => 10,
        }
    }

    /// The name used in the `Hash:` armor header.
    #[must_use]
    pub const fn armor_name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.armor_name())
    }
}

/// A framed request: declared hash, command line and armored signature.
///
/// Both byte slices borrow from the original message and are separated in it
/// by exactly one newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    hash_algorithm: HashAlgorithm,
    command: &'a [u8],
    armored_signature: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Frame a complete message.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the message is too long or too short,
    /// does not carry the exact clear-sign header and `Hash:` line, or does
    /// not end with a newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_command_gate::envelope::Envelope;
    /// use build_command_gate::Rejection;
    ///
    /// let result = Envelope::frame(b"Build-iso r4.2 4.2.1 202401010000\n");
    /// assert_eq!(result.unwrap_err(), Rejection::InvalidHeader);
    /// ```
    pub fn frame(message: &'a [u8]) -> Result<Self> {
        if message.len() > MAX_INPUT_LEN {
            return Err(Rejection::InputTooLong);
        }
        let after_header = message
            .strip_prefix(CLEARSIGN_HEADER)
            .ok_or(Rejection::InvalidHeader)?;
        let (token, after_token) = after_header
            .split_first_chunk::<HASH_TOKEN_LEN>()
            .ok_or(Rejection::InvalidHashHeader)?;
        let hash_algorithm =
            HashAlgorithm::from_armor_token(token).ok_or(Rejection::InvalidHashHeader)?;
        let text = after_token
            .strip_prefix(HEADER_TERMINATOR)
            .ok_or(Rejection::InvalidHashHeader)?;

        if message.len() < MIN_MESSAGE_LEN {
            return Err(Rejection::MessageTooShort);
        }
        if !message.ends_with(b"\n") {
            return Err(Rejection::MissingTrailingNewline);
        }

        // The trailing newline guarantees a split point exists.
        let newline = text
            .iter()
            .position(|&byte| byte == b'\n')
            .ok_or(Rejection::MissingTrailingNewline)?;
        let (command, rest) = text.split_at(newline);
        let armored_signature = rest
            .strip_prefix(b"\n")
            .ok_or(Rejection::MissingTrailingNewline)?;

        Ok(Self {
            hash_algorithm,
            command,
            armored_signature,
        })
    }

    /// The algorithm declared in the `Hash:` header.
    #[must_use]
    pub const fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// The signed command line, without its newline.
    #[must_use]
    pub const fn command(&self) -> &'a [u8] {
        self.command
    }

    /// The armored signature block, including its trailing newline.
    #[must_use]
    pub const fn armored_signature(&self) -> &'a [u8] {
        self.armored_signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn message(hash: &str, command: &str, signature: &[u8]) -> Vec<u8> {
        let mut out = format!(
            "-----BEGIN PGP SIGNED MESSAGE-----\nHash: {hash}\n\n{command}\n"
        )
        .into_bytes();
        out.extend_from_slice(signature);
        out
    }

    fn filler_signature() -> Vec<u8> {
        let mut signature = b"-----BEGIN PGP SIGNATURE-----\n\n".to_vec();
        signature.extend(std::iter::repeat_n(b'A', 120));
        signature.extend_from_slice(b"\n=AAAA\n-----END PGP SIGNATURE-----\n");
        signature
    }

    #[rstest]
    #[case::sha256("SHA256", HashAlgorithm::Sha256)]
    #[case::sha384("SHA384", HashAlgorithm::Sha384)]
    #[case::sha512("SHA512", HashAlgorithm::Sha512)]
    fn frames_each_supported_hash(#[case] token: &str, #[case] expected: HashAlgorithm) {
        let signature = filler_signature();
        let input = message(token, "Build-iso r4.2 4.2.1 202401010000", &signature);

        let envelope = Envelope::frame(&input).expect("well-formed envelope");

        assert_eq!(envelope.hash_algorithm(), expected);
        assert_eq!(envelope.command(), b"Build-iso r4.2 4.2.1 202401010000");
        assert_eq!(envelope.armored_signature(), signature.as_slice());
    }

    #[rstest]
    #[case::sha1("SHA1\n\n")]
    #[case::lowercase("sha256")]
    #[case::sha224("SHA224")]
    fn rejects_unknown_hash_tokens(#[case] token: &str) {
        let input = message(token, "Build-iso r4.2 4.2.1 202401010000", &filler_signature());

        assert_eq!(Envelope::frame(&input), Err(Rejection::InvalidHashHeader));
    }

    #[test]
    fn rejects_additional_armor_header() {
        let input = message(
            "SHA256\nComment: extra",
            "Build-iso r4.2 4.2.1 202401010000",
            &filler_signature(),
        );

        assert_eq!(Envelope::frame(&input), Err(Rejection::InvalidHashHeader));
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::leading_space(b" -----BEGIN PGP SIGNED MESSAGE-----\nHash: SHA256\n\n".as_slice())]
    #[case::crlf(b"-----BEGIN PGP SIGNED MESSAGE-----\r\nHash: SHA256\r\n\r\n".as_slice())]
    #[case::signature_block(b"-----BEGIN PGP SIGNATURE-----\n\n".as_slice())]
    fn rejects_missing_clearsign_header(#[case] input: &[u8]) {
        assert_eq!(Envelope::frame(input), Err(Rejection::InvalidHeader));
    }

    #[test]
    fn rejects_message_without_trailing_newline() {
        let mut input = message("SHA256", "Build-iso r4.2 4.2.1 202401010000", &filler_signature());
        input.pop();

        assert_eq!(
            Envelope::frame(&input),
            Err(Rejection::MissingTrailingNewline)
        );
    }

    #[test]
    fn rejects_message_below_minimum_length() {
        let input = message("SHA256", "Build-iso a b 202401010000", b"short\n");

        assert_eq!(Envelope::frame(&input), Err(Rejection::MessageTooShort));
    }

    #[test]
    fn rejects_oversized_message() {
        let mut input = message("SHA256", "Build-iso r4.2 4.2.1 202401010000", &filler_signature());
        input.resize(MAX_INPUT_LEN + 1, b'\n');

        assert_eq!(Envelope::frame(&input), Err(Rejection::InputTooLong));
    }

    #[test]
    fn splits_on_first_newline_only() {
        let signature = filler_signature();
        let input = message("SHA512", "Build-iso r4.2 4.2.1 202401010000", &signature);

        let envelope = Envelope::frame(&input).expect("well-formed envelope");

        assert!(!envelope.command().contains(&b'\n'));
        assert!(envelope.armored_signature().ends_with(b"\n"));
    }

    #[test]
    fn minimum_length_covers_every_part() {
        assert_eq!(MIN_MESSAGE_LEN, 230);
    }
}
