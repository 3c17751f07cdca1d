//! The single rejection kind produced by every validation stage.
//!
//! A request is either accepted as a whole or rejected with exactly one
//! [`Rejection`]. Each variant names the constraint that failed; the
//! `Display` text is the reason printed in the one-line diagnostic.

use crate::envelope::HashAlgorithm;
use thiserror::Error;

/// Reasons a signed command is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    // Envelope framing.
    /// More than the permitted number of bytes arrived on the input.
    #[error("command too long")]
    InputTooLong,

    /// The message is shorter than the smallest well-formed request.
    #[error("message too short")]
    MessageTooShort,

    /// The message does not open with the clear-sign header.
    #[error("invalid clear-sign header")]
    InvalidHeader,

    /// The `Hash:` header is not one of the accepted algorithms, or is
    /// followed by further armor headers.
    #[error("unsupported or malformed hash header")]
    InvalidHashHeader,

    /// The message does not end with a newline.
    #[error("message does not end with a newline")]
    MissingTrailingNewline,

    // Command grammar.
    /// The command line exceeds the length cap.
    #[error("command line exceeds {max} bytes")]
    CommandLineTooLong {
        /// The permitted maximum.
        max: usize,
    },

    /// A byte outside the command alphabet was found.
    #[error("disallowed character 0x{byte:02x} in command")]
    DisallowedCharacter {
        /// The offending byte.
        byte: u8,
    },

    /// Two spaces appear back to back.
    #[error("double space in command")]
    DoubleSpace,

    /// A space is immediately followed by `-`.
    #[error("space followed by '-' in command")]
    SpaceDash,

    /// The command ends with a space.
    #[error("trailing space in command")]
    TrailingSpace,

    /// The command does not start with a known command keyword.
    #[error("unknown command")]
    UnknownCommand,

    /// The command has the wrong number of arguments for its kind.
    #[error("wrong number of arguments for {command}")]
    WrongArgumentCount {
        /// The command keyword.
        command: &'static str,
    },

    /// A required field is empty.
    #[error("empty {field}")]
    EmptyField {
        /// Name of the field.
        field: &'static str,
    },

    /// A field that must not contain `.` does.
    #[error("'.' not allowed in {field}")]
    DotInField {
        /// Name of the field.
        field: &'static str,
    },

    /// A timestamp is not exactly twelve ASCII digits.
    #[error("{field} timestamp must be exactly 12 digits")]
    InvalidTimestamp {
        /// Name of the field carrying the timestamp.
        field: &'static str,
    },

    /// A template SHA does not end in `-TIMESTAMP`.
    #[error("template SHA must end with '-' and a 12-digit timestamp")]
    InvalidTemplateSha,

    /// A commit SHA is not exactly forty characters.
    #[error("wrong commit SHA length: expected 40, got {len}")]
    CommitShaLength {
        /// Length of the rejected value.
        len: usize,
    },

    /// A commit SHA contains something other than lowercase hex.
    #[error("commit SHA must be lowercase hexadecimal")]
    CommitShaNotHex,

    /// The target repository is not one the command kind may publish to.
    #[error("unsupported repository name")]
    UnsupportedRepository,

    /// A distribution lacks the `host-` or `vm-` prefix.
    #[error("distribution must start with 'host-' or 'vm-'")]
    DistributionPrefix,

    /// A distribution name does not start with a lowercase ASCII letter.
    #[error("distribution name must start with a lowercase letter")]
    DistributionStart,

    // Signature armor.
    /// The armored signature does not open with the exact header and blank
    /// line.
    #[error("invalid start of signature")]
    InvalidSignatureStart,

    /// The armored signature does not close with the exact footer.
    #[error("invalid end of signature")]
    InvalidSignatureEnd,

    /// The `=CRC` line is missing or misplaced.
    #[error("missing or misplaced CRC24 line")]
    MissingCrc,

    /// The CRC24 characters are not valid base64.
    #[error("malformed base64 in CRC24")]
    MalformedCrc,

    /// The transmitted CRC24 does not match the signature bytes.
    #[error("CRC24 checksum mismatch")]
    CrcMismatch,

    /// The base64 body is shorter than any valid signature.
    #[error("signature too short")]
    SignatureTooShort,

    /// The base64 body length is not a multiple of four.
    #[error("base64 signature length is not a multiple of 4")]
    Base64Length,

    /// The symbol before the padding leaves residual bits.
    #[error("non-canonical base64 padding")]
    NonCanonicalPadding,

    /// The base64 body contains a symbol outside the alphabet.
    #[error("malformed base64 in signature")]
    MalformedBase64,

    // Signature packet.
    /// No packet bytes were decoded.
    #[error("empty signature packet")]
    EmptyPacket,

    /// The packet tag octet does not have its high bit set.
    #[error("invalid packet header")]
    InvalidPacketHeader,

    /// The packet header is cut short.
    #[error("truncated packet header")]
    TruncatedPacketHeader,

    /// An old-format packet uses the indeterminate length type.
    #[error("indeterminate packet length not supported")]
    IndeterminateLength,

    /// A new-format packet uses partial body lengths.
    #[error("partial packet length not supported")]
    PartialLength,

    /// The declared packet length differs from the bytes present.
    #[error("packet length does not match signature size")]
    PacketLengthMismatch,

    /// The packet is not a signature packet.
    #[error("not a signature packet (tag {tag})")]
    NotASignaturePacket {
        /// The decoded packet tag.
        tag: u8,
    },

    /// The signature body is too short to hold its fixed fields.
    #[error("truncated signature packet")]
    TruncatedSignature,

    /// The signature packet version is not 4.
    #[error("unsupported signature version {version}")]
    UnsupportedSignatureVersion {
        /// The decoded version.
        version: u8,
    },

    /// The signature is not a canonical text-document signature.
    #[error("unsupported signature type {sig_type}")]
    UnsupportedSignatureType {
        /// The decoded signature type.
        sig_type: u8,
    },

    /// The signature names a hash algorithm outside SHA-256/384/512.
    #[error("unsupported hash algorithm {id}")]
    UnsupportedHashAlgorithm {
        /// The decoded algorithm identifier.
        id: u8,
    },

    /// The armor header and the signature packet disagree on the hash.
    #[error("hash algorithm mismatch: header declares {declared}, signature uses {signed}")]
    HashAlgorithmMismatch {
        /// Algorithm named in the `Hash:` header.
        declared: HashAlgorithm,
        /// Algorithm recorded in the signature packet.
        signed: HashAlgorithm,
    },
}

/// Result type alias using [`Rejection`].
pub type Result<T> = std::result::Result<T, Rejection>;
