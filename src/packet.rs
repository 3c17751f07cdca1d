//! OpenPGP signature packet framing.
//!
//! The decoded armor body must hold exactly one packet. Header decoding is a
//! closed match over the length encodings that can be framed unambiguously;
//! indeterminate (old format) and partial (new format) lengths are refused.

use crate::envelope::HashAlgorithm;
use crate::rejection::{Rejection, Result};

/// Tag of an OpenPGP signature packet.
pub const SIGNATURE_TAG: u8 = 2;

/// The only signature packet version accepted.
pub const SIGNATURE_VERSION: u8 = 4;

/// Signature type of a canonical text document.
pub const TEXT_SIGNATURE: u8 = 1;

/// Bit set on every valid packet tag octet.
const TAG_MARKER: u8 = 0x80;

/// Bit selecting the new packet format.
const NEW_FORMAT: u8 = 0x40;

/// A framed packet: its tag and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Packet<'a> {
    tag: u8,
    body: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Frame `bytes` as a single packet with no trailing data.
    fn frame(bytes: &'a [u8]) -> Result<Self> {
        let (&tag_octet, rest) = bytes.split_first().ok_or(Rejection::EmptyPacket)?;
        if tag_octet & TAG_MARKER == 0 {
            return Err(Rejection::InvalidPacketHeader);
        }
        let (tag, length, body) = if tag_octet & NEW_FORMAT == 0 {
            let (length, body) = old_format_length(tag_octet & 0x03, rest)?;
            ((tag_octet >> 2) & 0x0F, length, body)
        } else {
            let (length, body) = new_format_length(rest)?;
            (tag_octet & 0x3F, length, body)
        };
        if length != body.len() {
            return Err(Rejection::PacketLengthMismatch);
        }
        Ok(Self { tag, body })
    }
}

/// Decode an old-format length field selected by the two length-type bits.
fn old_format_length(length_type: u8, rest: &[u8]) -> Result<(usize, &[u8])> {
    match length_type {
        0 => {
            let (&[len], body) = rest
                .split_first_chunk::<1>()
                .ok_or(Rejection::TruncatedPacketHeader)?;
            Ok((usize::from(len), body))
        }
        1 => {
            let (&len, body) = rest
                .split_first_chunk::<2>()
                .ok_or(Rejection::TruncatedPacketHeader)?;
            Ok((usize::from(u16::from_be_bytes(len)), body))
        }
        2 => {
            let (&len, body) = rest
                .split_first_chunk::<4>()
                .ok_or(Rejection::TruncatedPacketHeader)?;
            Ok((to_usize(u32::from_be_bytes(len))?, body))
        }
        3 => Err(Rejection::IndeterminateLength),
        _ => Err(Rejection::InvalidPacketHeader),
    }
}

/// Decode a new-format length field.
fn new_format_length(rest: &[u8]) -> Result<(usize, &[u8])> {
    let (&first, after_first) = rest
        .split_first()
        .ok_or(Rejection::TruncatedPacketHeader)?;
    match first {
        0..=191 => Ok((usize::from(first), after_first)),
        192..=223 => {
            let (&second, body) = after_first
                .split_first()
                .ok_or(Rejection::TruncatedPacketHeader)?;
            let length = ((usize::from(first) - 192) << 8) + usize::from(second) + 192;
            Ok((length, body))
        }
        224..=254 => Err(Rejection::PartialLength),
        255 => {
            let (&len, body) = after_first
                .split_first_chunk::<4>()
                .ok_or(Rejection::TruncatedPacketHeader)?;
            Ok((to_usize(u32::from_be_bytes(len))?, body))
        }
    }
}

fn to_usize(length: u32) -> Result<usize> {
    usize::try_from(length).map_err(|_| Rejection::PacketLengthMismatch)
}

/// The fixed leading fields of a version 4 signature packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePacket {
    tag: u8,
    version: u8,
    sig_type: u8,
    pubkey_alg: u8,
    hash_algorithm: HashAlgorithm,
    body: Vec<u8>,
}

impl SignaturePacket {
    /// Parse decoded signature bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] unless `bytes` is exactly one signature
    /// packet of version 4, type 1 (text), using SHA-256, SHA-384 or
    /// SHA-512.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let packet = Packet::frame(bytes)?;
        if packet.tag != SIGNATURE_TAG {
            return Err(Rejection::NotASignaturePacket { tag: packet.tag });
        }
        let &[version, sig_type, pubkey_alg, hash_id] = packet
            .body
            .first_chunk::<4>()
            .ok_or(Rejection::TruncatedSignature)?;
        if version != SIGNATURE_VERSION {
            return Err(Rejection::UnsupportedSignatureVersion { version });
        }
        if sig_type != TEXT_SIGNATURE {
            return Err(Rejection::UnsupportedSignatureType { sig_type });
        }
        let hash_algorithm = HashAlgorithm::from_packet_id(hash_id)
            .ok_or(Rejection::UnsupportedHashAlgorithm { id: hash_id })?;
        Ok(Self {
            tag: packet.tag,
            version,
            sig_type,
            pubkey_alg,
            hash_algorithm,
            body: packet.body.to_vec(),
        })
    }

    /// Confirm the packet was hashed with the algorithm the armor declared.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::HashAlgorithmMismatch`] when they differ.
    pub fn ensure_hash_algorithm(&self, declared: HashAlgorithm) -> Result<()> {
        if self.hash_algorithm == declared {
            Ok(())
        } else {
            Err(Rejection::HashAlgorithmMismatch {
                declared,
                signed: self.hash_algorithm,
            })
        }
    }

    /// Packet tag (always [`SIGNATURE_TAG`]).
    #[must_use]
    pub const fn tag(&self) -> u8 {
        self.tag
    }

    /// Signature version (always [`SIGNATURE_VERSION`]).
    #[must_use]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// Signature type (always [`TEXT_SIGNATURE`]).
    #[must_use]
    pub const fn sig_type(&self) -> u8 {
        self.sig_type
    }

    /// Public-key algorithm identifier; not constrained here.
    #[must_use]
    pub const fn pubkey_alg(&self) -> u8 {
        self.pubkey_alg
    }

    /// Hash algorithm the signature was made with.
    #[must_use]
    pub const fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// The packet body, starting with the version octet.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
