//! ASCII-armored signature validation and canonical re-encoding.
//!
//! The armored block must be exactly:
//!
//! ```text
//! -----BEGIN PGP SIGNATURE-----
//! <blank line>
//! <base64 lines>
//! =<4-symbol CRC24>
//! -----END PGP SIGNATURE-----
//! ```
//!
//! Armor headers such as `Comment:` are refused because they would move the
//! point where the base64 body is taken to begin. Once decoded, the
//! signature is never echoed back in its submitted encoding: the
//! [`CanonicalSignature`] is rebuilt from the raw bytes.
//!
//! # Sub-modules
//!
//! - [`base64`]: strict alphabet and padding validation.
//! - [`crc24`]: the armor checksum.

pub mod base64;
pub mod crc24;

use self::crc24::Crc24;
use crate::rejection::{Rejection, Result};
use log::trace;

/// Opening armor line plus the blank line that ends the (empty) header block.
const SIGNATURE_BEGIN: &[u8] = b"-----BEGIN PGP SIGNATURE-----\n\n";

/// Closing armor line, preceded by the newline ending the CRC line.
const SIGNATURE_END: &[u8] = b"\n-----END PGP SIGNATURE-----\n";

/// Marker introducing the CRC24 line.
const CRC_MARKER: &[u8] = b"\n=";

/// Base64 symbols in an encoded CRC24.
const CRC_SYMBOLS: usize = 4;

/// Smallest base64 body, newlines excluded, of any valid signature.
pub const MIN_BODY_LEN: usize = 88;

/// Line width of the canonical base64 body.
pub const LINE_WIDTH: usize = 64;

/// Smallest possible armored signature block.
pub const MIN_ARMORED_LEN: usize =
    SIGNATURE_BEGIN.len() + MIN_BODY_LEN + CRC_MARKER.len() + CRC_SYMBOLS + SIGNATURE_END.len();

/// A signature taken out of its armor: raw packet bytes and their checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DearmoredSignature {
    raw: Vec<u8>,
    crc: Crc24,
}

impl DearmoredSignature {
    /// Validate an armored signature block and decode its body.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the wrapper lines are not exact, the CRC
    /// line is missing or malformed, the base64 body is short or not in
    /// canonical form, or the checksum does not match the decoded bytes.
    pub fn parse(armored: &[u8]) -> Result<Self> {
        let inner = armored
            .strip_prefix(SIGNATURE_BEGIN)
            .ok_or(Rejection::InvalidSignatureStart)?;
        let inner = inner
            .strip_suffix(SIGNATURE_END)
            .ok_or(Rejection::InvalidSignatureEnd)?;

        let crc_start = inner
            .len()
            .checked_sub(CRC_SYMBOLS)
            .ok_or(Rejection::MissingCrc)?;
        let (before_crc, crc_text) = inner.split_at(crc_start);
        let body_lines = before_crc
            .strip_suffix(CRC_MARKER)
            .ok_or(Rejection::MissingCrc)?;

        let crc = decode_crc(crc_text)?;

        let body: Vec<u8> = body_lines
            .iter()
            .copied()
            .filter(|&byte| byte != b'\n')
            .collect();
        if body.len() < MIN_BODY_LEN {
            return Err(Rejection::SignatureTooShort);
        }
        let raw = base64::decode(&body)?;
        trace!(
            "decoded {} signature bytes from {} base64 symbols",
            raw.len(),
            body.len()
        );

        if Crc24::compute(&raw) != crc {
            return Err(Rejection::CrcMismatch);
        }
        Ok(Self { raw, crc })
    }

    /// The decoded signature packet bytes.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The armor checksum.
    #[must_use]
    pub const fn crc(&self) -> Crc24 {
        self.crc
    }

    /// Re-armor the signature in canonical form.
    #[must_use]
    pub fn canonicalize(&self) -> CanonicalSignature {
        CanonicalSignature::encode(&self.raw, self.crc)
    }
}

/// A signature in the single armored encoding handed to the verifier.
///
/// Body lines are exactly [`LINE_WIDTH`] symbols (the last may be shorter),
/// no armor headers are present, and the CRC line follows the body directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalSignature(Vec<u8>);

impl CanonicalSignature {
    fn encode(raw: &[u8], crc: Crc24) -> Self {
        let body = base64::encode_lines(raw, LINE_WIDTH);
        let crc_text = base64::encode(crc.as_bytes());
        let mut out = Vec::with_capacity(MIN_ARMORED_LEN + body.len());
        out.extend_from_slice(SIGNATURE_BEGIN);
        out.extend_from_slice(&body);
        out.push(b'=');
        out.extend_from_slice(crc_text.as_bytes());
        out.extend_from_slice(SIGNATURE_END);
        Self(out)
    }

    /// The armored bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the wrapper and return the armored bytes.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Decode the four CRC symbols into the transmitted checksum.
fn decode_crc(text: &[u8]) -> Result<Crc24> {
    if !text.iter().all(|&byte| base64::is_base64_symbol(byte)) {
        return Err(Rejection::MalformedCrc);
    }
    let bytes = base64::decode(text).map_err(|_| Rejection::MalformedCrc)?;
    let checksum: [u8; 3] = bytes.try_into().map_err(|_| Rejection::MalformedCrc)?;
    Ok(Crc24::from_bytes(checksum))
}
