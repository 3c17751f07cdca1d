//! Strict base64 validation and the armor line encoder.
//!
//! Decoding goes through the `base64` crate only after the text has passed
//! the checks here: alphabet, length, and a padding tail that cannot carry
//! residual bits. Together they admit exactly one spelling per byte string.

use crate::rejection::{Rejection, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Symbols that may precede `==`: their four low bits are zero.
const DOUBLE_PAD_TAILS: &[u8] = b"AQgw";

/// Symbols that may precede a single `=`: their two low bits are zero.
const SINGLE_PAD_TAILS: &[u8] = b"AEIMQUYcgkosw048";

/// Whether `byte` belongs to the standard base64 alphabet.
#[must_use]
pub const fn is_base64_symbol(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'+' || byte == b'/'
}

/// Check that every byte is a base64 symbol (no padding allowed).
///
/// # Errors
///
/// Returns [`Rejection::MalformedBase64`] on the first byte outside the
/// alphabet.
pub fn validate_unpadded(text: &[u8]) -> Result<()> {
    if text.iter().all(|&byte| is_base64_symbol(byte)) {
        Ok(())
    } else {
        Err(Rejection::MalformedBase64)
    }
}

/// Check a complete padded base64 text for canonical form.
///
/// # Errors
///
/// Returns [`Rejection::Base64Length`] when the length is not a multiple of
/// four, [`Rejection::NonCanonicalPadding`] when the symbol before the
/// padding would leave stray bits, and [`Rejection::MalformedBase64`] for
/// symbols outside the alphabet.
pub fn validate_padded(text: &[u8]) -> Result<()> {
    if text.len() % 4 != 0 {
        return Err(Rejection::Base64Length);
    }
    if let Some(prefix) = text.strip_suffix(b"==") {
        let (&tail, data) = prefix.split_last().ok_or(Rejection::MalformedBase64)?;
        if !DOUBLE_PAD_TAILS.contains(&tail) {
            return Err(Rejection::NonCanonicalPadding);
        }
        return validate_unpadded(data);
    }
    if let Some(prefix) = text.strip_suffix(b"=") {
        let (&tail, data) = prefix.split_last().ok_or(Rejection::MalformedBase64)?;
        if !SINGLE_PAD_TAILS.contains(&tail) {
            return Err(Rejection::NonCanonicalPadding);
        }
        return validate_unpadded(data);
    }
    validate_unpadded(text)
}

/// Validate and decode padded base64.
///
/// # Errors
///
/// Returns the [`validate_padded`] rejections, or
/// [`Rejection::MalformedBase64`] if the decoder still refuses the text.
pub fn decode(text: &[u8]) -> Result<Vec<u8>> {
    validate_padded(text)?;
    STANDARD
        .decode(text)
        .map_err(|_| Rejection::MalformedBase64)
}

/// Encode `data` as padded base64.
#[must_use]
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encode `data` as base64 broken into newline-terminated lines of `width`
/// symbols (the last line may be shorter).
///
/// # Examples
///
/// ```
/// use build_command_gate::armor::base64::encode_lines;
///
/// assert_eq!(encode_lines(b"hello world", 8), b"aGVsbG8g\nd29ybGQ=\n");
/// ```
#[must_use]
pub fn encode_lines(data: &[u8], width: usize) -> Vec<u8> {
    let encoded = encode(data);
    let width = width.max(1);
    let mut out = Vec::with_capacity(encoded.len() + encoded.len().div_ceil(width));
    for line in encoded.as_bytes().chunks(width) {
        out.extend_from_slice(line);
        out.push(b'\n');
    }
    out
}
