//! Builders for signed requests used across the gate's integration tests.
//!
//! The signatures produced here are structurally valid packets with filler
//! key material; they are never meant to verify cryptographically.

use build_command_gate::armor::base64;
use build_command_gate::armor::crc24::Crc24;

/// A forty-character lowercase commit SHA.
pub const COMMIT_SHA: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Packet id of SHA-256, matching the `SHA256` armor header.
const SHA256_ID: u8 = 8;

/// A new-format version 4 text signature packet with the given hash id.
pub fn signature_packet(hash_id: u8) -> Vec<u8> {
    let mut body = vec![4, 1, 1, hash_id];
    body.extend((0u8..66).map(|n| n.wrapping_mul(53).wrapping_add(7)));
    let mut packet = vec![0xC2, u8::try_from(body.len()).expect("short body")];
    packet.extend(body);
    packet
}

/// Armor `raw` with base64 lines of `width` symbols, inserting `headers`
/// (each ending in a newline) before the blank line.
pub fn armor_with_headers(raw: &[u8], width: usize, headers: &str) -> Vec<u8> {
    let mut out = b"-----BEGIN PGP SIGNATURE-----\n".to_vec();
    out.extend_from_slice(headers.as_bytes());
    out.push(b'\n');
    out.extend(base64::encode_lines(raw, width));
    out.push(b'=');
    out.extend_from_slice(base64::encode(Crc24::compute(raw).as_bytes()).as_bytes());
    out.extend_from_slice(b"\n-----END PGP SIGNATURE-----\n");
    out
}

/// The canonical armor expected for `raw`.
pub fn canonical_armor(raw: &[u8]) -> Vec<u8> {
    armor_with_headers(raw, 64, "")
}

/// Wrap a command and an armored signature in a clear-sign envelope.
pub fn envelope(hash: &str, command: &str, armored: &[u8]) -> Vec<u8> {
    let mut out =
        format!("-----BEGIN PGP SIGNED MESSAGE-----\nHash: {hash}\n\n{command}\n").into_bytes();
    out.extend_from_slice(armored);
    out
}

/// A well-formed SHA-256 request for `command`, armored at GnuPG's usual
/// 64-symbol width.
pub fn request(command: &str) -> Vec<u8> {
    envelope(
        "SHA256",
        command,
        &canonical_armor(&signature_packet(SHA256_ID)),
    )
}
