//! The validation pipeline as a pure function from input bytes to a request.

use crate::armor::{CanonicalSignature, DearmoredSignature};
use crate::command::Command;
use crate::envelope::{Envelope, HashAlgorithm};
use crate::packet::SignaturePacket;
use crate::rejection::Result;
use log::debug;

/// A request that passed every stage and is ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    hash_algorithm: HashAlgorithm,
    command: Command,
    command_bytes: Vec<u8>,
    signature: CanonicalSignature,
}

impl ValidatedRequest {
    /// The hash algorithm declared in the envelope and carried by the packet.
    #[must_use]
    pub const fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    /// The parsed command.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    /// The command line exactly as received, without its newline.
    #[must_use]
    pub fn command_bytes(&self) -> &[u8] {
        &self.command_bytes
    }

    /// The re-encoded armored signature.
    #[must_use]
    pub const fn signature(&self) -> &CanonicalSignature {
        &self.signature
    }
}

/// Validate a complete signed request.
///
/// Stages run in order: envelope framing, command grammar, armor decoding,
/// packet parsing and the hash cross-check. The first failure is returned
/// and nothing further is inspected.
///
/// # Errors
///
/// Returns the [`Rejection`](crate::Rejection) from the first stage that
/// refuses the input.
pub fn validate(message: &[u8]) -> Result<ValidatedRequest> {
    let envelope = Envelope::frame(message)?;
    debug!(
        "framed envelope: hash {}, {} command bytes, {} signature bytes",
        envelope.hash_algorithm(),
        envelope.command().len(),
        envelope.armored_signature().len()
    );

    let command = Command::parse(envelope.command())?;
    debug!("accepted {} command", command.kind());

    let dearmored = DearmoredSignature::parse(envelope.armored_signature())?;
    let packet = SignaturePacket::parse(dearmored.raw())?;
    packet.ensure_hash_algorithm(envelope.hash_algorithm())?;
    debug!(
        "signature packet: version {}, public-key algorithm {}, hash {}",
        packet.version(),
        packet.pubkey_alg(),
        packet.hash_algorithm()
    );

    Ok(ValidatedRequest {
        hash_algorithm: envelope.hash_algorithm(),
        command,
        command_bytes: envelope.command().to_vec(),
        signature: dearmored.canonicalize(),
    })
}
