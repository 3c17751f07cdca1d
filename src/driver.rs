//! One gate run: read the request, validate it, write both outputs.

use crate::cli::Cli;
use crate::envelope::MAX_INPUT_LEN;
use crate::error::{GateError, Result};
use crate::gate::{self, ValidatedRequest};
use crate::output::{self, Artefact};
use crate::rejection::Rejection;
use log::{debug, info};
use std::io::{Read, Write};

/// Read the whole request, refusing anything longer than [`MAX_INPUT_LEN`].
///
/// One byte past the cap is read so an oversized request is detected without
/// buffering the rest of it.
///
/// # Errors
///
/// Returns [`Rejection::InputTooLong`] for oversized input and
/// [`GateError::ReadInput`] when the reader fails.
pub fn read_message(reader: impl Read) -> Result<Vec<u8>> {
    let limit = u64::try_from(MAX_INPUT_LEN + 1).unwrap_or(u64::MAX);
    let mut message = Vec::with_capacity(MAX_INPUT_LEN + 1);
    reader
        .take(limit)
        .read_to_end(&mut message)
        .map_err(|source| GateError::ReadInput { source })?;
    if message.len() > MAX_INPUT_LEN {
        return Err(Rejection::InputTooLong.into());
    }
    debug!("read {} request bytes", message.len());
    Ok(message)
}

/// Run the gate against `reader`, writing the outputs named by `cli`.
///
/// Nothing is written unless the request validates in full.
///
/// # Errors
///
/// Returns [`GateError`] when reading, validation or writing fails.
pub fn run(cli: &Cli, reader: impl Read, stderr: &mut dyn Write) -> Result<ValidatedRequest> {
    let message = read_message(reader)?;
    let request = gate::validate(&message)?;
    output::write_pair(
        Artefact {
            path: &cli.signature_out,
            contents: request.signature().as_bytes(),
        },
        Artefact {
            path: &cli.command_out,
            contents: request.command_bytes(),
        },
    )?;
    info!("accepted {}", request.command());
    if cli.print_action && writeln!(stderr, "{}", request.command().describe()).is_err() {
        // Best-effort reporting; the outputs are already in place.
    }
    Ok(request)
}
