//! CLI argument definitions for the gate binary.
//!
//! The request itself always arrives on standard input; the arguments only
//! name where the validated artefacts go.

use camino::Utf8PathBuf;
use clap::Parser;

/// Validate an inline-signed build command read from standard input.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "build-command-gate")]
#[command(version, about)]
#[command(long_about = concat!(
    "Validate an inline-signed build command read from standard input.\n\n",
    "The request must be a clear-signed message holding a single command line ",
    "and a single detached signature packet. On success the signature is written ",
    "in canonical armor to SIGNATURE_OUT and the command line to COMMAND_OUT, ",
    "ready for an external verifier. On any failure neither file is touched, a ",
    "one-line diagnostic is printed and the exit status is 1.\n\n",
    "The signature is never checked cryptographically here.",
))]
#[command(after_help = concat!(
    "COMMANDS ACCEPTED:\n",
    "  Build-template RELEASE TEMPLATE TIMESTAMP\n",
    "  Upload-template RELEASE TEMPLATE TEMPLATE_SHA REPO\n",
    "  Upload-component RELEASE COMPONENT COMMIT_SHA REPO (all | DIST...)\n",
    "  Build-iso RELEASE VERSION TIMESTAMP\n\n",
    "EXAMPLES:\n",
    "  $ build-command-gate sig.asc command.txt < request.asc\n",
    "  $ RUST_LOG=debug build-command-gate --print-action sig.asc command.txt < request.asc",
))]
pub struct Cli {
    /// Destination for the canonical armored signature.
    #[arg(value_name = "SIGNATURE_OUT")]
    pub signature_out: Utf8PathBuf,

    /// Destination for the validated command line.
    #[arg(value_name = "COMMAND_OUT")]
    pub command_out: Utf8PathBuf,

    /// After success, print the dispatcher action to stderr.
    #[arg(long)]
    pub print_action: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
