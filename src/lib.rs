//! Gate for inline-signed build commands.
//!
//! A remote party submits a clear-signed message holding one build command
//! and one detached OpenPGP signature. This crate checks that the message is
//! framed exactly one way, that the command matches a closed grammar and that
//! the signature is a single version 4 text signature packet hashed with the
//! declared algorithm. Accepted requests are reduced to two artefacts: the
//! command bytes and a canonically re-armored signature, which an external
//! verifier checks against a trusted keyring. No cryptography happens here.
//!
//! Validation is a pure function of the input bytes, see [`validate`].
//!
//! # Modules
//!
//! - [`armor`] - Signature armor decoding and canonical re-encoding
//! - [`cli`] - Command-line argument definitions
//! - [`command`] - Command grammar and validated command types
//! - [`driver`] - Bounded input reading and the end-to-end run
//! - [`envelope`] - Clear-sign envelope framing
//! - [`error`] - Errors reported by the binary
//! - [`gate`] - The validation pipeline
//! - [`output`] - Paired, all-or-nothing output writing
//! - [`packet`] - OpenPGP signature packet parsing
//! - [`rejection`] - Validation failure reasons

pub mod armor;
pub mod cli;
pub mod command;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod gate;
pub mod output;
pub mod packet;
pub mod rejection;

pub use command::Command;
pub use envelope::HashAlgorithm;
pub use gate::{ValidatedRequest, validate};
pub use rejection::Rejection;
