//! Byte-level checks applied to every command before dispatch.
//!
//! These run ahead of keyword matching, so a prefix match can never be
//! confused by stray whitespace or exotic bytes.

use crate::rejection::{Rejection, Result};

/// Longest accepted command line, in bytes.
pub const MAX_COMMAND_LEN: usize = 255;

/// Whether `byte` may appear in a command at all.
const fn is_command_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-' | b' ')
}

/// Check the alphabet and spacing rules and return the command as text.
///
/// # Errors
///
/// Returns a [`Rejection`] when the command is too long, contains a byte
/// outside `A-Z a-z 0-9 _ . -` and space, has a space followed by another
/// space or `-`, or ends in a space.
///
/// # Examples
///
/// ```
/// use build_command_gate::command::charset::check;
/// use build_command_gate::Rejection;
///
/// assert_eq!(check(b"Build-iso r4.2"), Ok("Build-iso r4.2"));
/// assert_eq!(check(b"Build-iso  r4.2"), Err(Rejection::DoubleSpace));
/// ```
pub fn check(command: &[u8]) -> Result<&str> {
    if command.len() > MAX_COMMAND_LEN {
        return Err(Rejection::CommandLineTooLong {
            max: MAX_COMMAND_LEN,
        });
    }
    let mut previous = None;
    for &byte in command {
        if !is_command_byte(byte) {
            return Err(Rejection::DisallowedCharacter { byte });
        }
        if previous == Some(b' ') {
            match byte {
                b' ' => return Err(Rejection::DoubleSpace),
                b'-' => return Err(Rejection::SpaceDash),
                _ => {}
            }
        }
        previous = Some(byte);
    }
    if previous == Some(b' ') {
        return Err(Rejection::TrailingSpace);
    }
    // Only ASCII bytes remain at this point.
    std::str::from_utf8(command).map_err(|_| Rejection::DisallowedCharacter { byte: 0x80 })
}
