//! OpenPGP armor checksum (CRC-24).

use std::fmt;

const CRC24_INIT: u32 = 0x00B7_04CE;
const CRC24_POLY: u32 = 0x0186_4CFB;
const CRC24_MASK: u32 = 0x00FF_FFFF;

/// A 24-bit armor checksum, held as its three big-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crc24([u8; 3]);

impl Crc24 {
    /// Compute the checksum of `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// use build_command_gate::armor::crc24::Crc24;
    ///
    /// assert_eq!(Crc24::compute(b"123456789").value(), 0x0021_CF02);
    /// ```
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        let mut crc = CRC24_INIT;
        for &byte in data {
            crc ^= u32::from(byte) << 16;
            for _ in 0..8 {
                crc <<= 1;
                if crc & 0x0100_0000 != 0 {
                    crc ^= CRC24_POLY;
                }
            }
        }
        let [_, high, mid, low] = (crc & CRC24_MASK).to_be_bytes();
        Self([high, mid, low])
    }

    /// Wrap three checksum bytes as transmitted in the armor.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// The checksum bytes, most significant first.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// The checksum as an integer.
    #[must_use]
    pub fn value(&self) -> u32 {
        let [high, mid, low] = self.0;
        u32::from_be_bytes([0, high, mid, low])
    }
}

impl fmt::Display for Crc24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.value())
    }
}
