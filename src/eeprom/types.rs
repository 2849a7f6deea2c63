//! EEPROM data types and structures.

use std::fmt;

use crate::constants::*;
use crate::error::{Error, Result};

/// Decoded hub EEPROM contents.
///
/// Fields are produced by [`decode::parse`](super::decode::parse) and
/// consumed by [`build::marshal`](super::build::marshal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    /// USB Vendor ID.
    pub vendor_id: u16,
    /// USB Product ID.
    pub product_id: u16,
    /// Bitmask of downstream ports wired as non-removable.
    pub removable_mask: u8,
    /// Number of downstream ports, in [1, 4].
    pub port_count: u8,
    /// Self-power budget in 2 mA units, in [0x00, 0xFA].
    pub max_power: u8,
    /// Manufacturer string, as stored (no encoding is enforced).
    pub vendor: Vec<u8>,
    /// Product string.
    pub product: Vec<u8>,
    /// Serial number string.
    pub serial: Vec<u8>,
}

impl HubConfig {
    /// The configuration programmed into the kinX keyboard hub.
    pub fn kinx_hub() -> Self {
        Self {
            vendor_id: HUB_VID,
            product_id: HUB_PID,
            removable_mask: 0x18,
            port_count: 4,
            max_power: MAX_POWER_UNITS, // 500mA
            vendor: b"stapelberg".to_vec(),
            product: b"kinX hub v2018-02-11".to_vec(),
            serial: b"00050034031B".to_vec(),
        }
    }

    /// Power budget in mA.
    pub fn max_power_ma(&self) -> u16 {
        self.max_power as u16 * MAX_POWER_MILLIAMP_PER_UNIT
    }
}

impl fmt::Display for HubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vendor: 0x{:x},", self.vendor_id)?;
        writeln!(f, "Product: 0x{:x},", self.product_id)?;
        writeln!(f, "Removable: {},", self.removable_mask)?;
        writeln!(f, "Ports: {},", self.port_count)?;
        writeln!(f, "MaxPower: {}mA,", self.max_power_ma())?;
        writeln!(f, "Vendor: \"{}\",", self.vendor.escape_ascii())?;
        writeln!(f, "Product: \"{}\",", self.product.escape_ascii())?;
        write!(f, "Serial: \"{}\"", self.serial.escape_ascii())
    }
}

/// A complete 128-byte EEPROM image.
#[derive(Clone, PartialEq, Eq)]
pub struct EepromImage([u8; EEPROM_SIZE]);

impl EepromImage {
    /// Wrap a raw buffer.
    pub fn new(buf: [u8; EEPROM_SIZE]) -> Self {
        Self(buf)
    }

    /// Copy an image out of a slice, which must be exactly 128 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let buf: [u8; EEPROM_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidImageSize(bytes.len()))?;
        Ok(Self(buf))
    }

    /// The raw image bytes.
    pub fn as_bytes(&self) -> &[u8; EEPROM_SIZE] {
        &self.0
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8; EEPROM_SIZE] {
        &mut self.0
    }

    /// The two bytes addressed by word `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`EEPROM_WORDS`].
    pub fn word(&self, index: usize) -> [u8; WORD_SIZE] {
        [self.0[index * WORD_SIZE], self.0[index * WORD_SIZE + 1]]
    }
}

impl fmt::Debug for EepromImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EepromImage [")?;
        for (i, chunk) in self.0.chunks(16).enumerate() {
            write!(f, "  {:02X}:", i * 16)?;
            for b in chunk {
                write!(f, " {b:02X}")?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

impl AsRef<[u8]> for EepromImage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinx_hub_defaults() {
        let cfg = HubConfig::kinx_hub();
        assert_eq!(cfg.vendor_id, 0x04B4);
        assert_eq!(cfg.product_id, 0x6570);
        assert_eq!(cfg.removable_mask, 0x18);
        assert_eq!(cfg.port_count, 4);
        assert_eq!(cfg.max_power_ma(), 500);
        assert_eq!(cfg.serial, b"00050034031B");
    }

    #[test]
    fn display_renders_all_fields() {
        let text = HubConfig::kinx_hub().to_string();
        assert_eq!(
            text,
            "Vendor: 0x4b4,\n\
             Product: 0x6570,\n\
             Removable: 24,\n\
             Ports: 4,\n\
             MaxPower: 500mA,\n\
             Vendor: \"stapelberg\",\n\
             Product: \"kinX hub v2018-02-11\",\n\
             Serial: \"00050034031B\""
        );
    }

    #[test]
    fn display_escapes_non_ascii_bytes() {
        let cfg = HubConfig {
            serial: vec![b'A', 0xC3, 0xFF, b'"'],
            ..HubConfig::kinx_hub()
        };
        assert!(cfg.to_string().ends_with("Serial: \"A\\xc3\\xff\\\"\""));
    }

    #[test]
    fn from_bytes_rejects_wrong_size() {
        assert!(matches!(
            EepromImage::from_bytes(&[0u8; 64]),
            Err(Error::InvalidImageSize(64))
        ));
        assert!(EepromImage::from_bytes(&[0u8; EEPROM_SIZE]).is_ok());
    }

    #[test]
    fn word_addresses_byte_pairs() {
        let mut buf = [0u8; EEPROM_SIZE];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = i as u8;
        }
        let image = EepromImage::new(buf);
        assert_eq!(image.word(0), [0, 1]);
        assert_eq!(image.word(63), [126, 127]);
    }
}
