//! EEPROM USB I/O operations on an opened hub.

use crate::context::HubDevice;
use crate::error::Result;
use crate::programmer::EepromProgrammer;

use super::{EepromImage, HubConfig};

impl HubDevice {
    /// Read the entire EEPROM.
    ///
    /// Performs 64 USB control transfers of 2 bytes each.
    pub fn read_eeprom(&mut self) -> Result<EepromImage> {
        EepromProgrammer::new(self).read_image()
    }

    /// Write a complete EEPROM image.
    ///
    /// Performs 64 paced USB control transfers. If one fails, the EEPROM is
    /// left partially written.
    pub fn write_eeprom(&mut self, image: &EepromImage) -> Result<()> {
        EepromProgrammer::new(self).write_image(image)
    }

    /// Read the EEPROM and decode it.
    pub fn read_config(&mut self) -> Result<HubConfig> {
        EepromProgrammer::new(self).read_config()
    }

    /// Encode `cfg` and write it to the EEPROM.
    pub fn write_config(&mut self, cfg: &HubConfig) -> Result<()> {
        EepromProgrammer::new(self).write_config(cfg)
    }

    /// Read the EEPROM back and compare it against `expected`.
    pub fn verify_eeprom(&mut self, expected: &EepromImage) -> Result<()> {
        EepromProgrammer::new(self).verify(expected)
    }
}
