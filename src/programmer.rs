//! Word-by-word EEPROM programming.
//!
//! The hub exposes its EEPROM only as 64 two-byte words, each moved by its
//! own vendor control transfer. [`EepromProgrammer`] drives those transfers
//! in order over any [`WordTransport`], so the sequencing can be tested
//! without hardware.
//!
//! Nothing here retries or rolls back. A write that fails part-way leaves
//! the EEPROM partially programmed; run the full write again.

use std::thread;

use log::{debug, info, warn};
use nusb::transfer::TransferError;

use crate::constants::*;
use crate::eeprom::{self, EepromImage, HubConfig};
use crate::error::{Error, Result};

/// Direction of a word transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to host (read).
    In,
    /// Host to device (write).
    Out,
}

/// Moves one EEPROM word between host and device.
pub trait WordTransport {
    /// Transfer word `index` (0..64).
    ///
    /// For [`Direction::Out`], `buf` holds the bytes to write. For
    /// [`Direction::In`], the received bytes are stored into `buf`.
    /// Returns the number of bytes actually transferred.
    fn transfer(
        &mut self,
        direction: Direction,
        index: u16,
        buf: &mut [u8; WORD_SIZE],
    ) -> std::result::Result<usize, TransferError>;
}

impl<T: WordTransport + ?Sized> WordTransport for &mut T {
    fn transfer(
        &mut self,
        direction: Direction,
        index: u16,
        buf: &mut [u8; WORD_SIZE],
    ) -> std::result::Result<usize, TransferError> {
        (**self).transfer(direction, index, buf)
    }
}

/// Reads and writes complete EEPROM images over a [`WordTransport`].
#[derive(Debug)]
pub struct EepromProgrammer<T> {
    transport: T,
}

impl<T: WordTransport> EepromProgrammer<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Give the transport back.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Move one word, requiring exactly [`WORD_SIZE`] bytes.
    fn transfer_word(
        &mut self,
        direction: Direction,
        index: u16,
        buf: &mut [u8; WORD_SIZE],
    ) -> Result<()> {
        let n = self
            .transport
            .transfer(direction, index, buf)
            .map_err(|source| Error::Transfer {
                index,
                direction,
                source,
            })?;
        if n != WORD_SIZE {
            return Err(Error::LengthMismatch {
                index,
                direction,
                got: n,
                want: WORD_SIZE,
            });
        }
        Ok(())
    }

    /// Program a complete image.
    ///
    /// Words are written in ascending order with [`EEPROM_WRITE_DELAY`]
    /// after each one. Takes a bit over half a second.
    pub fn write_image(&mut self, image: &EepromImage) -> Result<()> {
        info!(
            "writing EEPROM (takes about {}ms)",
            EEPROM_WORDS as u128 * EEPROM_WRITE_DELAY.as_millis()
        );
        for index in 0..EEPROM_WORDS as u16 {
            let mut word = image.word(index as usize);
            debug!("write word {index:2}: {:02x} {:02x}", word[0], word[1]);
            if let Err(e) = self.transfer_word(Direction::Out, index, &mut word) {
                if index > 0 {
                    warn!("EEPROM write aborted after {index} of {EEPROM_WORDS} words");
                }
                return Err(e);
            }
            thread::sleep(EEPROM_WRITE_DELAY);
        }
        info!("EEPROM written");
        Ok(())
    }

    /// Read a complete image.
    pub fn read_image(&mut self) -> Result<EepromImage> {
        info!("reading EEPROM");
        let mut buf = [0u8; EEPROM_SIZE];
        for index in 0..EEPROM_WORDS as u16 {
            let mut word = [0u8; WORD_SIZE];
            self.transfer_word(Direction::In, index, &mut word)?;
            debug!("read word {index:2}: {:02x} {:02x}", word[0], word[1]);
            let at = index as usize * WORD_SIZE;
            buf[at..at + WORD_SIZE].copy_from_slice(&word);
        }
        Ok(EepromImage::new(buf))
    }

    /// Encode `cfg` and program it.
    pub fn write_config(&mut self, cfg: &HubConfig) -> Result<()> {
        let image = eeprom::marshal(cfg)?;
        self.write_image(&image)
    }

    /// Read the device and decode its configuration.
    pub fn read_config(&mut self) -> Result<HubConfig> {
        let image = self.read_image()?;
        eeprom::parse(&image)
    }

    /// Read the device back and compare it against `expected`.
    ///
    /// The chip reports no error for dropped writes, so this is the only
    /// way to tell that programming took effect.
    pub fn verify(&mut self, expected: &EepromImage) -> Result<()> {
        let actual = self.read_image()?;
        let mismatch = expected
            .as_bytes()
            .iter()
            .zip(actual.as_bytes())
            .position(|(a, b)| a != b);
        if let Some(offset) = mismatch {
            return Err(Error::VerifyMismatch {
                offset,
                expected: expected.as_bytes()[offset],
                actual: actual.as_bytes()[offset],
            });
        }
        info!("EEPROM verified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transport backed by an in-memory EEPROM.
    struct Memory {
        buf: [u8; EEPROM_SIZE],
        calls: Vec<(Direction, u16)>,
    }

    impl WordTransport for Memory {
        fn transfer(
            &mut self,
            direction: Direction,
            index: u16,
            buf: &mut [u8; WORD_SIZE],
        ) -> std::result::Result<usize, TransferError> {
            self.calls.push((direction, index));
            let at = index as usize * WORD_SIZE;
            match direction {
                Direction::Out => self.buf[at..at + WORD_SIZE].copy_from_slice(buf),
                Direction::In => buf.copy_from_slice(&self.buf[at..at + WORD_SIZE]),
            }
            Ok(WORD_SIZE)
        }
    }

    fn memory() -> Memory {
        Memory {
            buf: [0xFF; EEPROM_SIZE],
            calls: Vec::new(),
        }
    }

    #[test]
    fn write_then_read_config() {
        let mut mem = memory();
        let mut prog = EepromProgrammer::new(&mut mem);
        prog.write_config(&HubConfig::kinx_hub()).unwrap();
        assert_eq!(prog.read_config().unwrap(), HubConfig::kinx_hub());

        let outs: Vec<u16> = mem
            .calls
            .iter()
            .filter(|(d, _)| *d == Direction::Out)
            .map(|(_, i)| *i)
            .collect();
        assert_eq!(outs, (0..64).collect::<Vec<u16>>());
    }

    #[test]
    fn read_blank_device_fails_to_parse() {
        let mut prog = EepromProgrammer::new(memory());
        assert!(matches!(
            prog.read_config(),
            Err(Error::InvalidFieldLength { field: "vendor", .. })
        ));
    }

    #[test]
    fn verify_reports_first_difference() {
        let image = eeprom::marshal(&HubConfig::kinx_hub()).unwrap();
        let mut mem = memory();
        mem.buf = *image.as_bytes();
        mem.buf[0x42] ^= 0x01;
        let mut prog = EepromProgrammer::new(mem);
        match prog.verify(&image) {
            Err(Error::VerifyMismatch {
                offset,
                expected,
                actual,
            }) => {
                assert_eq!(offset, 0x42);
                assert_eq!(expected, image.as_bytes()[0x42]);
                assert_eq!(actual, expected ^ 0x01);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn verify_matching_image() {
        let image = eeprom::marshal(&HubConfig::kinx_hub()).unwrap();
        let mut mem = memory();
        mem.buf = *image.as_bytes();
        let mut prog = EepromProgrammer::new(mem);
        prog.verify(&image).unwrap();
        let mem = prog.into_inner();
        assert!(mem.calls.iter().all(|(d, _)| *d == Direction::In));
    }
}
