//! Protocol constants for the CY7C65632 hub EEPROM.
//!
//! See the CY7C65632 datasheet, "EEPROM Configuration Options".

use std::time::Duration;

// ---- Device identification ----

/// Cypress vendor ID.
pub const HUB_VID: u16 = 0x04B4;

/// Product ID of the CY7C65632 as shipped in the kinX keyboard.
pub const HUB_PID: u16 = 0x6570;

// ---- Vendor requests ----

/// Vendor request used for both reading and writing an EEPROM word.
pub const EEPROM_REQUEST: u8 = 14;

// ---- EEPROM geometry ----

/// Total EEPROM size in bytes.
pub const EEPROM_SIZE: usize = 128;

/// Bytes moved by a single control transfer.
pub const WORD_SIZE: usize = 2;

/// Number of word transfers covering the whole EEPROM.
pub const EEPROM_WORDS: usize = EEPROM_SIZE / WORD_SIZE;

// ---- Timing ----

/// Delay after each word write.
///
/// The chip drops writes that arrive faster than this without reporting
/// an error.
pub const EEPROM_WRITE_DELAY: Duration = Duration::from_millis(10);

/// Timeout for a single control transfer.
pub const CONTROL_TIMEOUT: Duration = Duration::from_secs(1);

// ---- Field limits ----

/// Highest accepted port count.
pub const MAX_PORT_COUNT: u8 = 4;

/// Highest accepted power budget, in 2 mA units (500 mA).
pub const MAX_POWER_UNITS: u8 = 0xFA;

/// Milliamps per unit of the power budget field.
pub const MAX_POWER_MILLIAMP_PER_UNIT: u16 = 2;
