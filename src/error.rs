//! Error types for the cyhub crate.

use crate::programmer::Direction;

/// The error type for hub EEPROM operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the nusb USB layer while enumerating or opening.
    #[error("USB error: {0}")]
    Usb(#[from] nusb::Error),

    /// No matching device was found.
    #[error("device not found")]
    DeviceNotFound,

    /// A word transfer failed in the USB layer.
    #[error("USB transfer error ({direction:?}) at word {index}: {source}")]
    Transfer {
        /// Word index of the failed transfer.
        index: u16,
        /// Transfer direction.
        direction: Direction,
        /// The underlying transfer error.
        source: nusb::transfer::TransferError,
    },

    /// A transfer succeeded but moved an unexpected number of bytes.
    #[error("protocol error ({direction:?}) at word {index}: unexpected response length: got {got}, want {want}")]
    LengthMismatch {
        /// Word index of the offending transfer.
        index: u16,
        /// Transfer direction.
        direction: Direction,
        /// Bytes actually transferred.
        got: usize,
        /// Bytes required.
        want: usize,
    },

    /// A string length prefix in an EEPROM image is zero or too large.
    #[error("invalid {field} length: got {got}, want (0, {max}]")]
    InvalidFieldLength {
        /// Name of the string field (`vendor`, `product` or `serial`).
        field: &'static str,
        /// The length byte found in the image.
        got: u8,
        /// The largest accepted length.
        max: u8,
    },

    /// A configuration cannot be encoded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A raw image does not have the EEPROM size.
    #[error("invalid EEPROM image size: got {0} bytes, want 128")]
    InvalidImageSize(usize),

    /// Read-back after programming differs from the written image.
    #[error("EEPROM verification failed at offset {offset:#04x}: expected {expected:#04x}, got {actual:#04x}")]
    VerifyMismatch {
        /// Byte offset of the first difference.
        offset: usize,
        /// Byte that was written.
        expected: u8,
        /// Byte that was read back.
        actual: u8,
    },

    /// An I/O error while emitting output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for hub EEPROM operations.
pub type Result<T> = std::result::Result<T, Error>;
