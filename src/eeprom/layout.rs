//! Byte layout of the 128-byte EEPROM image.
//!
//! Shared by [`build`](super::build) and [`decode`](super::decode) so the
//! offsets are defined in one place.

use std::ops::Range;

pub(crate) const VENDOR_ID: Range<usize> = 0x00..0x02;
pub(crate) const PRODUCT_ID: Range<usize> = 0x02..0x04;
pub(crate) const CHECKSUM: usize = 0x04;
pub(crate) const RESERVED: usize = 0x05;
pub(crate) const REMOVABLE: usize = 0x06;
pub(crate) const PORTS: usize = 0x07;
pub(crate) const MAX_POWER: usize = 0x08;
pub(crate) const PADDING: Range<usize> = 0x09..0x10;

/// Fixed value of the reserved byte.
pub(crate) const RESERVED_VALUE: u8 = 0xFE;

/// Fill byte for padding and unused string space.
pub(crate) const FILL: u8 = 0xFF;

/// A length-prefixed string region.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StringField {
    /// Field name used in error messages.
    pub name: &'static str,
    /// Offset of the length byte; content starts right after it.
    pub offset: usize,
    /// Size of the content region.
    pub capacity: usize,
    /// Longest accepted string.
    pub max_len: u8,
}

impl StringField {
    /// Byte range of the content region.
    pub fn region(&self) -> Range<usize> {
        self.offset + 1..self.offset + 1 + self.capacity
    }

    /// Byte range holding a string of `len` bytes.
    pub fn content(&self, len: usize) -> Range<usize> {
        self.offset + 1..self.offset + 1 + len
    }
}

pub(crate) const VENDOR: StringField = StringField {
    name: "vendor",
    offset: 0x10,
    capacity: 47,
    max_len: 46,
};

pub(crate) const PRODUCT: StringField = StringField {
    name: "product",
    offset: 0x40,
    capacity: 47,
    max_len: 46,
};

pub(crate) const SERIAL: StringField = StringField {
    name: "serial",
    offset: 0x70,
    capacity: 15,
    max_len: 15,
};
