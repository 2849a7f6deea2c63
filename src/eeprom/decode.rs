//! EEPROM decoding: parse a binary image into a [`HubConfig`].

use std::ops::Range;

use crate::error::{Error, Result};

use super::layout::{self, StringField};
use super::{EepromImage, HubConfig};

/// Read a length-prefixed string as the exact bytes stored.
fn decode_string(buf: &[u8], field: &StringField) -> Result<Vec<u8>> {
    let len = buf[field.offset];
    if len == 0 || len > field.max_len {
        return Err(Error::InvalidFieldLength {
            field: field.name,
            got: len,
            max: field.max_len,
        });
    }
    Ok(buf[field.content(len as usize)].to_vec())
}

fn read_u16(buf: &[u8], at: Range<usize>) -> u16 {
    u16::from_le_bytes([buf[at.start], buf[at.start + 1]])
}

/// Decode a binary EEPROM image.
///
/// The checksum byte is not verified; the chip does not check it either.
pub fn parse(image: &EepromImage) -> Result<HubConfig> {
    let buf = image.as_bytes();

    Ok(HubConfig {
        vendor_id: read_u16(buf, layout::VENDOR_ID),
        product_id: read_u16(buf, layout::PRODUCT_ID),
        removable_mask: buf[layout::REMOVABLE],
        port_count: buf[layout::PORTS],
        max_power: buf[layout::MAX_POWER],
        vendor: decode_string(buf, &layout::VENDOR)?,
        product: decode_string(buf, &layout::PRODUCT)?,
        serial: decode_string(buf, &layout::SERIAL)?,
    })
}
