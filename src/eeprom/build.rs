//! EEPROM encoding: convert a [`HubConfig`] into the binary image.

use crate::constants::*;
use crate::error::{Error, Result};

use super::layout::{self, StringField};
use super::{EepromImage, HubConfig};

/// Compute the EEPROM checksum.
///
/// Byte-wise sum of the vendor and product IDs plus one, wrapping at 8 bits.
pub fn checksum(vendor_id: u16, product_id: u16) -> u8 {
    let [vid_lo, vid_hi] = vendor_id.to_le_bytes();
    let [pid_lo, pid_hi] = product_id.to_le_bytes();
    vid_lo
        .wrapping_add(vid_hi)
        .wrapping_add(pid_lo)
        .wrapping_add(pid_hi)
        .wrapping_add(1)
}

fn check_string(field: &StringField, s: &[u8]) -> Result<()> {
    if s.is_empty() || s.len() > field.max_len as usize {
        return Err(Error::InvalidConfig(format!(
            "{} string is {} bytes, want (0, {}]",
            field.name,
            s.len(),
            field.max_len
        )));
    }
    Ok(())
}

/// Check that every field of `cfg` can be encoded.
pub fn validate(cfg: &HubConfig) -> Result<()> {
    if cfg.port_count == 0 || cfg.port_count > MAX_PORT_COUNT {
        return Err(Error::InvalidConfig(format!(
            "port count {} outside [1, {MAX_PORT_COUNT}]",
            cfg.port_count
        )));
    }
    if cfg.max_power > MAX_POWER_UNITS {
        return Err(Error::InvalidConfig(format!(
            "max power 0x{:02x} above 0x{MAX_POWER_UNITS:02x}",
            cfg.max_power
        )));
    }
    check_string(&layout::VENDOR, &cfg.vendor)?;
    check_string(&layout::PRODUCT, &cfg.product)?;
    check_string(&layout::SERIAL, &cfg.serial)?;
    Ok(())
}

/// Write a length-prefixed string, filling the rest of its region with 0xFF.
fn write_string(buf: &mut [u8], field: &StringField, s: &[u8]) {
    buf[field.offset] = s.len() as u8;
    buf[field.region()].fill(layout::FILL);
    buf[field.content(s.len())].copy_from_slice(s);
}

/// Build the binary EEPROM image from a configuration.
///
/// Fails only if the configuration does not pass [`validate`].
pub fn marshal(cfg: &HubConfig) -> Result<EepromImage> {
    validate(cfg)?;

    let mut image = EepromImage::new([0u8; EEPROM_SIZE]);
    let buf = image.as_bytes_mut();

    buf[layout::VENDOR_ID].copy_from_slice(&cfg.vendor_id.to_le_bytes());
    buf[layout::PRODUCT_ID].copy_from_slice(&cfg.product_id.to_le_bytes());
    buf[layout::CHECKSUM] = checksum(cfg.vendor_id, cfg.product_id);
    buf[layout::RESERVED] = layout::RESERVED_VALUE;
    buf[layout::REMOVABLE] = cfg.removable_mask;
    buf[layout::PORTS] = cfg.port_count;
    buf[layout::MAX_POWER] = cfg.max_power;
    buf[layout::PADDING].fill(layout::FILL);

    write_string(buf, &layout::VENDOR, &cfg.vendor);
    write_string(buf, &layout::PRODUCT, &cfg.product);
    write_string(buf, &layout::SERIAL, &cfg.serial);

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_of_kinx_ids() {
        // 0xB4 + 0x04 + 0x70 + 0x65 + 1 = 0x18E
        assert_eq!(checksum(0x04B4, 0x6570), 0x8E);
    }

    #[test]
    fn checksum_wraps() {
        assert_eq!(checksum(0xFFFF, 0xFFFF), 0xFD);
        assert_eq!(checksum(0, 0), 1);
    }

    #[test]
    fn marshal_kinx_header() {
        let image = marshal(&HubConfig::kinx_hub()).unwrap();
        let buf = image.as_bytes();
        assert_eq!(
            &buf[..0x10],
            &[
                0xB4, 0x04, 0x70, 0x65, 0x8E, 0xFE, 0x18, 0x04, 0xFA, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0xFF, 0xFF
            ]
        );
        assert_eq!(buf[0x10], 10);
        assert_eq!(&buf[0x11..0x1B], b"stapelberg");
        assert_eq!(buf[0x40], 20);
        assert_eq!(&buf[0x41..0x55], b"kinX hub v2018-02-11");
        assert_eq!(buf[0x70], 12);
        assert_eq!(&buf[0x71..0x7D], b"00050034031B");
    }

    #[test]
    fn marshal_pads_unused_string_space() {
        let image = marshal(&HubConfig::kinx_hub()).unwrap();
        let buf = image.as_bytes();
        assert!(buf[0x09..0x10].iter().all(|&b| b == 0xFF));
        assert!(buf[0x1B..0x40].iter().all(|&b| b == 0xFF));
        assert!(buf[0x55..0x70].iter().all(|&b| b == 0xFF));
        assert!(buf[0x7D..0x80].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn marshal_full_serial_leaves_no_padding() {
        let mut cfg = HubConfig::kinx_hub();
        cfg.serial = b"ABCDEFGHIJKLMNO".to_vec();
        let image = marshal(&cfg).unwrap();
        assert_eq!(image.as_bytes()[0x70], 15);
        assert_eq!(&image.as_bytes()[0x71..0x80], b"ABCDEFGHIJKLMNO");
    }

    #[test]
    fn marshal_rejects_bad_strings() {
        let mut cfg = HubConfig::kinx_hub();
        cfg.vendor = Vec::new();
        assert!(matches!(marshal(&cfg), Err(Error::InvalidConfig(_))));

        let mut cfg = HubConfig::kinx_hub();
        cfg.product = vec![b'x'; 47];
        assert!(matches!(marshal(&cfg), Err(Error::InvalidConfig(_))));

        let mut cfg = HubConfig::kinx_hub();
        cfg.serial = vec![b'0'; 16];
        assert!(matches!(marshal(&cfg), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn marshal_rejects_bad_ports_and_power() {
        let mut cfg = HubConfig::kinx_hub();
        cfg.port_count = 0;
        assert!(matches!(marshal(&cfg), Err(Error::InvalidConfig(_))));
        cfg.port_count = 5;
        assert!(matches!(marshal(&cfg), Err(Error::InvalidConfig(_))));

        let mut cfg = HubConfig::kinx_hub();
        cfg.max_power = 0xFB;
        assert!(matches!(marshal(&cfg), Err(Error::InvalidConfig(_))));
    }
}
