//! Core hub device handle.
//!
//! [`HubDevice`] owns an opened CY7C65632 and moves EEPROM words with vendor
//! control transfers. The USB handle is closed when the value is dropped.

use log::debug;
use nusb::transfer::{ControlIn, ControlOut, ControlType, Recipient, TransferError};
use nusb::{self, DeviceInfo, MaybeFuture};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::programmer::{Direction, WordTransport};

/// An opened CY7C65632 hub.
///
/// # Opening a device
///
/// ```no_run
/// use cyhub::{HubDevice, constants::{HUB_PID, HUB_VID}};
///
/// let mut dev = HubDevice::open(HUB_VID, HUB_PID)?;
/// let cfg = dev.read_config()?;
/// println!("{cfg}");
/// # Ok::<(), cyhub::Error>(())
/// ```
pub struct HubDevice {
    device: nusb::Device,
}

impl std::fmt::Debug for HubDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let desc = self.device.device_descriptor();
        f.debug_struct("HubDevice")
            .field("vendor_id", &desc.vendor_id())
            .field("product_id", &desc.product_id())
            .finish_non_exhaustive()
    }
}

// ---- Construction / Opening ----

impl HubDevice {
    /// Open the first hub matching the given vendor and product IDs.
    pub fn open(vendor: u16, product: u16) -> Result<Self> {
        let dev_info = nusb::list_devices()
            .wait()?
            .find(|d| d.vendor_id() == vendor && d.product_id() == product)
            .ok_or(Error::DeviceNotFound)?;

        Self::from_device_info(dev_info)
    }

    /// Open a hub from an already-discovered [`nusb::DeviceInfo`].
    ///
    /// No interface is claimed; EEPROM requests go to the device recipient
    /// and the kernel hub driver stays bound.
    pub fn from_device_info(dev_info: DeviceInfo) -> Result<Self> {
        debug!(
            "opening hub {:04x}:{:04x} on bus {} address {}",
            dev_info.vendor_id(),
            dev_info.product_id(),
            dev_info.busnum(),
            dev_info.device_address()
        );
        let device = dev_info.open().wait()?;
        Ok(Self { device })
    }
}

// ---- Internal USB helpers ----

impl HubDevice {
    /// Send a vendor OUT control transfer carrying one EEPROM word.
    fn control_out(&self, index: u16, data: &[u8]) -> std::result::Result<usize, TransferError> {
        self.device
            .control_out(
                ControlOut {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request: EEPROM_REQUEST,
                    value: 0,
                    index,
                    data,
                },
                CONTROL_TIMEOUT,
            )
            .wait()?;
        Ok(data.len())
    }

    /// Send a vendor IN control transfer for one EEPROM word.
    fn control_in(&self, index: u16, length: u16) -> std::result::Result<Vec<u8>, TransferError> {
        self.device
            .control_in(
                ControlIn {
                    control_type: ControlType::Vendor,
                    recipient: Recipient::Device,
                    request: EEPROM_REQUEST,
                    value: 0,
                    index,
                    length,
                },
                CONTROL_TIMEOUT,
            )
            .wait()
    }
}

impl WordTransport for HubDevice {
    fn transfer(
        &mut self,
        direction: Direction,
        index: u16,
        buf: &mut [u8; WORD_SIZE],
    ) -> std::result::Result<usize, TransferError> {
        match direction {
            Direction::Out => self.control_out(index, buf),
            Direction::In => {
                let data = self.control_in(index, WORD_SIZE as u16)?;
                let n = data.len().min(WORD_SIZE);
                buf[..n].copy_from_slice(&data[..n]);
                Ok(data.len())
            }
        }
    }
}
