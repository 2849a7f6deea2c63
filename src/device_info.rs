//! Device discovery.
//!
//! Use [`find_devices`] to list connected hubs before opening one with
//! [`HubDevice::from_device_info`](crate::HubDevice::from_device_info).

use nusb::{self, DeviceInfo, MaybeFuture};

use crate::error::Result;

/// List all connected devices matching the given vendor and product IDs.
///
/// # Example
///
/// ```no_run
/// use cyhub::{find_devices, constants::{HUB_PID, HUB_VID}};
///
/// for dev in find_devices(HUB_VID, HUB_PID)? {
///     println!("bus {} address {}", dev.busnum(), dev.device_address());
/// }
/// # Ok::<(), cyhub::Error>(())
/// ```
pub fn find_devices(vendor: u16, product: u16) -> Result<Vec<DeviceInfo>> {
    let devices: Vec<DeviceInfo> = nusb::list_devices()
        .wait()?
        .filter(|d| d.vendor_id() == vendor && d.product_id() == product)
        .collect();
    Ok(devices)
}
