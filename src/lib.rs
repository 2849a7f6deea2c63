//! Read and program the configuration EEPROM of the Cypress CY7C65632 USB
//! 2.0 hub.
//!
//! The hub keeps its USB identity, port setup, power budget and descriptor
//! strings in a 128-byte EEPROM that is reachable only through vendor
//! control request 14, one 2-byte word per transfer. It uses
//! [nusb](https://crates.io/crates/nusb) as the USB backend.
//!
//! # Quick Start
//!
//! ```no_run
//! use cyhub::{HubConfig, HubDevice, constants::{HUB_PID, HUB_VID}};
//!
//! let mut dev = HubDevice::open(HUB_VID, HUB_PID)?;
//! dev.write_config(&HubConfig::kinx_hub())?;
//! println!("{}", dev.read_config()?);
//! # Ok::<(), cyhub::Error>(())
//! ```
//!
//! # Features
//!
//! - **Codec**: Convert between [`HubConfig`] and the raw [`EepromImage`]
//!   ([`eeprom::marshal`], [`eeprom::parse`]).
//! - **Programming**: Read and write complete images word by word with the
//!   pacing the chip needs ([`programmer`]), over any [`WordTransport`].
//! - **Device access**: Open a hub by VID/PID through nusb ([`HubDevice`]).

pub mod constants;
pub mod context;
pub mod device_info;
pub mod eeprom;
pub mod error;
pub mod programmer;

// ---- Convenience re-exports ----

pub use context::HubDevice;
pub use device_info::find_devices;
pub use eeprom::{EepromImage, HubConfig};
pub use error::{Error, Result};
pub use programmer::{Direction, EepromProgrammer, WordTransport};
