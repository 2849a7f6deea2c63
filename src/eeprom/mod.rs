//! Hub EEPROM support: encoding, decoding, and device I/O.
//!
//! The CY7C65632 stores its USB identity, port setup, power budget and
//! descriptor strings in a 128-byte EEPROM. This module provides:
//!
//! - [`HubConfig`] - The decoded configuration.
//! - [`EepromImage`] - The raw 128-byte image.
//! - [`build`] - Encode a configuration into an image.
//! - [`decode`] - Decode an image into a configuration.
//! - EEPROM I/O on [`HubDevice`](crate::HubDevice).

pub mod build;
pub mod decode;
mod io;
pub(crate) mod layout;
mod types;

pub use build::marshal;
pub use decode::parse;
pub use types::{EepromImage, HubConfig};
