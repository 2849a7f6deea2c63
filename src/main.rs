//! Reads or writes the EEPROM of the kinX's CY7C65632 USB 2.0 hub.

use std::io::Write;
use std::process::ExitCode;

use cyhub::constants::{HUB_PID, HUB_VID};
use cyhub::{eeprom, HubConfig, HubDevice, Result};
use env_logger::Env;
use log::{error, info};

fn parse_id(s: &str) -> std::result::Result<u16, String> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    }
    .map_err(|e| format!("invalid USB ID {s:?}: {e}"))
}

fn blaster() -> Result<()> {
    let matches = clap::command!()
        .arg(
            clap::arg!(--write "Write the default config instead of reading and displaying the current config"),
        )
        .arg(
            clap::arg!(--raw "Print the raw EEPROM bytes to stdout instead of parsing")
                .conflicts_with("write"),
        )
        .arg(
            clap::arg!(--verify "Read the EEPROM back after writing and compare")
                .requires("write"),
        )
        .arg(
            clap::arg!(--vid <VID> "USB vendor ID of the hub to open")
                .value_parser(parse_id)
                .default_value("0x04b4"),
        )
        .arg(
            clap::arg!(--pid <PID> "USB product ID of the hub to open")
                .value_parser(parse_id)
                .default_value("0x6570"),
        )
        .get_matches();

    let vid = matches.get_one::<u16>("vid").copied().unwrap_or(HUB_VID);
    let pid = matches.get_one::<u16>("pid").copied().unwrap_or(HUB_PID);

    let mut dev = HubDevice::open(vid, pid)?;
    info!("device = {dev:?}");

    if matches.get_flag("write") {
        let image = eeprom::marshal(&HubConfig::kinx_hub())?;
        dev.write_eeprom(&image)?;
        if matches.get_flag("verify") {
            dev.verify_eeprom(&image)?;
        }
        return Ok(());
    }

    let image = dev.read_eeprom()?;
    if matches.get_flag("raw") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(image.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let cfg = eeprom::parse(&image)?;
    println!("{cfg}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match blaster() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_hex_and_decimal() {
        assert_eq!(parse_id("0x04b4"), Ok(0x04B4));
        assert_eq!(parse_id("0X6570"), Ok(0x6570));
        assert_eq!(parse_id("1204"), Ok(1204));
        assert!(parse_id("0xgggg").is_err());
        assert!(parse_id("70000").is_err());
    }
}
