use std::error::Error;

use clap::Parser;

use sign_logic::dfu::{list_devices, reboot_to_dfu};

/// List USB devices and send the DFU detach request to drop them into
/// bootloader mode.
#[derive(Debug, Parser)]
struct Args {
    /// Only trigger devices with these serial numbers (repeatable)
    #[clap(long = "serial")]
    serials: Vec<String>,
    /// List devices without sending the DFU request
    #[clap(long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let devices = list_devices()?;
    for device in &devices {
        println!(
            "{:04x}:{:04x}  {:<24}  {} {}",
            device.vid, device.pid, device.serial, device.manufacturer, device.product
        );
    }
    if args.list {
        return Ok(());
    }

    let selected: Vec<_> = devices
        .into_iter()
        .filter(|d| args.serials.is_empty() || args.serials.contains(&d.serial))
        .collect();
    let rebooted = reboot_to_dfu(&selected);
    println!(
        "sent DFU command to {} of {} devices",
        rebooted.len(),
        selected.len()
    );
    Ok(())
}
