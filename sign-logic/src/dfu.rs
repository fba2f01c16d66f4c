//! USB DFU-mode trigger for the sign's update workflow.
//!
//! The firmware exposes a DFU runtime interface; sending it a DFU_DETACH
//! class request drops the device into its bootloader. Which interface
//! number carries the runtime differs per build, so the request is probed
//! across the whole interface range.

use std::time::Duration;

use rusb::{Device, GlobalContext};

use crate::error::ToolError;

/// bmRequestType of the class-level DFU_DETACH request.
const DFU_REQUEST_TYPE: u8 = 0x21;
const DFU_DETACH: u8 = 0;

const CONTROL_TIMEOUT: Duration = Duration::from_millis(500);

pub const UNKNOWN_SERIAL: &str = "Unknown Serial";

/// Identity of an enumerated USB device, kept alongside its handle source so
/// the DFU request can be sent later.
pub struct UsbDeviceInfo {
    pub vid: u16,
    pub pid: u16,
    pub serial: String,
    pub manufacturer: String,
    pub product: String,
    device: Device<GlobalContext>,
}

impl std::fmt::Debug for UsbDeviceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsbDeviceInfo")
            .field("vid", &self.vid)
            .field("pid", &self.pid)
            .field("serial", &self.serial)
            .field("manufacturer", &self.manufacturer)
            .field("product", &self.product)
            .finish()
    }
}

/// Enumerates USB devices, sorted by serial number. Devices that refuse
/// descriptor reads are skipped so one locked-down device cannot hide the
/// rest of the bus.
pub fn list_devices() -> Result<Vec<UsbDeviceInfo>, ToolError> {
    let mut infos = Vec::new();
    for device in rusb::devices()?.iter() {
        match describe(&device) {
            Ok(info) => infos.push(info),
            Err(err) => log::warn!(
                "error accessing device on bus {} address {}: {err}",
                device.bus_number(),
                device.address()
            ),
        }
    }
    infos.sort_by(|a, b| a.serial.cmp(&b.serial));
    Ok(infos)
}

fn describe(device: &Device<GlobalContext>) -> Result<UsbDeviceInfo, ToolError> {
    let descriptor = device.device_descriptor()?;
    let handle = device.open()?;
    let serial = handle
        .read_serial_number_string_ascii(&descriptor)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_SERIAL.to_string());
    let manufacturer = handle
        .read_manufacturer_string_ascii(&descriptor)
        .unwrap_or_default();
    let product = handle
        .read_product_string_ascii(&descriptor)
        .unwrap_or_default();
    Ok(UsbDeviceInfo {
        vid: descriptor.vendor_id(),
        pid: descriptor.product_id(),
        serial,
        manufacturer,
        product,
        device: device.clone(),
    })
}

/// Sends DFU_DETACH to one device, scanning interface numbers 0..=255 until
/// one accepts the request.
pub fn send_dfu(info: &UsbDeviceInfo) -> Result<(), ToolError> {
    let handle = info.device.open()?;
    let mut last = rusb::Error::NotFound;
    for interface in 0u16..=255 {
        match handle.write_control(
            DFU_REQUEST_TYPE,
            DFU_DETACH,
            0,
            interface,
            &[],
            CONTROL_TIMEOUT,
        ) {
            Ok(_) => return Ok(()),
            Err(err) => last = err,
        }
    }
    Err(ToolError::Usb(last))
}

/// Triggers DFU mode on every device in `devices`, returning the serials
/// that accepted. Failures are logged and skipped.
pub fn reboot_to_dfu(devices: &[UsbDeviceInfo]) -> Vec<String> {
    let mut rebooted = Vec::new();
    for device in devices {
        match send_dfu(device) {
            Ok(()) => {
                log::info!("sent DFU command to: {}", device.serial);
                rebooted.push(device.serial.clone());
            }
            Err(err) => {
                log::warn!("could not set {} into DFU mode: {err}", device.serial);
            }
        }
    }
    rebooted
}
