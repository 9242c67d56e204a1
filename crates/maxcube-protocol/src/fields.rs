//! Header fields shared by every device kind.

use tracing::{debug, trace};

use crate::constants::*;
use crate::frame::read_slice;

/// Extract the 10-character serial number at offset 8.
///
/// Returns an empty string when the frame is too short or the bytes are
/// not valid UTF-8.
pub fn extract_serial(bytes: &[u8]) -> String {
    let raw = match read_slice(bytes, SERIAL_OFFSET, SERIAL_SIZE) {
        Ok(raw) => raw,
        Err(e) => {
            debug!("Cannot read serial number from C message: {}", e);
            return String::new();
        }
    };

    match std::str::from_utf8(raw) {
        Ok(serial) => serial.to_string(),
        Err(e) => {
            debug!("Cannot decode serial number from C message: {}", e);
            String::new()
        }
    }
}

/// Device data block of non-thermostat devices, rendered as hex.
pub fn extract_device_data(bytes: &[u8]) -> Option<String> {
    let data = bytes.get(DEVICE_DATA_OFFSET..)?;
    let data = hex::encode_upper(data);
    trace!("DataBytes: {}", data);
    Some(data)
}
