//! Common types used in the protocol.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::constants::*;
use crate::error::ProtocolError;

/// A 3-byte RF address identifying a device on the radio network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RfAddress(pub [u8; RF_ADDRESS_SIZE]);

impl RfAddress {
    /// Create a new address from bytes.
    pub fn new(bytes: [u8; RF_ADDRESS_SIZE]) -> Self {
        RfAddress(bytes)
    }

    /// Create from a slice. Returns None if slice is wrong length.
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; RF_ADDRESS_SIZE] = slice.try_into().ok()?;
        Some(RfAddress(bytes))
    }

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; RF_ADDRESS_SIZE] {
        &self.0
    }

    /// Get the address as 6 upper-case hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Compare against an address token as written on the wire, ignoring case.
    pub fn matches(&self, token: &str) -> bool {
        self.to_hex().eq_ignore_ascii_case(token.trim())
    }
}

impl fmt::Display for RfAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RfAddress {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| ProtocolError::malformed(format!("invalid RF address {s:?}: {e}")))?;
        RfAddress::from_slice(&bytes).ok_or_else(|| {
            ProtocolError::malformed(format!(
                "invalid RF address {s:?}: expected {RF_ADDRESS_SIZE} bytes, got {}",
                bytes.len()
            ))
        })
    }
}

impl Serialize for RfAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Kind of MAX! device described by a configuration message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeviceKind {
    /// The cube gateway.
    Cube,
    /// Radiator heating thermostat.
    HeatingThermostat,
    /// Radiator heating thermostat+.
    HeatingThermostatPlus,
    /// Wall mounted thermostat.
    WallMountedThermostat,
    /// Window shutter contact.
    ShutterContact,
    /// Eco button.
    EcoSwitch,
    /// Any discriminant not listed above.
    Unknown,
}

impl DeviceKind {
    /// Resolve a device type discriminant. Never fails.
    pub fn from_code(code: u8) -> Self {
        match code {
            DEVICE_TYPE_CUBE => DeviceKind::Cube,
            DEVICE_TYPE_HEATING_THERMOSTAT => DeviceKind::HeatingThermostat,
            DEVICE_TYPE_HEATING_THERMOSTAT_PLUS => DeviceKind::HeatingThermostatPlus,
            DEVICE_TYPE_WALL_MOUNTED_THERMOSTAT => DeviceKind::WallMountedThermostat,
            DEVICE_TYPE_SHUTTER_CONTACT => DeviceKind::ShutterContact,
            DEVICE_TYPE_ECO_SWITCH => DeviceKind::EcoSwitch,
            _ => DeviceKind::Unknown,
        }
    }

    /// The wire discriminant, or `None` for [`DeviceKind::Unknown`].
    pub fn code(&self) -> Option<u8> {
        match self {
            DeviceKind::Cube => Some(DEVICE_TYPE_CUBE),
            DeviceKind::HeatingThermostat => Some(DEVICE_TYPE_HEATING_THERMOSTAT),
            DeviceKind::HeatingThermostatPlus => Some(DEVICE_TYPE_HEATING_THERMOSTAT_PLUS),
            DeviceKind::WallMountedThermostat => Some(DEVICE_TYPE_WALL_MOUNTED_THERMOSTAT),
            DeviceKind::ShutterContact => Some(DEVICE_TYPE_SHUTTER_CONTACT),
            DeviceKind::EcoSwitch => Some(DEVICE_TYPE_ECO_SWITCH),
            DeviceKind::Unknown => None,
        }
    }

    /// Whether the device carries thermostat settings and a weekly program.
    pub fn is_thermostat(&self) -> bool {
        matches!(
            self,
            DeviceKind::HeatingThermostat
                | DeviceKind::HeatingThermostatPlus
                | DeviceKind::WallMountedThermostat
        )
    }

    /// Whether only raw device data is kept for this kind.
    pub fn has_raw_data(&self) -> bool {
        matches!(self, DeviceKind::ShutterContact | DeviceKind::EcoSwitch)
    }
}

impl From<u8> for DeviceKind {
    fn from(code: u8) -> Self {
        DeviceKind::from_code(code)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceKind::Cube => "Cube",
            DeviceKind::HeatingThermostat => "HeatingThermostat",
            DeviceKind::HeatingThermostatPlus => "HeatingThermostatPlus",
            DeviceKind::WallMountedThermostat => "WallMountedThermostat",
            DeviceKind::ShutterContact => "ShutterContact",
            DeviceKind::EcoSwitch => "EcoSwitch",
            DeviceKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
