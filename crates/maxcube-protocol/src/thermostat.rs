//! Thermostat settings block.
//!
//! Settings start at offset 18 of the frame. The four setpoints are shared by
//! every thermostat; the remaining fields exist only in the full heating
//! thermostat layout, which is recognised by frame length alone.
//!
//! | Offset | Field                         | Encoding                         |
//! |--------|-------------------------------|----------------------------------|
//! | 18     | comfort temperature           | `i8 / 2`                         |
//! | 19     | eco temperature               | `i8 / 2`                         |
//! | 20     | max setpoint                  | `i8 / 2`                         |
//! | 21     | min setpoint                  | `i8 / 2`                         |
//! | 22     | temperature offset            | `i8 / 2 - 3.5`                   |
//! | 23     | window open temperature       | `i8 / 2`                         |
//! | 24     | window open duration          | raw                              |
//! | 25     | boost duration / valve        | bits 7..5 duration, 4..0 valve/5 |
//! | 26     | decalcification               | bits 7..5 day, 4..0 hour         |
//! | 27     | valve maximum                 | `u8 * 100 / 255`                 |
//! | 28     | valve offset                  | `u8 * 100 / 255`                 |

use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::constants::*;
use crate::error::FieldError;
use crate::frame::{read_i8, read_u8};
use crate::types::DeviceKind;

/// Which settings layout a thermostat frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThermostatLayout {
    /// Wall mounted thermostat: setpoints only.
    WallMounted,
    /// Radiator thermostat: setpoints plus offset, window, boost and valve settings.
    Heating,
}

impl ThermostatLayout {
    /// Pick the layout from the total frame length.
    pub fn for_frame_len(len: usize) -> Self {
        if len < FULL_THERMOSTAT_MIN_LEN {
            ThermostatLayout::WallMounted
        } else {
            ThermostatLayout::Heating
        }
    }

    /// Absolute offset of the weekly program table.
    pub fn program_start(&self) -> usize {
        match self {
            ThermostatLayout::WallMounted => DEVICE_DATA_OFFSET + WALL_PROGRAM_OFFSET,
            ThermostatLayout::Heating => DEVICE_DATA_OFFSET + HEATING_PROGRAM_OFFSET,
        }
    }
}

/// Decoded thermostat settings. Temperatures are in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermostatConfig {
    /// Layout the settings were read with.
    pub layout: ThermostatLayout,
    /// Comfort temperature.
    pub comfort_temperature: f32,
    /// Eco temperature.
    pub eco_temperature: f32,
    /// Highest selectable setpoint.
    pub max_setpoint: f32,
    /// Lowest selectable setpoint.
    pub min_setpoint: f32,
    /// Measured temperature offset.
    pub temperature_offset: Option<f32>,
    /// Setpoint while a window is open.
    pub window_open_temperature: Option<f32>,
    /// Window open duration, raw device value.
    pub window_open_duration: Option<u8>,
    /// Boost duration in minutes.
    pub boost_duration: Option<u8>,
    /// Valve position during boost, in percent.
    pub boost_valve_position: Option<u8>,
    /// Decalcification schedule, raw device value.
    pub decalcification: Option<u8>,
    /// Maximum valve opening, in percent.
    pub valve_maximum: Option<u8>,
    /// Valve offset, in percent.
    pub valve_offset: Option<u8>,
}

impl ThermostatConfig {
    /// Window open duration in minutes (the device counts 5 minute steps).
    pub fn window_open_minutes(&self) -> Option<u16> {
        self.window_open_duration.map(|raw| u16::from(raw) * 5)
    }

    /// Day of the weekly decalcification run.
    pub fn decalcification_day(&self) -> Option<Weekday> {
        let day = self.decalcification? >> 5;
        // Days are counted from Saturday; 7 has no meaning and wraps.
        let mut weekday = Weekday::Sat;
        for _ in 0..day {
            weekday = weekday.succ();
        }
        Some(weekday)
    }

    /// Hour of the weekly decalcification run.
    pub fn decalcification_hour(&self) -> Option<u8> {
        self.decalcification.map(|raw| raw & 0x1F)
    }
}

/// Convert a half-degree byte, truncating toward zero.
fn half_degrees(raw: i8) -> f32 {
    f32::from(raw / 2)
}

/// Map a full-scale byte onto 0..=100 percent.
fn percent(raw: u8) -> u8 {
    // 255 * 100 / 255 == 100, so the narrowing never truncates.
    (u16::from(raw) * 100 / 255) as u8
}

/// Split the boost byte into (duration minutes, valve percent).
///
/// Duration codes 0..=6 are 5 minute steps; code 7 means one hour.
pub fn decode_boost(raw: u8) -> (u8, u8) {
    let code = raw >> 5;
    let minutes = if code == 7 { 60 } else { code * 5 };
    (minutes, (raw & 0x1F) * 5)
}

/// Extract thermostat settings.
///
/// Returns `Ok(None)` for device kinds outside the thermostat family and an
/// error when the frame ends inside the settings block.
pub fn extract_thermostat(
    bytes: &[u8],
    kind: DeviceKind,
) -> Result<Option<ThermostatConfig>, FieldError> {
    if !kind.is_thermostat() {
        return Ok(None);
    }

    let base = DEVICE_DATA_OFFSET;
    let layout = ThermostatLayout::for_frame_len(bytes.len());

    let mut config = ThermostatConfig {
        layout,
        comfort_temperature: half_degrees(read_i8(bytes, base)?),
        eco_temperature: half_degrees(read_i8(bytes, base + 1)?),
        max_setpoint: half_degrees(read_i8(bytes, base + 2)?),
        min_setpoint: half_degrees(read_i8(bytes, base + 3)?),
        temperature_offset: None,
        window_open_temperature: None,
        window_open_duration: None,
        boost_duration: None,
        boost_valve_position: None,
        decalcification: None,
        valve_maximum: None,
        valve_offset: None,
    };

    match layout {
        ThermostatLayout::WallMounted => {
            for offset in base + 4..base + WALL_PROGRAM_OFFSET {
                if let Some(b) = bytes.get(offset) {
                    debug!("WallThermo byte {}: {}", offset - base, b);
                }
            }
        }
        ThermostatLayout::Heating => {
            config.temperature_offset = Some(half_degrees(read_i8(bytes, base + 4)?) - 3.5);
            config.window_open_temperature = Some(half_degrees(read_i8(bytes, base + 5)?));
            config.window_open_duration = Some(read_u8(bytes, base + 6)?);
            let (boost_duration, boost_valve) = decode_boost(read_u8(bytes, base + 7)?);
            config.boost_duration = Some(boost_duration);
            config.boost_valve_position = Some(boost_valve);
            config.decalcification = Some(read_u8(bytes, base + 8)?);
            config.valve_maximum = Some(percent(read_u8(bytes, base + 9)?));
            config.valve_offset = Some(percent(read_u8(bytes, base + 10)?));
        }
    }

    debug!(
        "Thermostat settings: comfort={} eco={} max={} min={} offset={:?} window={:?}/{:?} boost={:?}/{:?} decalc={:?} valve_max={:?} valve_offset={:?}",
        config.comfort_temperature,
        config.eco_temperature,
        config.max_setpoint,
        config.min_setpoint,
        config.temperature_offset,
        config.window_open_temperature,
        config.window_open_duration,
        config.boost_duration,
        config.boost_valve_position,
        config.decalcification,
        config.valve_maximum,
        config.valve_offset,
    );

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn heating_frame(settings: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0u8; FULL_THERMOSTAT_MIN_LEN];
        bytes[DEVICE_DATA_OFFSET..DEVICE_DATA_OFFSET + settings.len()].copy_from_slice(settings);
        bytes
    }

    #[test]
    fn test_heating_layout() {
        let bytes = heating_frame(&[42, 34, 61, 9, 7, 24, 3, 0x45, 0x0C, 255, 0]);
        let config = extract_thermostat(&bytes, DeviceKind::HeatingThermostat)
            .unwrap()
            .unwrap();

        assert_eq!(config.layout, ThermostatLayout::Heating);
        assert_relative_eq!(config.comfort_temperature, 21.0);
        assert_relative_eq!(config.eco_temperature, 17.0);
        assert_relative_eq!(config.max_setpoint, 30.0);
        assert_relative_eq!(config.min_setpoint, 4.0);
        assert_relative_eq!(config.temperature_offset.unwrap(), -0.5);
        assert_relative_eq!(config.window_open_temperature.unwrap(), 12.0);
        assert_eq!(config.window_open_duration, Some(3));
        assert_eq!(config.window_open_minutes(), Some(15));
        assert_eq!(config.boost_duration, Some(10));
        assert_eq!(config.boost_valve_position, Some(25));
        assert_eq!(config.decalcification, Some(0x0C));
        assert_eq!(config.decalcification_day(), Some(Weekday::Sat));
        assert_eq!(config.decalcification_hour(), Some(12));
        assert_eq!(config.valve_maximum, Some(100));
        assert_eq!(config.valve_offset, Some(0));
    }

    #[test]
    fn test_wall_layout_leaves_extras_absent() {
        let mut bytes = heating_frame(&[42, 34, 61, 9]);
        bytes.truncate(FULL_THERMOSTAT_MIN_LEN - 1);
        let config = extract_thermostat(&bytes, DeviceKind::HeatingThermostatPlus)
            .unwrap()
            .unwrap();

        assert_eq!(config.layout, ThermostatLayout::WallMounted);
        assert_relative_eq!(config.comfort_temperature, 21.0);
        assert!(config.temperature_offset.is_none());
        assert!(config.window_open_temperature.is_none());
        assert!(config.window_open_duration.is_none());
        assert!(config.boost_duration.is_none());
        assert!(config.boost_valve_position.is_none());
        assert!(config.decalcification.is_none());
        assert!(config.valve_maximum.is_none());
        assert!(config.valve_offset.is_none());
        assert_eq!(config.decalcification_day(), None);
    }

    #[test]
    fn test_signed_truncating_division() {
        let bytes = heating_frame(&[0xFB, 43, 0x80, 1]);
        let config = extract_thermostat(&bytes, DeviceKind::HeatingThermostat)
            .unwrap()
            .unwrap();
        // -5 / 2 truncates toward zero.
        assert_relative_eq!(config.comfort_temperature, -2.0);
        assert_relative_eq!(config.eco_temperature, 21.0);
        assert_relative_eq!(config.max_setpoint, -64.0);
        assert_relative_eq!(config.min_setpoint, 0.0);
    }

    #[test]
    fn test_non_thermostat_kinds() {
        let bytes = heating_frame(&[42, 34, 61, 9]);
        assert_eq!(extract_thermostat(&bytes, DeviceKind::ShutterContact), Ok(None));
        assert_eq!(extract_thermostat(&bytes, DeviceKind::Unknown), Ok(None));
    }

    #[test]
    fn test_short_frame_is_an_error() {
        let bytes = vec![0u8; DEVICE_DATA_OFFSET + 2];
        let err = extract_thermostat(&bytes, DeviceKind::WallMountedThermostat).unwrap_err();
        assert_eq!(
            err,
            FieldError::OutOfBounds {
                offset: DEVICE_DATA_OFFSET + 2,
                len: 1,
                frame_len: DEVICE_DATA_OFFSET + 2,
            }
        );
    }

    #[test]
    fn test_decode_boost() {
        assert_eq!(decode_boost(0x00), (0, 0));
        assert_eq!(decode_boost(0b0110_0101), (15, 25));
        assert_eq!(decode_boost(0b1101_0100), (30, 100));
        assert_eq!(decode_boost(0b1111_1111), (60, 155));
    }

    #[test]
    fn test_percent_scaling() {
        assert_eq!(percent(0), 0);
        assert_eq!(percent(128), 50);
        assert_eq!(percent(255), 100);
    }

    #[test]
    fn test_decalcification_weekday() {
        let cases = [
            (0b0000_1100, Weekday::Sat, 12),
            (0b0010_0000, Weekday::Sun, 0),
            (0b0100_0011, Weekday::Mon, 3),
            (0b1100_0000, Weekday::Fri, 0),
            (0b1110_0000, Weekday::Sat, 0),
            (0b1111_0111, Weekday::Sat, 23),
        ];
        for (raw, day, hour) in cases {
            let bytes = heating_frame(&[42, 34, 61, 9, 7, 24, 3, 0, raw, 255, 0]);
            let config = extract_thermostat(&bytes, DeviceKind::HeatingThermostat)
                .unwrap()
                .unwrap();
            assert_eq!(config.decalcification, Some(raw));
            assert_eq!(config.decalcification_day(), Some(day), "raw {raw:#010b}");
            assert_eq!(config.decalcification_hour(), Some(hour));
        }
    }

    #[test]
    fn test_program_start() {
        assert_eq!(ThermostatLayout::Heating.program_start(), 29);
        assert_eq!(ThermostatLayout::WallMounted.program_start(), 25);
    }
}
