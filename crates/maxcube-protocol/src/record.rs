//! Decoded configuration record.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::constants::*;
use crate::diagnostics::{Diagnostic, Section};
use crate::error::{FieldError, ProtocolError, ProtocolResult};
use crate::fields::{extract_device_data, extract_serial};
use crate::frame::RawFrame;
use crate::options::DecoderOptions;
use crate::program::{extract_program, WeeklyProgram};
use crate::thermostat::{extract_thermostat, ThermostatConfig};
use crate::types::DeviceKind;

/// Configuration of one device, decoded from a `C` message.
///
/// Sections that do not apply to the device kind are `None`. Sections that
/// apply but failed to decode are also `None` (or partial, for the weekly
/// program) and leave an entry in [`diagnostics`](Self::diagnostics).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationRecord {
    rf_address: String,
    serial_number: String,
    device_kind: DeviceKind,
    device_code: Option<u8>,
    thermostat: Option<ThermostatConfig>,
    program: Option<WeeklyProgram>,
    device_data: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl ConfigurationRecord {
    /// Decode a `<rfAddress>,<base64>` payload.
    pub fn decode(payload: &str) -> ProtocolResult<Self> {
        Self::decode_with(payload, &DecoderOptions::default())
    }

    /// Decode a payload using custom options.
    pub fn decode_with(payload: &str, options: &DecoderOptions) -> ProtocolResult<Self> {
        let frame = RawFrame::decode_with(payload, options.delimiter)?;
        Ok(Self::from_frame(&frame))
    }

    /// Decode a full message line such as `C:0a1b2c,0gobLAIB...`.
    pub fn from_message(line: &str) -> ProtocolResult<Self> {
        Self::from_message_with(line, &DecoderOptions::default())
    }

    /// Decode a full message line using custom options.
    pub fn from_message_with(line: &str, options: &DecoderOptions) -> ProtocolResult<Self> {
        let line = line.trim();
        match line.strip_prefix(C_MESSAGE_PREFIX) {
            Some(payload) => Self::decode_with(payload, options),
            None => match line.split_once(':') {
                Some((kind, _)) => Err(ProtocolError::UnexpectedMessageType(kind.to_string())),
                None => Err(ProtocolError::malformed("missing message type prefix")),
            },
        }
    }

    /// Build a record from an already decoded frame. Never fails.
    pub fn from_frame(frame: &RawFrame) -> Self {
        let mut diagnostics = frame.integrity_check();
        let bytes = frame.bytes();

        let device_code = frame.device_code();
        if device_code.is_none() && frame.embedded_address().is_some() {
            let error = FieldError::OutOfBounds {
                offset: DEVICE_TYPE_OFFSET,
                len: 1,
                frame_len: bytes.len(),
            };
            debug!("C message {}: no device type: {}", frame.claimed_address(), error);
            diagnostics.push(Diagnostic::degraded(Section::Header, &error));
        }
        let device_kind = device_code.map_or(DeviceKind::Unknown, DeviceKind::from_code);

        let serial_number = extract_serial(bytes);

        let mut thermostat = None;
        let mut program = None;
        let mut device_data = None;

        if device_kind.is_thermostat() {
            match extract_thermostat(bytes, device_kind) {
                Ok(Some(config)) => {
                    program = match extract_program(bytes, config.layout.program_start()) {
                        Ok(decoded) => Some(decoded),
                        Err(truncated) => {
                            debug!("C message {}: {}", frame.claimed_address(), truncated);
                            diagnostics
                                .push(Diagnostic::degraded(Section::Program, &truncated.error));
                            Some(truncated.program)
                        }
                    };
                    thermostat = Some(config);
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(
                        "C message {}: thermostat settings not decoded: {}",
                        frame.claimed_address(),
                        e
                    );
                    diagnostics.push(Diagnostic::degraded(Section::Thermostat, &e));
                }
            }
        } else if device_kind.has_raw_data() {
            device_data = extract_device_data(bytes);
        }

        ConfigurationRecord {
            rf_address: frame.claimed_address().to_string(),
            serial_number,
            device_kind,
            device_code,
            thermostat,
            program,
            device_data,
            diagnostics,
        }
    }

    /// RF address as given in the payload.
    pub fn rf_address(&self) -> &str {
        &self.rf_address
    }

    /// Serial number, empty if it could not be read.
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Kind of device.
    pub fn device_kind(&self) -> DeviceKind {
        self.device_kind
    }

    /// Raw device type byte, if the frame carried one.
    pub fn device_code(&self) -> Option<u8> {
        self.device_code
    }

    /// Thermostat settings.
    pub fn thermostat(&self) -> Option<&ThermostatConfig> {
        self.thermostat.as_ref()
    }

    /// Weekly program.
    pub fn program(&self) -> Option<&WeeklyProgram> {
        self.program.as_ref()
    }

    /// Hex dump of the device data block of shutter contacts and eco switches.
    pub fn device_data(&self) -> Option<&str> {
        self.device_data.as_deref()
    }

    /// Everything that went wrong while decoding.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Length and address warnings only.
    pub fn integrity_warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_integrity_warning())
    }

    /// Whether decoding was clean.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Write the record to the debug log, one line per field.
    pub fn log_summary(&self) {
        for line in self.to_string().lines() {
            debug!("{}", line);
        }
    }
}

impl fmt::Display for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== C Message ===")?;
        writeln!(f, "DeviceType:           {}", self.device_kind)?;
        writeln!(f, "SerialNumber:         {}", self.serial_number)?;
        writeln!(f, "RFAddress:            {}", self.rf_address)?;

        if let Some(config) = &self.thermostat {
            writeln!(f, "Temp Comfort:         {:.1}", config.comfort_temperature)?;
            writeln!(f, "Temp Eco:             {:.1}", config.eco_temperature)?;
            writeln!(f, "Temp Setpoint Max:    {:.1}", config.max_setpoint)?;
            writeln!(f, "Temp Setpoint Min:    {:.1}", config.min_setpoint)?;
            if let Some(offset) = config.temperature_offset {
                writeln!(f, "Temp Offset:          {offset:.1}")?;
            }
            if let Some(temperature) = config.window_open_temperature {
                writeln!(f, "Temp Open Window:     {temperature:.1}")?;
            }
            if let Some(duration) = config.window_open_duration {
                writeln!(f, "Duration Open Window: {duration}")?;
            }
            if let Some(duration) = config.boost_duration {
                writeln!(f, "Duration Boost:       {duration} min")?;
            }
            if let Some(valve) = config.boost_valve_position {
                writeln!(f, "Boost Valve Pos:      {valve}%")?;
            }
            if let Some(decalcification) = config.decalcification {
                writeln!(f, "Decalcification:      {decalcification}")?;
            }
            if let Some(valve) = config.valve_maximum {
                writeln!(f, "ValveMaximum:         {valve}%")?;
            }
            if let Some(valve) = config.valve_offset {
                writeln!(f, "ValveOffset:          {valve}%")?;
            }
        }

        if let Some(program) = &self.program {
            writeln!(f, "ProgramData:")?;
            write!(f, "{program}")?;
        }

        if let Some(data) = &self.device_data {
            writeln!(f, "DataBytes:            {data}")?;
        }

        for diagnostic in &self.diagnostics {
            writeln!(f, "Warning:              {diagnostic}")?;
        }

        Ok(())
    }
}
