//! MAX! Cube Configuration Message Decoder
//!
//! This crate decodes the configuration (`C`) message a MAX! Cube sends for
//! every paired device into a [`ConfigurationRecord`].
//!
//! # Protocol Overview
//!
//! A configuration message is a text line of the form
//! `C:<rfAddress>,<base64>`. The Base64 data holds a binary frame:
//!
//! - **Header**: length byte, 3-byte RF address, device type, serial number
//! - **Thermostat settings** (thermostats only): setpoints, offset, window,
//!   boost, decalcification and valve settings
//! - **Weekly program** (thermostats only): 7 days of 13 switch points
//! - **Device data** (shutter contacts, eco switches): kept as a hex dump
//!
//! Decoding is best effort. Only a payload that cannot be split or whose
//! Base64 is invalid is rejected; everything else yields a record whose
//! [`diagnostics`](ConfigurationRecord::diagnostics) list what was wrong.
//!
//! # Example
//!
//! ```rust
//! use maxcube_protocol::{ConfigurationRecord, DeviceKind};
//!
//! let record = ConfigurationRecord::from_message(
//!     "C:1a2b3c,ExorPAQAAABBQkNERUZHSElKAAA=",
//! )?;
//! assert_eq!(record.device_kind(), DeviceKind::ShutterContact);
//! assert_eq!(record.serial_number(), "ABCDEFGHIJ");
//! assert!(record.thermostat().is_none());
//! # Ok::<(), maxcube_protocol::ProtocolError>(())
//! ```

mod constants;
mod diagnostics;
mod error;
mod fields;
mod frame;
mod options;
mod program;
mod record;
mod thermostat;
mod types;

pub use constants::*;
pub use diagnostics::*;
pub use error::*;
pub use fields::*;
pub use frame::RawFrame;
pub use options::*;
pub use program::*;
pub use record::*;
pub use thermostat::*;
pub use types::*;
