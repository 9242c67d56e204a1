//! Protocol constants
//!
//! These constants define the device type codes, field offsets, and other
//! layout values used by the MAX! Cube configuration (`C`) message.

// ============================================================================
// Message Framing
// ============================================================================

/// Type prefix of a configuration message line as sent by the cube.
pub const C_MESSAGE_PREFIX: &str = "C:";
/// Separator between the RF address token and the Base64 data token.
pub const DEFAULT_DELIMITER: char = ',';

// ============================================================================
// Device Type Codes
// ============================================================================

/// The cube itself.
pub const DEVICE_TYPE_CUBE: u8 = 0;
/// Radiator heating thermostat.
pub const DEVICE_TYPE_HEATING_THERMOSTAT: u8 = 1;
/// Radiator heating thermostat+.
pub const DEVICE_TYPE_HEATING_THERMOSTAT_PLUS: u8 = 2;
/// Wall mounted thermostat.
pub const DEVICE_TYPE_WALL_MOUNTED_THERMOSTAT: u8 = 3;
/// Window shutter contact.
pub const DEVICE_TYPE_SHUTTER_CONTACT: u8 = 4;
/// Eco button.
pub const DEVICE_TYPE_ECO_SWITCH: u8 = 5;

// ============================================================================
// Header Layout
// ============================================================================

/// Offset of the declared-length byte.
pub const LENGTH_OFFSET: usize = 0;
/// Offset of the embedded 3-byte RF address.
pub const RF_ADDRESS_OFFSET: usize = 1;
/// Size of an RF address in bytes.
pub const RF_ADDRESS_SIZE: usize = 3;
/// Offset of the device type discriminant.
pub const DEVICE_TYPE_OFFSET: usize = 4;
/// Offset of the ASCII serial number.
pub const SERIAL_OFFSET: usize = 8;
/// Length of the serial number in bytes.
pub const SERIAL_SIZE: usize = 10;

// ============================================================================
// Device Data Layout
// ============================================================================

/// Start of the device specific data block.
pub const DEVICE_DATA_OFFSET: usize = 18;
/// Frames shorter than this carry the wall mounted thermostat layout.
pub const FULL_THERMOSTAT_MIN_LEN: usize = 211;
/// Program table start, relative to the data block, for heating thermostats.
pub const HEATING_PROGRAM_OFFSET: usize = 11;
/// Program table start, relative to the data block, for wall thermostats.
pub const WALL_PROGRAM_OFFSET: usize = 7;

// ============================================================================
// Weekly Program
// ============================================================================

/// Number of switch points stored per day.
pub const SLOTS_PER_DAY: usize = 13;
/// Number of days in a program.
pub const DAYS_PER_WEEK: usize = 7;
/// Initial slot counter; the packed table starts on Saturday.
pub const PROGRAM_START_SLOT: usize = SLOTS_PER_DAY * 6;
/// Minutes represented by one step of the end-time byte.
pub const PROGRAM_MINUTE_STEP: u16 = 5;
/// Minutes contributed by the low bit of the temperature byte.
pub const PROGRAM_HIGH_BIT_MINUTES: u16 = 1280;
