//! Weekly program decoding.
//!
//! The program table is a run of 2-byte switch points, 13 per day, seven
//! days starting on Saturday:
//!
//! ```text
//!  byte 0                         byte 1
//! +---------------------------+--+------------------------+
//! | setpoint (signed, / 4)    |t8| end time t7..t0        |
//! +---------------------------+--+------------------------+
//! ```
//!
//! The end of a switch point is `(t8..t0) * 5` minutes after midnight; each
//! switch point starts where the previous one of the same day ended.

use std::fmt;

use chrono::Weekday;
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::constants::*;
use crate::error::FieldError;

/// Render minutes after midnight as `HH:MM`.
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// One switch point of a day schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgramInterval {
    /// Start, in minutes after midnight.
    pub start: u16,
    /// End, in minutes after midnight. 1440 marks the end of the day.
    pub end: u16,
    /// Setpoint in degrees Celsius.
    pub temperature: f32,
}

impl ProgramInterval {
    /// Whether `minute` falls inside this interval.
    pub fn contains(&self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }
}

impl fmt::Display for ProgramInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {:.1}C",
            format_minutes(self.start),
            format_minutes(self.end),
            self.temperature
        )
    }
}

/// Switch points of a single day, in time order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySchedule {
    /// Contiguous intervals starting at 00:00.
    pub intervals: Vec<ProgramInterval>,
}

impl DaySchedule {
    /// Whether no switch point was decoded for this day.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Setpoint in effect at `minute`, if the schedule covers it.
    pub fn setpoint_at(&self, minute: u16) -> Option<f32> {
        self.intervals
            .iter()
            .find(|interval| interval.contains(minute))
            .map(|interval| interval.temperature)
    }
}

/// A thermostat's weekly program.
///
/// Days are indexed counting from Sunday (`0`) to Saturday (`6`). The packed
/// table starts on Saturday, so the first decoded day lands at index 6.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeeklyProgram {
    days: [DaySchedule; DAYS_PER_WEEK],
}

impl WeeklyProgram {
    /// Schedule for a weekday.
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    /// Schedule by index, Sunday being 0.
    pub fn day_at(&self, index: usize) -> Option<&DaySchedule> {
        self.days.get(index)
    }

    /// All seven schedules, Sunday first.
    pub fn days(&self) -> &[DaySchedule; DAYS_PER_WEEK] {
        &self.days
    }

    /// Number of days with at least one switch point.
    pub fn populated_days(&self) -> usize {
        self.days.iter().filter(|day| !day.is_empty()).count()
    }

    /// Whether nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.populated_days() == 0
    }

    /// Iterate `(index, schedule)` in the order the device stores them,
    /// Saturday first.
    pub fn iter_stored_order(&self) -> impl Iterator<Item = (usize, &DaySchedule)> {
        let first = PROGRAM_START_SLOT / SLOTS_PER_DAY % DAYS_PER_WEEK;
        (0..DAYS_PER_WEEK)
            .map(move |i| (first + i) % DAYS_PER_WEEK)
            .map(move |index| (index, &self.days[index]))
    }
}

impl fmt::Display for WeeklyProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, day) in self.iter_stored_order().filter(|(_, day)| !day.is_empty()) {
            write!(f, "Day {index}:")?;
            for interval in &day.intervals {
                write!(f, " {interval}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Program decoding stopped early; `program` holds what was decoded.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("weekly program truncated: {error}")]
pub struct TruncatedProgram {
    /// Switch points decoded before the failure.
    pub program: WeeklyProgram,
    /// Why decoding stopped.
    #[source]
    pub error: FieldError,
}

/// Decode the program table starting at `program_start`.
///
/// Decoding runs until the frame is exhausted or seven days have been read.
/// A frame that stops short yields fewer days; a dangling odd byte returns
/// the partial program inside the error.
pub fn extract_program(
    bytes: &[u8],
    program_start: usize,
) -> Result<WeeklyProgram, TruncatedProgram> {
    let mut program = WeeklyProgram::default();
    let last_slot = PROGRAM_START_SLOT + SLOTS_PER_DAY * DAYS_PER_WEEK;

    let mut slot = PROGRAM_START_SLOT;
    let mut day = 0;
    let mut start = 0u16;
    let mut offset = program_start;

    while offset < bytes.len() {
        if slot == last_slot {
            trace!("Ignoring {} byte(s) after the weekly program", bytes.len() - offset);
            break;
        }

        let (b0, b1) = match bytes.get(offset..offset + 2) {
            Some(&[b0, b1]) => (b0, b1),
            _ => {
                return Err(TruncatedProgram {
                    program,
                    error: FieldError::DanglingProgramByte { offset },
                })
            }
        };

        if slot % SLOTS_PER_DAY == 0 {
            day = slot / SLOTS_PER_DAY % DAYS_PER_WEEK;
            start = 0;
        }

        let end = u16::from(b1) * PROGRAM_MINUTE_STEP
            + u16::from(b0 & 0x01) * PROGRAM_HIGH_BIT_MINUTES;
        let temperature = f32::from((b0 as i8) / 4);

        program.days[day].intervals.push(ProgramInterval {
            start,
            end,
            temperature,
        });

        start = end;
        offset += 2;
        slot += 1;
    }

    Ok(program)
}
