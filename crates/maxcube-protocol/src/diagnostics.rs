//! Non-fatal conditions raised while decoding a configuration message.

use std::fmt;

use serde::Serialize;

use crate::error::FieldError;

/// Part of the frame a degraded decode applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    /// Length byte, embedded address and device type.
    Header,
    /// Thermostat settings block.
    Thermostat,
    /// Weekly program table.
    Program,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Header => write!(f, "header"),
            Section::Thermostat => write!(f, "thermostat settings"),
            Section::Program => write!(f, "weekly program"),
        }
    }
}

/// A warning attached to a decoded record. None of these abort decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// The length byte disagrees with the number of bytes that follow it.
    LengthMismatch {
        /// Length declared by byte 0.
        declared: usize,
        /// Bytes actually following byte 0.
        actual: usize,
    },

    /// The embedded RF address differs from the address token.
    AddressMismatch {
        /// Address token from the payload, upper-cased.
        claimed: String,
        /// Address read from bytes 1..4.
        embedded: String,
    },

    /// A section could not be fully decoded and was omitted or truncated.
    FieldDecodeDegraded {
        /// Affected section.
        section: Section,
        /// What went wrong.
        reason: String,
    },
}

impl Diagnostic {
    /// Create a degraded-section diagnostic from a field error.
    pub fn degraded(section: Section, error: &FieldError) -> Self {
        Diagnostic::FieldDecodeDegraded {
            section,
            reason: error.to_string(),
        }
    }

    /// Whether this is one of the frame integrity checks.
    pub fn is_integrity_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::LengthMismatch { .. } | Diagnostic::AddressMismatch { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LengthMismatch { declared, actual } => write!(
                f,
                "wrong data length: expected {declared} bytes, actual {actual} bytes"
            ),
            Diagnostic::AddressMismatch { claimed, embedded } => write!(
                f,
                "wrong RF address: expected {claimed}, actual {embedded}"
            ),
            Diagnostic::FieldDecodeDegraded { section, reason } => {
                write!(f, "{section} not decoded: {reason}")
            }
        }
    }
}
