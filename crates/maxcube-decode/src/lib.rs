//! MAX! Cube configuration message decoder CLI.
//!
//! Reads `C:` message lines (or bare `<rfAddress>,<base64>` payloads), decodes
//! each into a [`ConfigurationRecord`] and writes it as text or JSON.

mod config;
mod error;

pub use config::*;
pub use error::*;

use std::io::{BufRead, Write};

use maxcube_protocol::{ConfigurationRecord, ProtocolError};
use tracing::{debug, error, warn};

/// Counts collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Lines decoded into a record.
    pub decoded: usize,
    /// Lines rejected by the decoder.
    pub failed: usize,
    /// Decoded records that carry diagnostics.
    pub with_diagnostics: usize,
}

impl Summary {
    /// Whether the run should be reported as failed.
    pub fn is_failure(&self, strict: bool) -> bool {
        self.failed > 0 || (strict && self.with_diagnostics > 0)
    }
}

/// Whether a line starts with a cube message type such as `C:` or `H:`.
fn has_message_type(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Decode one input line.
///
/// Lines starting with a message type (`C:`, `H:`, ...) are decoded as full
/// messages, so only `C` messages are accepted. Anything else is decoded as a
/// bare payload.
pub fn decode_line(line: &str, config: &CliConfig) -> Result<ConfigurationRecord, ProtocolError> {
    let line = line.trim();
    if has_message_type(line) {
        ConfigurationRecord::from_message_with(line, &config.decoder)
    } else {
        ConfigurationRecord::decode_with(line, &config.decoder)
    }
}

/// Write a record in the configured format.
pub fn render<W: Write>(
    record: &ConfigurationRecord,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{record}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Decode every non-empty line of `input` and write the records to `out`.
///
/// Lines that fail to decode are logged and counted; they do not stop the run.
pub fn process<R: BufRead, W: Write>(
    input: R,
    config: &CliConfig,
    out: &mut W,
) -> CliResult<Summary> {
    let mut summary = Summary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record = match decode_line(&line, config) {
            Ok(record) => record,
            Err(source) => {
                let e = CliError::Decode {
                    line: index + 1,
                    source,
                };
                error!("{}", e);
                summary.failed += 1;
                continue;
            }
        };

        debug!(
            "Decoded {} {} from line {}",
            record.device_kind(),
            record.rf_address(),
            index + 1
        );
        record.log_summary();
        if !record.is_clean() {
            // Integrity warnings are already logged by the decoder.
            for diagnostic in record.diagnostics().iter().filter(|d| !d.is_integrity_warning()) {
                warn!("{} {}: {}", record.device_kind(), record.rf_address(), diagnostic);
            }
            summary.with_diagnostics += 1;
        }

        render(&record, config.format, out)?;
        summary.decoded += 1;
    }

    Ok(summary)
}
