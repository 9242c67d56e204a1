//! Frame decoding utilities.
//!
//! A configuration message payload is an RF address token and a Base64
//! token joined by a delimiter. The Base64 token decodes to the raw frame:
//!
//! ```text
//! +-----+-------------+------+---------+-----------+------------------+
//! | len | rf_addr(3)  | type | ... (3) | serial(10)| device data ...  |
//! +-----+-------------+------+---------+-----------+------------------+
//!   0     1..4          4      5..8      8..18       18..
//! ```
//!
//! The length byte and embedded address are only checked, never enforced.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use tracing::warn;

use crate::constants::*;
use crate::diagnostics::{Diagnostic, Section};
use crate::error::{FieldError, ProtocolError, ProtocolResult};
use crate::types::RfAddress;

/// Standard alphabet, accepting data with or without trailing padding.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded configuration frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    claimed_address: String,
    bytes: Vec<u8>,
}

impl RawFrame {
    /// Create a frame from an address token and already decoded bytes.
    pub fn new(claimed_address: impl Into<String>, bytes: Vec<u8>) -> Self {
        RawFrame {
            claimed_address: claimed_address.into(),
            bytes,
        }
    }

    /// Decode a `<rfAddress>,<base64>` payload.
    pub fn decode(payload: &str) -> ProtocolResult<Self> {
        Self::decode_with(payload, DEFAULT_DELIMITER)
    }

    /// Decode a payload whose tokens are joined by `delimiter`.
    ///
    /// Only a missing token or invalid Base64 is an error. Anything after a
    /// second delimiter is ignored.
    pub fn decode_with(payload: &str, delimiter: char) -> ProtocolResult<Self> {
        let mut tokens = payload.trim().split(delimiter);

        let address = tokens.next().map(str::trim).unwrap_or_default();
        if address.is_empty() {
            return Err(ProtocolError::malformed("missing RF address token"));
        }

        let data = tokens.next().map(str::trim).ok_or_else(|| {
            ProtocolError::malformed(format!("missing data token after {delimiter:?}"))
        })?;

        let bytes = BASE64
            .decode(data)
            .map_err(|e| ProtocolError::malformed(format!("invalid Base64 data: {e}")))?;

        Ok(RawFrame::new(address, bytes))
    }

    /// The RF address token as it appeared in the payload.
    pub fn claimed_address(&self) -> &str {
        &self.claimed_address
    }

    /// The decoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of decoded bytes, including the length byte.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the Base64 token decoded to nothing.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bytes the frame claims follow the length byte.
    pub fn declared_length(&self) -> Option<usize> {
        self.bytes.get(LENGTH_OFFSET).map(|&b| usize::from(b))
    }

    /// Address stored in bytes 1..4.
    pub fn embedded_address(&self) -> Option<RfAddress> {
        read_slice(&self.bytes, RF_ADDRESS_OFFSET, RF_ADDRESS_SIZE)
            .ok()
            .and_then(RfAddress::from_slice)
    }

    /// Raw device type discriminant.
    pub fn device_code(&self) -> Option<u8> {
        self.bytes.get(DEVICE_TYPE_OFFSET).copied()
    }

    /// Run the advisory length and address checks.
    pub fn integrity_check(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match self.declared_length() {
            Some(declared) => {
                let actual = self.bytes.len() - 1;
                if declared != actual {
                    warn!(
                        "C message {} malformed: wrong data length. Expected bytes {}, actual bytes {}",
                        self.claimed_address, declared, actual
                    );
                    diagnostics.push(Diagnostic::LengthMismatch { declared, actual });
                }
            }
            None => {
                let error = FieldError::OutOfBounds {
                    offset: LENGTH_OFFSET,
                    len: 1,
                    frame_len: 0,
                };
                warn!("C message {} malformed: {}", self.claimed_address, error);
                diagnostics.push(Diagnostic::degraded(Section::Header, &error));
            }
        }

        match self.embedded_address() {
            Some(embedded) if !embedded.matches(&self.claimed_address) => {
                let claimed = self.claimed_address.to_uppercase();
                warn!(
                    "C message malformed: wrong RF address. Expected address {}, actual address {}",
                    claimed, embedded
                );
                diagnostics.push(Diagnostic::AddressMismatch {
                    claimed,
                    embedded: embedded.to_hex(),
                });
            }
            Some(_) => {}
            None if self.bytes.is_empty() => {}
            None => {
                let error = FieldError::OutOfBounds {
                    offset: RF_ADDRESS_OFFSET,
                    len: RF_ADDRESS_SIZE,
                    frame_len: self.bytes.len(),
                };
                warn!("C message {} malformed: {}", self.claimed_address, error);
                diagnostics.push(Diagnostic::degraded(Section::Header, &error));
            }
        }

        diagnostics
    }
}

// ============================================================================
// Bounds-checked reads
// ============================================================================

/// Read an unsigned byte.
pub(crate) fn read_u8(bytes: &[u8], offset: usize) -> Result<u8, FieldError> {
    bytes.get(offset).copied().ok_or(FieldError::OutOfBounds {
        offset,
        len: 1,
        frame_len: bytes.len(),
    })
}

/// Read a byte as two's complement.
pub(crate) fn read_i8(bytes: &[u8], offset: usize) -> Result<i8, FieldError> {
    read_u8(bytes, offset).map(|b| b as i8)
}

/// Borrow `len` bytes starting at `offset`.
pub(crate) fn read_slice(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8], FieldError> {
    offset
        .checked_add(len)
        .and_then(|end| bytes.get(offset..end))
        .ok_or(FieldError::OutOfBounds {
            offset,
            len,
            frame_len: bytes.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn payload(address: &str, bytes: &[u8]) -> String {
        format!("{},{}", address, STANDARD.encode(bytes))
    }

    #[test]
    fn test_decode_splits_tokens() {
        let bytes = [3u8, 0x0A, 0x1B, 0x2C];
        let frame = RawFrame::decode(&payload("0a1b2c", &bytes)).unwrap();
        assert_eq!(frame.claimed_address(), "0a1b2c");
        assert_eq!(frame.bytes(), &bytes);
        assert_eq!(frame.declared_length(), Some(3));
        assert!(frame.integrity_check().is_empty());
    }

    #[test]
    fn test_decode_accepts_missing_padding() {
        // "AQID" is [1, 2, 3]; "AQI" is [1, 2] without its "=" padding.
        let frame = RawFrame::decode("000000,AQI").unwrap();
        assert_eq!(frame.bytes(), &[1, 2]);
    }

    #[test]
    fn test_decode_custom_delimiter() {
        let frame = RawFrame::decode_with("0A1B2C;AQID", ';').unwrap();
        assert_eq!(frame.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let err = RawFrame::decode("0A1B2C,!!not base64!!").unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedPayload(_)));
    }

    #[test]
    fn test_decode_rejects_missing_token() {
        assert!(RawFrame::decode("0A1B2C").is_err());
        assert!(RawFrame::decode(",AQID").is_err());
        assert!(RawFrame::decode("").is_err());
    }

    #[test]
    fn test_length_mismatch_is_advisory() {
        let frame = RawFrame::decode(&payload("0A1B2C", &[9, 0x0A, 0x1B, 0x2C])).unwrap();
        assert_eq!(
            frame.integrity_check(),
            vec![Diagnostic::LengthMismatch {
                declared: 9,
                actual: 3
            }]
        );
    }

    #[test]
    fn test_address_mismatch_is_advisory() {
        let frame = RawFrame::decode(&payload("0a1b2c", &[3, 0x0A, 0x1B, 0x2D])).unwrap();
        assert_eq!(
            frame.integrity_check(),
            vec![Diagnostic::AddressMismatch {
                claimed: "0A1B2C".to_string(),
                embedded: "0A1B2D".to_string(),
            }]
        );
    }

    #[test]
    fn test_short_header_degrades() {
        let frame = RawFrame::new("0A1B2C", vec![1, 0x0A]);
        let diagnostics = frame.integrity_check();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::FieldDecodeDegraded {
                section: Section::Header,
                ..
            }
        ));

        let empty = RawFrame::new("0A1B2C", Vec::new());
        assert_eq!(empty.integrity_check().len(), 1);
        assert_eq!(empty.device_code(), None);
    }

    #[test]
    fn test_bounds_checked_reads() {
        let bytes = [0x01, 0xFF, 0x80];
        assert_eq!(read_u8(&bytes, 1), Ok(0xFF));
        assert_eq!(read_i8(&bytes, 1), Ok(-1));
        assert_eq!(read_i8(&bytes, 2), Ok(-128));
        assert!(read_u8(&bytes, 3).is_err());
        assert_eq!(read_slice(&bytes, 1, 2), Ok(&bytes[1..3]));
        assert!(read_slice(&bytes, 2, 2).is_err());
        assert!(read_slice(&bytes, usize::MAX, 2).is_err());
    }
}
