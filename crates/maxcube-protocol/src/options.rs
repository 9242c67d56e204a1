//! Decoder options.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DELIMITER;

/// Options controlling how a payload is split before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Separator between the RF address and Base64 tokens.
    pub delimiter: char,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}
