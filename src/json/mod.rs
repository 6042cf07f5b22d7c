//! # JSON Module
//!
//! The codec controllers use to turn values into response bodies and request
//! bodies back into values.
//!
//! [`JsonCodec`] works on [`serde_json::Value`] so it stays object-safe and can
//! be shared as `Arc<dyn JsonCodec>`. The typed conversions (the "type
//! descriptor" is the Rust type parameter) live on
//! [`ControllerExt`](crate::controller::ControllerExt) and go through
//! `serde_json::to_value` / `from_value` on either side of the codec.
//!
//! ```rust
//! use restam::json::{JsonCodec, SerdeJsonCodec};
//! use serde_json::json;
//!
//! let codec = SerdeJsonCodec::new();
//! let text = codec.encode(&json!({"cep": "01001000"})).unwrap();
//! assert_eq!(text, r#"{"cep":"01001000"}"#);
//! assert_eq!(codec.decode(&text).unwrap()["cep"], "01001000");
//! ```

use serde_json::Value;
use std::fmt;

/// Error returned when a value cannot be encoded or a text cannot be decoded
#[derive(Debug)]
pub struct CodecError(serde_json::Error);

impl CodecError {
    /// Line and column of a decode failure (both 0 for encode failures)
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.0.line(), self.0.column())
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON codec error: {}", self.0)
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError(e)
    }
}

/// Object ⇄ text conversion used by controllers.
pub trait JsonCodec: Send + Sync {
    /// Render a value as JSON text
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the value cannot be written.
    fn encode(&self, value: &Value) -> Result<String, CodecError>;

    /// Parse JSON text into a value
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the text is not valid JSON.
    fn decode(&self, text: &str) -> Result<Value, CodecError>;
}

/// Default [`JsonCodec`] backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerdeJsonCodec {
    pretty: bool,
}

impl SerdeJsonCodec {
    /// Compact output
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    #[must_use]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl JsonCodec for SerdeJsonCodec {
    fn encode(&self, value: &Value) -> Result<String, CodecError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }

    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        Ok(serde_json::from_str(text)?)
    }
}
