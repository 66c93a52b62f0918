//! Pre-encoded JSON passed through untouched.

use std::fmt;

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::validator::Validator;

/// A JSON value kept as its original bytes, or the nil state.
///
/// Bytes are always owned: [`RawMessage::unmarshal_json`] and database scans
/// copy their input, so later changes to a caller's buffer are never seen
/// here.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct RawMessage(Option<Vec<u8>>);

const NULL: &[u8] = b"null";

impl RawMessage {
    /// The nil message.
    pub const fn nil() -> Self {
        Self(None)
    }

    /// Wraps `bytes` as given. They are not checked here; invalid JSON
    /// surfaces as a marshal error when the message is serialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_guard::{marshal, RawMessage};
    ///
    /// let raw = RawMessage::new(r#"{"b": 1, "a": 2}"#);
    /// assert_eq!(marshal(&raw).unwrap(), b"{\"b\": 1, \"a\": 2}\n");
    /// assert!(marshal(&RawMessage::new("{oops")).is_err());
    /// ```
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Some(bytes.into()))
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    /// Stored bytes; `None` when nil.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.0.as_deref()
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        self.0
    }

    /// The encoded form: `null` when nil, otherwise the stored bytes as-is.
    pub fn marshal_json(&self) -> Vec<u8> {
        self.as_bytes().unwrap_or(NULL).to_vec()
    }

    /// Stores a copy of `data`.
    pub fn unmarshal_json(&mut self, data: &[u8]) {
        self.0 = Some(data.to_vec());
    }

    pub(crate) fn set(&mut self, bytes: Option<Vec<u8>>) {
        self.0 = bytes;
    }
}

impl fmt::Debug for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("RawMessage(nil)"),
            Some(bytes) => write!(f, "RawMessage({})", String::from_utf8_lossy(bytes)),
        }
    }
}

impl From<Vec<u8>> for RawMessage {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for RawMessage {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for RawMessage {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl Validator for RawMessage {}

impl Serialize for RawMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(bytes) = &self.0 else {
            return serializer.serialize_unit();
        };
        let text = std::str::from_utf8(bytes).map_err(S::Error::custom)?;
        let raw = RawValue::from_string(text.to_owned()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self::new(raw.get().as_bytes()))
    }
}
