//! Conversions to and from the value set a relational database driver works
//! with.

use crate::decode::unmarshal;
use crate::encode::marshal;
use crate::error::{Error, Result};
use crate::object::JsonObject;
use crate::raw_message::RawMessage;

/// A value as handed to, or returned by, a database driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    Null,
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Bytes(Vec<u8>),
    String(String),
}

impl DriverValue {
    /// Lowercase variant name, as used in type mismatch errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_guard::sql::DriverValue;
    ///
    /// assert_eq!(DriverValue::Null.type_name(), "null");
    /// assert_eq!(DriverValue::Bytes(vec![]).type_name(), "bytes");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            DriverValue::Null => "null",
            DriverValue::Bool(_) => "bool",
            DriverValue::Int64(_) => "int64",
            DriverValue::Float64(_) => "float64",
            DriverValue::Bytes(_) => "bytes",
            DriverValue::String(_) => "string",
        }
    }
}

/// Converts a value into a driver value for storage.
pub trait Valuer {
    fn driver_value(&self) -> Result<DriverValue>;
}

/// Fills a value from a driver value read back from storage.
pub trait Scanner {
    fn scan(&mut self, value: DriverValue) -> Result<()>;
}

impl Valuer for RawMessage {
    fn driver_value(&self) -> Result<DriverValue> {
        Ok(match self.as_bytes() {
            None => DriverValue::Null,
            Some(bytes) => DriverValue::Bytes(bytes.to_vec()),
        })
    }
}

impl Scanner for RawMessage {
    /// NULL leaves the message nil. Anything other than bytes is rejected.
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        match value {
            DriverValue::Null => Ok(()),
            DriverValue::Bytes(bytes) => {
                self.set(Some(bytes));
                Ok(())
            }
            other => Err(Error::TypeMismatch {
                expected: "bytes",
                actual: other.type_name(),
            }),
        }
    }
}

impl Valuer for JsonObject {
    fn driver_value(&self) -> Result<DriverValue> {
        marshal(self).map(DriverValue::Bytes)
    }
}

impl Scanner for JsonObject {
    /// Only bytes are accepted; NULL is a type mismatch like any other.
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        match value {
            DriverValue::Bytes(bytes) => {
                *self = unmarshal(&bytes)?;
                Ok(())
            }
            other => Err(Error::TypeMismatch {
                expected: "bytes",
                actual: other.type_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_message_values() {
        assert_eq!(RawMessage::nil().driver_value().unwrap(), DriverValue::Null);
        assert_eq!(
            RawMessage::from("[1]").driver_value().unwrap(),
            DriverValue::Bytes(b"[1]".to_vec())
        );
    }

    #[test]
    fn raw_message_scan() {
        let mut raw = RawMessage::nil();
        raw.scan(DriverValue::Null).unwrap();
        assert!(raw.is_nil());

        raw.scan(DriverValue::Bytes(b"{\"a\":1}".to_vec())).unwrap();
        assert_eq!(raw.as_bytes().unwrap(), b"{\"a\":1}");

        let err = raw.scan(DriverValue::String("{}".into())).unwrap_err();
        assert_eq!(err.to_string(), "invalid type: string (wanted bytes)");
        assert_eq!(raw.as_bytes().unwrap(), b"{\"a\":1}");
    }

    #[test]
    fn object_value_and_scan() {
        let mut o = JsonObject::new();
        o.insert("k", "v");
        let DriverValue::Bytes(bytes) = o.driver_value().unwrap() else {
            panic!("expected bytes");
        };
        assert_eq!(bytes, b"{\"k\":\"v\"}\n");

        let mut back = JsonObject::new();
        back.scan(DriverValue::Bytes(bytes)).unwrap();
        assert_eq!(back, o);

        let err = back.scan(DriverValue::Null).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                actual: "null",
                ..
            }
        ));
        let err = back.scan(DriverValue::Bytes(b"{oops".to_vec())).unwrap_err();
        assert!(err.is_invalid_json());
    }
}
