//! Validating encoding.

use std::io::Write;

use log::trace;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::indent::IndentFormatter;
use crate::validator::Validator;

/// Writes JSON values to a stream, each followed by a newline.
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
    buf: Vec<u8>,
}

impl<W: Write> Encoder<W> {
    /// Wraps `writer`. Every [`encode`](Encoder::encode) issues one
    /// `write_all` of a complete, newline-terminated value.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_guard::{Encoder, JsonObject};
    ///
    /// let mut enc = Encoder::new(Vec::new());
    /// enc.encode(&JsonObject::new()).unwrap();
    /// enc.encode(&[1, 2]).unwrap();
    /// assert_eq!(enc.into_inner(), b"{}\n[1,2]\n");
    /// ```
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Validates `value`, then writes it.
    ///
    /// The value is serialized in full before anything reaches the writer, so
    /// a failed validation or serialization leaves the destination untouched.
    pub fn encode<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + Validator + ?Sized,
    {
        value.validate().map_err(Error::Validation)?;
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, value).map_err(Error::Marshal)?;
        self.buf.push(b'\n');
        self.writer.write_all(&self.buf)?;
        trace!("encoded value into {} bytes", self.buf.len());
        Ok(())
    }
}

/// Encodes `value` into a new buffer, trailing newline included.
pub fn marshal<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + Validator + ?Sized,
{
    let mut encoder = Encoder::new(Vec::new());
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Encodes `value` straight to `writer`.
pub fn marshal_stream<T, W>(writer: W, value: &T) -> Result<()>
where
    T: Serialize + Validator + ?Sized,
    W: Write,
{
    Encoder::new(writer).encode(value)
}

/// Pretty-prints `value`. Each line after the first starts with `prefix`,
/// followed by one `indent` per nesting level.
///
/// Unlike [`marshal`] this does not run the [`Validator`] hook and does not
/// append a trailing newline.
pub fn marshal_indent<T>(value: &T, prefix: &str, indent: &str) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut out = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, IndentFormatter::new(prefix, indent));
    value.serialize(&mut ser).map_err(Error::Marshal)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use serde_json::json;

    #[derive(Serialize)]
    struct Positive(i32);

    impl Validator for Positive {
        fn validate(&self) -> Result<(), BoxError> {
            if self.0 <= 0 {
                return Err("not positive".into());
            }
            Ok(())
        }
    }

    #[test_log::test]
    fn appends_newline() {
        assert_eq!(marshal(&json!({"a": 1})).unwrap(), b"{\"a\":1}\n");
        assert_eq!(marshal("x").unwrap(), b"\"x\"\n");
    }

    #[test]
    fn validation_failure_writes_nothing() {
        let mut out = Vec::new();
        let err = marshal_stream(&mut out, &Positive(0)).unwrap_err();
        assert_eq!(err.to_string(), "not positive");
        assert!(out.is_empty());
        marshal_stream(&mut out, &Positive(2)).unwrap();
        assert_eq!(out, b"2\n");
    }

    #[test]
    fn encoder_writes_one_line_per_value() {
        let mut enc = Encoder::new(Vec::new());
        enc.encode(&json!([1, 2])).unwrap();
        enc.encode(&json!(null)).unwrap();
        assert_eq!(enc.into_inner(), b"[1,2]\nnull\n");
    }

    #[test]
    fn indent_with_prefix() {
        let out = marshal_indent(&json!({"a": [1, 2], "b": {}}), ">", "  ").unwrap();
        let want = "{\n>  \"a\": [\n>    1,\n>    2\n>  ],\n>  \"b\": {}\n>}";
        assert_eq!(String::from_utf8(out).unwrap(), want);
    }

    #[test]
    fn indent_without_prefix_matches_pretty() {
        let v = json!({"k": [true, null, "s"], "n": {"m": []}});
        let ours = marshal_indent(&v, "", "  ").unwrap();
        let pretty = serde_json::to_vec_pretty(&v).unwrap();
        assert_eq!(ours, pretty);
    }

    #[test]
    fn indent_skips_validation() {
        assert_eq!(marshal_indent(&Positive(-3), "", "\t").unwrap(), b"-3");
    }
}
