//! Methods shaped like those of generated protobuf message types, so
//! [`RawMessage`] and [`JsonObject`] can be embedded as custom field types.
//!
//! `JsonObject`'s `size` / `marshal_wire` / `marshal_to` / `unmarshal_wire`
//! live with the type itself; this module adds ordering and random instances.

use std::cmp::Ordering;

use rand::Rng;

use crate::encode::marshal;
use crate::error::Result;
use crate::object::JsonObject;
use crate::raw_message::RawMessage;
use crate::value::Value;

impl RawMessage {
    pub fn equal(&self, other: &RawMessage) -> bool {
        self.wire_bytes() == other.wire_bytes()
    }

    /// Number of stored bytes; 0 when nil.
    pub fn size(&self) -> usize {
        self.wire_bytes().len()
    }

    pub fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        let bytes = self.wire_bytes();
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }

    pub fn marshal(&self) -> Result<Vec<u8>> {
        Ok(self.marshal_json())
    }

    pub fn unmarshal(&mut self, data: &[u8]) -> Result<()> {
        self.unmarshal_json(data);
        Ok(())
    }

    /// Byte-wise ordering; nil sorts like an empty message.
    pub fn compare(&self, other: &RawMessage) -> Ordering {
        self.wire_bytes().cmp(other.wire_bytes())
    }

    /// Random bytes, not necessarily valid JSON, for fuzzing harnesses.
    pub fn new_populated<R: Rng>(rng: &mut R) -> Self {
        let len = rng.gen_range(0..255usize);
        let bytes: Vec<u8> = (0..len).map(|_| rng.gen_range(0..255u8)).collect();
        Self::new(bytes)
    }

    fn wire_bytes(&self) -> &[u8] {
        self.as_bytes().unwrap_or_default()
    }
}

impl JsonObject {
    /// Orders objects by their encoded bytes. An object that cannot be
    /// marshaled sorts after every object that can.
    pub fn compare(&self, other: &JsonObject) -> Ordering {
        match (marshal(self), marshal(other)) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => Ordering::Equal,
        }
    }

    /// Up to 254 entries keyed `"0"`, `"1"`, ... holding integer values, so
    /// the result is never normalized unless empty.
    pub fn new_populated<R: Rng>(rng: &mut R) -> Self {
        let count = rng.gen_range(0..255usize);
        (0..count)
            .map(|i| (i.to_string(), Value::Int(rng.gen_range(0..(1i64 << 32) - 1))))
            .collect()
    }
}
