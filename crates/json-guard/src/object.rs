//! Generic JSON object with round-trip tolerant equality and a one-shot
//! marshal cache for two-pass wire encoders.

use std::fmt;
use std::ops::{Deref, DerefMut};

use log::trace;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::decode::unmarshal;
use crate::encode::marshal;
use crate::error::{Error, Result};
use crate::validator::Validator;
use crate::value::{maps_deep_equal, Map, Value};

const EMPTY: &[u8] = b"{}";

/// A JSON object whose values may be hand-built or decoded.
///
/// Besides the map, an object holds a cache slot filled by
/// [`size`](JsonObject::size) and drained by
/// [`marshal_wire`](JsonObject::marshal_wire). The slot is never part of the
/// map, never serialized, and is cleared by any mutable access to the map.
#[derive(Default)]
pub struct JsonObject {
    map: Map,
    cache: Option<Result<Vec<u8>>>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_map(self) -> Map {
        self.map
    }

    /// Inserts `value` under `key`, returning the previous value. Clears any
    /// cached encoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_guard::{JsonObject, Value};
    ///
    /// let mut obj = JsonObject::new();
    /// assert_eq!(obj.insert("n", 1), None);
    /// assert_eq!(obj.insert("n", 2.5), Some(Value::Int(1)));
    /// assert_eq!(obj.get("n"), Some(&Value::Float(2.5)));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.cache = None;
        self.map.insert(key.into(), value.into())
    }

    /// Removes `key`, clearing any cached encoding.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.cache = None;
        self.map.remove(key)
    }

    /// True when every value has the shape a decode produces, meaning a
    /// marshal/unmarshal round trip would leave the object unchanged.
    pub fn is_normalized(&self) -> bool {
        self.map.values().all(Value::is_normalized)
    }

    /// Round-trip tolerant equality: objects that encode the same JSON are
    /// equal even if one was built by hand (integers, raw messages) and the
    /// other was decoded.
    pub fn equal(&self, other: &JsonObject) -> bool {
        if maps_deep_equal(&self.map, &other.map) {
            return true;
        }
        let (norm_a, norm_b) = (self.is_normalized(), other.is_normalized());
        if norm_a && norm_b {
            return false;
        }
        let Some(a) = normalize(self, norm_a) else {
            return false;
        };
        let Some(b) = normalize(other, norm_b) else {
            return false;
        };
        maps_deep_equal(a.as_map(), b.as_map())
    }

    /// Encoded length, remembered for the next
    /// [`marshal_wire`](JsonObject::marshal_wire). Returns 0 if the object
    /// cannot be marshaled; the error is replayed by `marshal_wire`.
    pub fn size(&mut self) -> usize {
        if self.map.is_empty() {
            return EMPTY.len();
        }
        if let Some(cached) = &self.cache {
            trace!("json object size served from cache");
            return cached.as_ref().map_or(0, Vec::len);
        }
        let result = marshal(&*self);
        let len = result.as_ref().map_or(0, Vec::len);
        trace!("json object size cached ({len} bytes)");
        self.cache = Some(result);
        len
    }

    /// Encoded bytes, taken from the cache left by `size` when present.
    pub fn marshal_wire(&mut self) -> Result<Vec<u8>> {
        if self.map.is_empty() {
            return Ok(EMPTY.to_vec());
        }
        match self.cache.take() {
            Some(cached) => {
                trace!("json object marshal taken from cache");
                cached
            }
            None => marshal(&*self),
        }
    }

    /// Writes the encoded bytes into `buf`, returning how many were copied.
    pub fn marshal_to(&mut self, buf: &mut [u8]) -> Result<usize> {
        let bytes = self.marshal_wire()?;
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }

    /// Replaces the contents with the object decoded from `data`.
    pub fn unmarshal_wire(&mut self, data: &[u8]) -> Result<()> {
        *self = unmarshal(data)?;
        Ok(())
    }

    pub(crate) fn as_map(&self) -> &Map {
        &self.map
    }

    /// True while a `size` result is waiting to be taken by `marshal_wire`.
    pub fn has_cached(&self) -> bool {
        self.cache.is_some()
    }
}

/// Returns `obj` itself when already normalized, or its round-tripped copy.
fn normalize(obj: &JsonObject, normalized: bool) -> Option<std::borrow::Cow<'_, JsonObject>> {
    use std::borrow::Cow;

    if normalized {
        return Some(Cow::Borrowed(obj));
    }
    let bytes = marshal(obj).ok()?;
    unmarshal::<JsonObject>(&bytes).ok().map(Cow::Owned)
}

/// Compares two possibly-nil objects; nil equals only nil.
pub fn equal_objects(a: Option<&JsonObject>, b: Option<&JsonObject>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.equal(b),
        _ => false,
    }
}

impl Deref for JsonObject {
    type Target = Map;

    fn deref(&self) -> &Map {
        &self.map
    }
}

impl DerefMut for JsonObject {
    fn deref_mut(&mut self) -> &mut Map {
        self.cache = None;
        &mut self.map
    }
}

/// Clones carry the map only; the cache slot starts empty.
impl Clone for JsonObject {
    fn clone(&self) -> Self {
        Self::from(self.map.clone())
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonObject").field(&self.map).finish()
    }
}

impl From<Map> for JsonObject {
    fn from(map: Map) -> Self {
        Self { map, cache: None }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect::<Map>(),
        )
    }
}

impl TryFrom<serde_json::Value> for JsonObject {
    type Error = Error;

    /// Fails with [`Error::TypeMismatch`] unless `value` is an object.
    fn try_from(value: serde_json::Value) -> Result<Self> {
        match Value::from(value) {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(Error::TypeMismatch {
                expected: "object",
                actual: value_kind(&other),
            }),
        }
    }
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Float(_) | Value::Int(_) | Value::Uint(_) | Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Raw(_) => "raw message",
    }
}

impl Validator for JsonObject {}

impl Serialize for JsonObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JsonObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from)
    }
}
