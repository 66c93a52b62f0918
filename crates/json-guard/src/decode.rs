//! Size-bounded decoding.

use std::fmt;
use std::io::{BufReader, Read};

use log::trace;
use serde::de::DeserializeOwned;
use serde_json::de::IoRead;

use crate::error::{Error, Result};
use crate::limit::{BoundedReader, Budget, MAX_READER_SIZE};
use crate::object::JsonObject;
use crate::validator::Validator;

type Source<R> = IoRead<BufReader<BoundedReader<R>>>;

/// Reads JSON values from a stream, never consuming more than `limit` bytes
/// of it in total.
///
/// One parser lives as long as the decoder, so any byte it has looked ahead
/// at stays available to the next [`decode`](Decoder::decode).
pub struct Decoder<R: Read> {
    de: serde_json::Deserializer<Source<R>>,
    budget: Budget,
    limit: u64,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder with the default [`MAX_READER_SIZE`] budget.
    pub fn new(reader: R) -> Self {
        Self::with_limit(reader, MAX_READER_SIZE)
    }

    /// Creates a decoder that reads at most `limit` bytes from `reader`.
    ///
    /// Reads from the source are buffered, and buffered bytes count against
    /// the limit as soon as they are pulled in.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_guard::{Decoder, Value};
    ///
    /// let mut dec = Decoder::with_limit(&b"[1] [2, 3]"[..], 4);
    /// assert!(dec.decode::<Value>().is_ok());
    /// assert!(dec.decode::<Value>().unwrap_err().is_too_large());
    /// ```
    pub fn with_limit(reader: R, limit: u64) -> Self {
        let bounded = BoundedReader::new(reader, limit);
        let budget = bounded.budget();
        Self {
            de: serde_json::Deserializer::from_reader(BufReader::new(bounded)),
            budget,
            limit,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Bytes this decoder may still pull from the source.
    pub fn remaining(&self) -> u64 {
        self.budget.remaining()
    }

    /// Parses one JSON value, then runs its [`Validator`].
    ///
    /// A parse failure is reported as [`Error::TooLarge`] whenever the byte
    /// budget ran out during the attempt, even if the bytes read were
    /// malformed on their own.
    pub fn decode<T>(&mut self) -> Result<T>
    where
        T: DeserializeOwned + Validator,
    {
        let value = match T::deserialize(&mut self.de) {
            Ok(value) => value,
            Err(err) => {
                if self.budget.is_exhausted() {
                    return Err(Error::TooLarge { limit: self.limit });
                }
                if err.is_io() {
                    return Err(Error::Io(err.into()));
                }
                return Err(Error::InvalidJson(err));
            }
        };
        trace!(
            "decoded value ({} of {} budget bytes remaining)",
            self.budget.remaining(),
            self.limit
        );
        value.validate().map_err(Error::Validation)?;
        Ok(value)
    }
}

impl<R: Read> fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("limit", &self.limit)
            .field("remaining", &self.budget.remaining())
            .finish_non_exhaustive()
    }
}

/// Decodes one value from `reader`.
pub fn unmarshal_stream<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned + Validator,
    R: Read,
{
    Decoder::new(reader).decode()
}

/// Decodes one value from `data`. The size limit applies to in-memory input
/// as well.
pub fn unmarshal<T>(data: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Validator,
{
    unmarshal_stream(data)
}

/// Checks that `reader` holds a well-formed JSON object, discarding it.
pub fn validate<R: Read>(reader: R) -> Result<()> {
    unmarshal_stream::<JsonObject, R>(reader).map(drop)
}
