//! json-guard - guarded JSON encoding and decoding on top of `serde_json`.
//!
//! - [`Decoder`] reads at most [`MAX_READER_SIZE`] bytes per decode and
//!   reports [`Error::TooLarge`] rather than a parse error once that budget
//!   runs out.
//! - [`Encoder`] and [`Decoder`] run the [`Validator`] hook before writing
//!   and after reading.
//! - [`RawMessage`], [`Number`] and [`JsonObject`] bridge JSON to database
//!   driver values ([`sql`]) and, with the `protobuf` feature, to the
//!   method set of generated protobuf message types.
//!
//! # Example
//!
//! ```
//! use json_guard::{marshal, unmarshal, JsonObject};
//!
//! let mut obj = JsonObject::new();
//! obj.insert("count", 3);
//!
//! let bytes = marshal(&obj).unwrap();
//! assert_eq!(bytes, b"{\"count\":3}\n");
//!
//! // Decoding turns the integer into a float; equality looks past that.
//! let back: JsonObject = unmarshal(&bytes).unwrap();
//! assert!(back.equal(&obj));
//! ```

mod decode;
mod encode;
mod error;
mod indent;
mod limit;
mod number;
mod object;
mod raw_message;
mod validator;
mod value;
#[cfg(feature = "protobuf")]
mod wire;

pub mod sql;

pub use decode::{unmarshal, unmarshal_stream, validate, Decoder};
pub use encode::{marshal, marshal_indent, marshal_stream, Encoder};
pub use error::{BoxError, Error, Result};
pub use limit::{BoundedReader, Budget, MAX_READER_SIZE};
pub use number::Number;
pub use object::{equal_objects, JsonObject};
pub use raw_message::RawMessage;
pub use validator::Validator;
pub use value::{deep_equal, Map, Value};
