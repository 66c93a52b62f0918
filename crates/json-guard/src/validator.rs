//! Self-validation hook run by [`Encoder`](crate::Encoder) before writing and
//! by [`Decoder`](crate::Decoder) after a successful parse.

use std::collections::{BTreeMap, HashMap};

use crate::error::BoxError;

/// A type that can check its own invariants.
///
/// The default method accepts everything, so `impl Validator for T {}` marks a
/// type as encodable without adding a check.
///
/// ```
/// use json_guard::{unmarshal, BoxError, Validator};
///
/// #[derive(serde::Deserialize)]
/// struct Account {
///     balance: i64,
/// }
///
/// impl Validator for Account {
///     fn validate(&self) -> Result<(), BoxError> {
///         if self.balance < 0 {
///             return Err("balance must be non-negative".into());
///         }
///         Ok(())
///     }
/// }
///
/// let err = unmarshal::<Account>(br#"{"balance":-1}"#).err().unwrap();
/// assert_eq!(err.to_string(), "balance must be non-negative");
/// ```
pub trait Validator {
    fn validate(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T: Validator + ?Sized> Validator for &T {
    fn validate(&self) -> Result<(), BoxError> {
        (**self).validate()
    }
}

impl<T: Validator + ?Sized> Validator for &mut T {
    fn validate(&self) -> Result<(), BoxError> {
        (**self).validate()
    }
}

impl<T: Validator + ?Sized> Validator for Box<T> {
    fn validate(&self) -> Result<(), BoxError> {
        (**self).validate()
    }
}

impl<T: Validator> Validator for Option<T> {
    fn validate(&self) -> Result<(), BoxError> {
        match self {
            Some(v) => v.validate(),
            None => Ok(()),
        }
    }
}

macro_rules! accept_all {
    ($($ty:ty),* $(,)?) => {
        $(impl Validator for $ty {})*
    };
}

accept_all!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    str,
    String,
    serde_json::Value,
    serde_json::Number,
    serde_json::Map<String, serde_json::Value>,
);

impl<T> Validator for [T] {}
impl<T> Validator for Vec<T> {}
impl<T, const N: usize> Validator for [T; N] {}
impl<K, V, S> Validator for HashMap<K, V, S> {}
impl<K, V> Validator for BTreeMap<K, V> {}
