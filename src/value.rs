//! Provides a type representing a RESP reply value.
//!
//! The Redis protocol can be found at <https://redis.io/topics/protocol>

use bytes::Bytes;
use std::fmt;

/// A value in the Redis protocol.
///
/// `Null` and `NullArray` are the server's "no value" signals for bulk strings and arrays. They
/// are never equal to an empty `Bulk` or an empty `Array`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Bytes),
    Array(Vec<Value>),
    Null,
    NullArray,
}

impl Value {
    /// Returns an empty array value.
    pub fn array() -> Value {
        Value::Array(vec![])
    }

    /// Pushes a "bulk" value into the array.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not an array.
    pub fn push_bulk(&mut self, bytes: Bytes) {
        match self {
            Value::Array(vec) => vec.push(Value::Bulk(bytes)),
            _ => panic!("not an array value"),
        }
    }

    /// Returns `true` for the two "no value" shapes.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null | Value::NullArray)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Value::Simple(s) => s.eq(other),
            Value::Bulk(s) => s.eq(other),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use std::str;

        match self {
            Value::Simple(response) => response.fmt(fmt),
            Value::Error(msg) => write!(fmt, "error: {}", msg),
            Value::Integer(num) => num.fmt(fmt),
            Value::Bulk(msg) => match str::from_utf8(msg) {
                Ok(string) => write!(fmt, "{:?}", string),
                Err(_) => write!(fmt, "{:?}", msg),
            },
            Value::Null | Value::NullArray => "(nil)".fmt(fmt),
            Value::Array(parts) => {
                write!(fmt, "[")?;

                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(fmt, ", ")?;
                    }
                    part.fmt(fmt)?;
                }

                write!(fmt, "]")
            }
        }
    }
}
