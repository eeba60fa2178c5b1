//! Helpers for turning reply values into Rust types.
//!
//! Every helper takes the whole reply so that a mismatch can be reported as
//! `UnexpectedReply` carrying exactly what the server sent.

use crate::{CommandError, Value};

use bytes::Bytes;
use std::str;

type Result<T> = std::result::Result<T, CommandError>;

/// Returns the reply as a mismatch.
pub(crate) fn unexpected<T>(reply: Value) -> Result<T> {
    Err(CommandError::UnexpectedReply(reply))
}

/// Bulk payloads are only strings if they are valid UTF-8.
pub(crate) fn utf8(data: &Bytes) -> Option<String> {
    str::from_utf8(&data[..]).ok().map(|s| s.to_string())
}

/// `+OK`
pub(crate) fn ok(reply: Value) -> Result<()> {
    match reply {
        Value::Simple(ref s) if s == "OK" => Ok(()),
        reply => unexpected(reply),
    }
}

/// `:n`
pub(crate) fn integer(reply: Value) -> Result<i64> {
    match reply {
        Value::Integer(n) => Ok(n),
        reply => unexpected(reply),
    }
}

/// `:1` or `:0`
pub(crate) fn boolean(reply: Value) -> Result<bool> {
    match reply {
        Value::Integer(1) => Ok(true),
        Value::Integer(0) => Ok(false),
        reply => unexpected(reply),
    }
}

/// `$n` as a string, `$-1` as `None`.
pub(crate) fn optional_string(reply: Value) -> Result<Option<String>> {
    match reply {
        Value::Null => Ok(None),
        Value::Bulk(ref data) => match utf8(data) {
            Some(s) => Ok(Some(s)),
            None => unexpected(reply),
        },
        reply => unexpected(reply),
    }
}

/// An array where every element is a bulk string. One bad element rejects the whole reply.
pub(crate) fn string_list(reply: Value) -> Result<Vec<String>> {
    let strings = match &reply {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Bulk(data) => utf8(data),
                _ => None,
            })
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };

    match strings {
        Some(strings) => Ok(strings),
        None => unexpected(reply),
    }
}

/// An array of bulk strings where `$-1` elements stand for missing entries.
pub(crate) fn optional_string_list(reply: Value) -> Result<Vec<Option<String>>> {
    let strings = match &reply {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Bulk(data) => utf8(data).map(Some),
                Value::Null => Some(None),
                _ => None,
            })
            .collect::<Option<Vec<_>>>(),
        _ => None,
    };

    match strings {
        Some(strings) => Ok(strings),
        None => unexpected(reply),
    }
}
