//! Hash commands.
//!
//! See <https://redis.io/commands#hash>

use crate::cmd::{arg, Command};
use crate::parse::{
    boolean, integer, ok, optional_string, optional_string_list, string_list, unexpected, utf8,
};
use crate::{CommandError, Value};

use bytes::Bytes;

/// Remove `fields` from the hash at `key`. Returns how many were removed.
#[derive(Debug)]
pub struct HDel {
    key: String,
    fields: Vec<String>,
}

impl HDel {
    pub fn new(key: impl ToString, fields: &[&str]) -> HDel {
        HDel {
            key: key.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Command for HDel {
    type Output = i64;

    fn name(&self) -> &'static str {
        "HDEL"
    }

    fn args(&self) -> Vec<Bytes> {
        let mut args = vec![arg(&self.key)];
        args.extend(self.fields.iter().map(arg));
        args
    }

    fn map_reply(self, reply: Value) -> Result<i64, CommandError> {
        integer(reply)
    }
}

/// Whether `field` exists in the hash at `key`.
#[derive(Debug)]
pub struct HExists {
    key: String,
    field: String,
}

impl HExists {
    pub fn new(key: impl ToString, field: impl ToString) -> HExists {
        HExists {
            key: key.to_string(),
            field: field.to_string(),
        }
    }
}

impl Command for HExists {
    type Output = bool;

    fn name(&self) -> &'static str {
        "HEXISTS"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key), arg(&self.field)]
    }

    fn map_reply(self, reply: Value) -> Result<bool, CommandError> {
        boolean(reply)
    }
}

/// Get the value of `field` in the hash at `key`.
///
/// If the field or the key does not exist the special value nil is returned, mapped to `None`.
#[derive(Debug)]
pub struct HGet {
    key: String,
    field: String,
}

impl HGet {
    pub fn new(key: impl ToString, field: impl ToString) -> HGet {
        HGet {
            key: key.to_string(),
            field: field.to_string(),
        }
    }
}

impl Command for HGet {
    type Output = Option<String>;

    fn name(&self) -> &'static str {
        "HGET"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key), arg(&self.field)]
    }

    fn map_reply(self, reply: Value) -> Result<Option<String>, CommandError> {
        optional_string(reply)
    }
}

/// All fields and values of the hash at `key`, flattened as `[field, value, field, value, ..]`.
#[derive(Debug)]
pub struct HGetAll {
    key: String,
}

impl HGetAll {
    pub fn new(key: impl ToString) -> HGetAll {
        HGetAll {
            key: key.to_string(),
        }
    }
}

impl Command for HGetAll {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "HGETALL"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key)]
    }

    fn map_reply(self, reply: Value) -> Result<Vec<String>, CommandError> {
        string_list(reply)
    }
}

/// Increment the integer stored at `field` by `increment`. Returns the new value.
#[derive(Debug)]
pub struct HIncrBy {
    key: String,
    field: String,
    increment: i64,
}

impl HIncrBy {
    pub fn new(key: impl ToString, field: impl ToString, increment: i64) -> HIncrBy {
        HIncrBy {
            key: key.to_string(),
            field: field.to_string(),
            increment,
        }
    }
}

impl Command for HIncrBy {
    type Output = i64;

    fn name(&self) -> &'static str {
        "HINCRBY"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key), arg(&self.field), arg(self.increment)]
    }

    fn map_reply(self, reply: Value) -> Result<i64, CommandError> {
        integer(reply)
    }
}

/// Increment the float stored at `field` by `increment`.
///
/// The server answers with the new value as a bulk string.
#[derive(Debug)]
pub struct HIncrByFloat {
    key: String,
    field: String,
    increment: f64,
}

impl HIncrByFloat {
    pub fn new(key: impl ToString, field: impl ToString, increment: f64) -> HIncrByFloat {
        HIncrByFloat {
            key: key.to_string(),
            field: field.to_string(),
            increment,
        }
    }
}

impl Command for HIncrByFloat {
    type Output = f64;

    fn name(&self) -> &'static str {
        "HINCRBYFLOAT"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key), arg(&self.field), arg(self.increment)]
    }

    fn map_reply(self, reply: Value) -> Result<f64, CommandError> {
        let parsed = match &reply {
            Value::Bulk(data) => utf8(data).and_then(|s| s.parse::<f64>().ok()),
            _ => None,
        };

        match parsed {
            Some(value) => Ok(value),
            None => unexpected(reply),
        }
    }
}

/// All field names of the hash at `key`.
#[derive(Debug)]
pub struct HKeys {
    key: String,
}

impl HKeys {
    pub fn new(key: impl ToString) -> HKeys {
        HKeys {
            key: key.to_string(),
        }
    }
}

impl Command for HKeys {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "HKEYS"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key)]
    }

    fn map_reply(self, reply: Value) -> Result<Vec<String>, CommandError> {
        string_list(reply)
    }
}

/// Number of fields in the hash at `key`.
#[derive(Debug)]
pub struct HLen {
    key: String,
}

impl HLen {
    pub fn new(key: impl ToString) -> HLen {
        HLen {
            key: key.to_string(),
        }
    }
}

impl Command for HLen {
    type Output = i64;

    fn name(&self) -> &'static str {
        "HLEN"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key)]
    }

    fn map_reply(self, reply: Value) -> Result<i64, CommandError> {
        integer(reply)
    }
}

/// Values of `fields` in the hash at `key`, `None` for missing fields.
#[derive(Debug)]
pub struct HMGet {
    key: String,
    fields: Vec<String>,
}

impl HMGet {
    pub fn new(key: impl ToString, fields: &[&str]) -> HMGet {
        HMGet {
            key: key.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Command for HMGet {
    type Output = Vec<Option<String>>;

    fn name(&self) -> &'static str {
        "HMGET"
    }

    fn args(&self) -> Vec<Bytes> {
        let mut args = vec![arg(&self.key)];
        args.extend(self.fields.iter().map(arg));
        args
    }

    fn map_reply(self, reply: Value) -> Result<Vec<Option<String>>, CommandError> {
        optional_string_list(reply)
    }
}

/// Set several fields of the hash at `key` at once.
#[derive(Debug)]
pub struct HMSet {
    key: String,
    pairs: Vec<(String, Bytes)>,
}

impl HMSet {
    pub fn new(key: impl ToString, pairs: &[(&str, Bytes)]) -> HMSet {
        HMSet {
            key: key.to_string(),
            pairs: pairs
                .iter()
                .map(|(field, value)| (field.to_string(), value.clone()))
                .collect(),
        }
    }
}

impl Command for HMSet {
    type Output = ();

    fn name(&self) -> &'static str {
        "HMSET"
    }

    fn args(&self) -> Vec<Bytes> {
        let mut args = Vec::with_capacity(1 + 2 * self.pairs.len());
        args.push(arg(&self.key));

        for (field, value) in &self.pairs {
            args.push(arg(field));
            args.push(value.clone());
        }

        args
    }

    fn map_reply(self, reply: Value) -> Result<(), CommandError> {
        ok(reply)
    }
}

/// Set `field` in the hash at `key` to `value`. Returns `true` if the field is new.
#[derive(Debug)]
pub struct HSet {
    key: String,
    field: String,
    value: Bytes,
}

impl HSet {
    pub fn new(key: impl ToString, field: impl ToString, value: Bytes) -> HSet {
        HSet {
            key: key.to_string(),
            field: field.to_string(),
            value,
        }
    }
}

impl Command for HSet {
    type Output = bool;

    fn name(&self) -> &'static str {
        "HSET"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key), arg(&self.field), self.value.clone()]
    }

    fn map_reply(self, reply: Value) -> Result<bool, CommandError> {
        boolean(reply)
    }
}

/// Set `field` only if it does not exist yet. Returns `true` if it was set.
#[derive(Debug)]
pub struct HSetNx {
    key: String,
    field: String,
    value: Bytes,
}

impl HSetNx {
    pub fn new(key: impl ToString, field: impl ToString, value: Bytes) -> HSetNx {
        HSetNx {
            key: key.to_string(),
            field: field.to_string(),
            value,
        }
    }
}

impl Command for HSetNx {
    type Output = bool;

    fn name(&self) -> &'static str {
        "HSETNX"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key), arg(&self.field), self.value.clone()]
    }

    fn map_reply(self, reply: Value) -> Result<bool, CommandError> {
        boolean(reply)
    }
}

/// Length in bytes of the value stored at `field`, `0` when missing.
#[derive(Debug)]
pub struct HStrLen {
    key: String,
    field: String,
}

impl HStrLen {
    pub fn new(key: impl ToString, field: impl ToString) -> HStrLen {
        HStrLen {
            key: key.to_string(),
            field: field.to_string(),
        }
    }
}

impl Command for HStrLen {
    type Output = i64;

    fn name(&self) -> &'static str {
        "HSTRLEN"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key), arg(&self.field)]
    }

    fn map_reply(self, reply: Value) -> Result<i64, CommandError> {
        integer(reply)
    }
}

/// All values of the hash at `key`.
#[derive(Debug)]
pub struct HVals {
    key: String,
}

impl HVals {
    pub fn new(key: impl ToString) -> HVals {
        HVals {
            key: key.to_string(),
        }
    }
}

impl Command for HVals {
    type Output = Vec<String>;

    fn name(&self) -> &'static str {
        "HVALS"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.key)]
    }

    fn map_reply(self, reply: Value) -> Result<Vec<String>, CommandError> {
        string_list(reply)
    }
}
