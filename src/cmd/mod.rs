//! Typed Redis commands.
//!
//! Each command knows its wire name, how to build its argument list, and which reply shapes it
//! accepts. Error replies never reach `map_reply`: the client turns them into
//! `CommandError::RedisError` first.

mod connection;
pub use connection::{Auth, Echo, Ping, Quit, Select};

mod hash;
pub use hash::{
    HDel, HExists, HGet, HGetAll, HIncrBy, HIncrByFloat, HKeys, HLen, HMGet, HMSet, HSet, HSetNx,
    HStrLen, HVals,
};

use crate::{CommandError, Value};

use bytes::Bytes;

/// A command that can be sent to the server.
pub trait Command {
    /// What a successful reply maps to.
    type Output;

    /// The command name as sent on the wire.
    fn name(&self) -> &'static str;

    /// Arguments following the command name.
    fn args(&self) -> Vec<Bytes>;

    /// Convert a non-error reply into the command's result.
    fn map_reply(self, reply: Value) -> Result<Self::Output, CommandError>;
}

/// Argument bytes of anything printable.
pub(crate) fn arg(value: impl ToString) -> Bytes {
    Bytes::from(value.to_string().into_bytes())
}
