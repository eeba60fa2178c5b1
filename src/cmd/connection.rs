use crate::cmd::{arg, Command};
use crate::parse::{ok, unexpected};
use crate::{CommandError, Value};

use bytes::Bytes;

/// Authenticate to the server.
///
/// See <https://redis.io/commands/auth>
#[derive(Debug)]
pub struct Auth {
    password: String,
}

impl Auth {
    pub fn new(password: impl ToString) -> Auth {
        Auth {
            password: password.to_string(),
        }
    }
}

impl Command for Auth {
    type Output = ();

    fn name(&self) -> &'static str {
        "AUTH"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.password)]
    }

    fn map_reply(self, reply: Value) -> Result<(), CommandError> {
        ok(reply)
    }
}

/// Returns `message` back.
///
/// A reply that is a bulk string but differs from the message sent is rejected.
///
/// See <https://redis.io/commands/echo>
#[derive(Debug)]
pub struct Echo {
    message: String,
}

impl Echo {
    pub fn new(message: impl ToString) -> Echo {
        Echo {
            message: message.to_string(),
        }
    }
}

impl Command for Echo {
    type Output = String;

    fn name(&self) -> &'static str {
        "ECHO"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(&self.message)]
    }

    fn map_reply(self, reply: Value) -> Result<String, CommandError> {
        match reply {
            Value::Bulk(ref data) if data == self.message.as_bytes() => Ok(self.message),
            reply => unexpected(reply),
        }
    }
}

/// Check the connection is alive.
///
/// See <https://redis.io/commands/ping>
#[derive(Debug, Default)]
pub struct Ping;

impl Ping {
    pub fn new() -> Ping {
        Ping
    }
}

impl Command for Ping {
    type Output = bool;

    fn name(&self) -> &'static str {
        "PING"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![]
    }

    fn map_reply(self, reply: Value) -> Result<bool, CommandError> {
        match reply {
            Value::Simple(ref s) if s == "PONG" => Ok(true),
            reply => unexpected(reply),
        }
    }
}

/// Ask the server to close the connection.
///
/// See <https://redis.io/commands/quit>
#[derive(Debug, Default)]
pub struct Quit;

impl Quit {
    pub fn new() -> Quit {
        Quit
    }
}

impl Command for Quit {
    type Output = ();

    fn name(&self) -> &'static str {
        "QUIT"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![]
    }

    fn map_reply(self, reply: Value) -> Result<(), CommandError> {
        ok(reply)
    }
}

/// Change the selected database. The server's status message is passed through.
///
/// See <https://redis.io/commands/select>
#[derive(Debug)]
pub struct Select {
    index: u32,
}

impl Select {
    pub fn new(index: u32) -> Select {
        Select { index }
    }
}

impl Command for Select {
    type Output = String;

    fn name(&self) -> &'static str {
        "SELECT"
    }

    fn args(&self) -> Vec<Bytes> {
        vec![arg(self.index)]
    }

    fn map_reply(self, reply: Value) -> Result<String, CommandError> {
        match reply {
            Value::Simple(message) => Ok(message),
            reply => unexpected(reply),
        }
    }
}
