//! Redis client implementation.

use crate::cmd::{
    Auth, Command, Echo, HDel, HExists, HGet, HGetAll, HIncrBy, HIncrByFloat, HKeys, HLen, HMGet,
    HMSet, HSet, HSetNx, HStrLen, HVals, Ping, Quit, Select,
};
use crate::encode::encode;
use crate::{CommandError, ConnectInfo, Connection, Value};

use bytes::Bytes;
use std::io::{Error, ErrorKind};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::{debug, instrument};

/// Established connection with a Redis server.
///
/// Every call that talks to the server takes `&mut self`: one request is written, then exactly
/// one reply is read, before the next request can start. Replies carry no request id, so this
/// is what keeps them paired with the right call.
#[derive(Debug)]
pub struct Client<S = TcpStream> {
    connection: Connection<S>,
    /// Sent by `auth`. Never sent implicitly.
    password: Option<String>,
    /// Database index from the connection parameters. Not selected implicitly.
    database: u32,
}

/// Establish a connection with the Redis server described by `info`.
///
/// Neither `AUTH` nor `SELECT` is sent. Call `auth` and `select` explicitly.
pub async fn connect(info: ConnectInfo) -> crate::Result<Client> {
    let socket = TcpStream::connect((info.host(), info.port())).await?;

    debug!(host = info.host(), port = info.port(), "connected");

    Ok(Client::new(socket, info))
}

impl<S> Client<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already established byte stream.
    pub fn new(stream: S, info: ConnectInfo) -> Client<S> {
        Client {
            connection: Connection::new(stream),
            password: info.password().map(str::to_string),
            database: info.database(),
        }
    }

    /// The database index given at construction.
    pub fn database(&self) -> u32 {
        self.database
    }

    /// Send `name` with `args` and wait for the reply.
    ///
    /// Error replies are returned as `Value::Error`, untouched.
    pub async fn dispatch(&mut self, name: &str, args: Vec<Bytes>) -> crate::Result<Value> {
        let request = encode(name, args);

        debug!(command = name, ?request);

        self.connection.write_request(&request).await?;

        self.read_response().await
    }

    /// Run `cmd` and map its reply.
    ///
    /// An error reply becomes `CommandError::RedisError`, any other reply is handed to the
    /// command.
    pub async fn execute<C: Command>(&mut self, cmd: C) -> crate::Result<C::Output> {
        match self.dispatch(cmd.name(), cmd.args()).await? {
            Value::Error(msg) => Err(CommandError::RedisError(msg).into()),
            reply => Ok(cmd.map_reply(reply)?),
        }
    }

    /// Authenticate with the configured password.
    ///
    /// Fails with `MissingPassword` without touching the connection when none is configured.
    #[instrument(skip(self))]
    pub async fn auth(&mut self) -> crate::Result<()> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => return Err(CommandError::MissingPassword.into()),
        };

        self.execute(Auth::new(password)).await
    }

    #[instrument(skip(self))]
    pub async fn echo(&mut self, message: &str) -> crate::Result<String> {
        self.execute(Echo::new(message)).await
    }

    /// Returns `true` when the server answers `PONG`.
    #[instrument(skip(self))]
    pub async fn ping(&mut self) -> crate::Result<bool> {
        self.execute(Ping::new()).await
    }

    /// Ask the server to close the connection.
    #[instrument(skip(self))]
    pub async fn quit(&mut self) -> crate::Result<()> {
        self.execute(Quit::new()).await
    }

    /// Select the database at `index`, returning the server's status message.
    #[instrument(skip(self))]
    pub async fn select(&mut self, index: u32) -> crate::Result<String> {
        self.execute(Select::new(index)).await
    }

    #[instrument(skip(self))]
    pub async fn hdel(&mut self, key: &str, fields: &[&str]) -> crate::Result<i64> {
        self.execute(HDel::new(key, fields)).await
    }

    #[instrument(skip(self))]
    pub async fn hexists(&mut self, key: &str, field: &str) -> crate::Result<bool> {
        self.execute(HExists::new(key, field)).await
    }

    /// Get the value of `field` in the hash at `key`.
    #[instrument(skip(self))]
    pub async fn hget(&mut self, key: &str, field: &str) -> crate::Result<Option<String>> {
        self.execute(HGet::new(key, field)).await
    }

    #[instrument(skip(self))]
    pub async fn hgetall(&mut self, key: &str) -> crate::Result<Vec<String>> {
        self.execute(HGetAll::new(key)).await
    }

    #[instrument(skip(self))]
    pub async fn hincrby(&mut self, key: &str, field: &str, increment: i64) -> crate::Result<i64> {
        self.execute(HIncrBy::new(key, field, increment)).await
    }

    #[instrument(skip(self))]
    pub async fn hincrbyfloat(
        &mut self,
        key: &str,
        field: &str,
        increment: f64,
    ) -> crate::Result<f64> {
        self.execute(HIncrByFloat::new(key, field, increment)).await
    }

    #[instrument(skip(self))]
    pub async fn hkeys(&mut self, key: &str) -> crate::Result<Vec<String>> {
        self.execute(HKeys::new(key)).await
    }

    #[instrument(skip(self))]
    pub async fn hlen(&mut self, key: &str) -> crate::Result<i64> {
        self.execute(HLen::new(key)).await
    }

    #[instrument(skip(self))]
    pub async fn hmget(&mut self, key: &str, fields: &[&str]) -> crate::Result<Vec<Option<String>>> {
        self.execute(HMGet::new(key, fields)).await
    }

    #[instrument(skip(self))]
    pub async fn hmset(&mut self, key: &str, pairs: &[(&str, Bytes)]) -> crate::Result<()> {
        self.execute(HMSet::new(key, pairs)).await
    }

    /// Set `field` in the hash at `key`. Returns `true` if the field did not exist before.
    #[instrument(skip(self))]
    pub async fn hset(&mut self, key: &str, field: &str, value: Bytes) -> crate::Result<bool> {
        self.execute(HSet::new(key, field, value)).await
    }

    #[instrument(skip(self))]
    pub async fn hsetnx(&mut self, key: &str, field: &str, value: Bytes) -> crate::Result<bool> {
        self.execute(HSetNx::new(key, field, value)).await
    }

    #[instrument(skip(self))]
    pub async fn hstrlen(&mut self, key: &str, field: &str) -> crate::Result<i64> {
        self.execute(HStrLen::new(key, field)).await
    }

    #[instrument(skip(self))]
    pub async fn hvals(&mut self, key: &str) -> crate::Result<Vec<String>> {
        self.execute(HVals::new(key)).await
    }

    /// Shut down the connection.
    pub async fn close(mut self) -> crate::Result<()> {
        self.connection.shutdown().await?;
        Ok(())
    }

    async fn read_response(&mut self) -> crate::Result<Value> {
        let response = self.connection.read_value().await?;

        debug!(?response);

        match response {
            Some(value) => Ok(value),
            // `None` here indicates the server has closed the connection without sending a
            // reply. This is unexpected and is represented as a "connection reset by peer" error.
            None => {
                let err = Error::new(ErrorKind::ConnectionReset, "connection reset by server");

                Err(err.into())
            }
        }
    }
}
