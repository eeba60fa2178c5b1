//! A client for the Redis serialization protocol (RESP).
//!
//! The crate is split along the path a command takes:
//!
//! * `encode` turns a command name and its arguments into request bytes.
//! * `Decoder` turns the bytes read back, in whatever chunks they arrive, into a `Value`.
//! * `Client` sends one request at a time and maps each reply onto a typed result.
//!
//! ```no_run
//! use resp_client::{client, ConnectInfo};
//!
//! # async fn run() -> resp_client::Result<()> {
//! let mut client = client::connect(ConnectInfo::default()).await?;
//!
//! assert!(client.ping().await?);
//! let _name = client.hget("user:1", "name").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub use client::{connect, Client};

pub mod cmd;
pub use cmd::Command;

mod connection;
pub use connection::Connection;

mod decode;
pub use decode::Decoder;

pub mod encode;
pub use encode::encode;

mod error;
pub use error::{CommandError, Error, Result};

mod info;
pub use info::{ConnectInfo, DEFAULT_HOST, DEFAULT_PORT};

mod parse;

mod value;
#[doc(inline)]
pub use value::Value;
