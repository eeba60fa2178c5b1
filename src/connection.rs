use crate::decode::Decoder;
use crate::encode;
use crate::Value;

use bytes::{Bytes, BytesMut};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

/// Send requests to and receive `Value`s from a remote peer over any byte stream.
#[derive(Debug)]
pub struct Connection<S = TcpStream> {
    /// The byte stream. It uses `BufWriter` for write level buffering.
    stream: BufWriter<S>,
    /// Decoder holding the bytes read so far.
    decoder: Decoder,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create a new `Connection`.
    pub fn new(stream: S) -> Connection<S> {
        Connection {
            stream: BufWriter::new(stream),
            decoder: Decoder::new(),
        }
    }

    /// Read a single `Value` from the underlying stream.
    ///
    /// # Returns
    ///
    /// On success, the received value is returned. If the stream is closed in a way that
    /// doesn't break a reply in half, `None` is returned. Otherwise, an error is returned.
    pub async fn read_value(&mut self) -> crate::Result<Option<Value>> {
        loop {
            // Attempt to decode a value from the buffered data.
            if let Some(value) = self.decoder.decode()? {
                return Ok(Some(value));
            }

            // There is not enough buffered data to decode a value. Attempt to read more data
            // from the stream.
            //
            // `0` indicates "end of stream".
            if 0 == self.stream.read_buf(self.decoder.buffer_mut()).await? {
                if self.decoder.is_empty() {
                    return Ok(None);
                } else {
                    let err = io::Error::new(
                        io::ErrorKind::ConnectionReset,
                        "connection reset by peer",
                    );
                    return Err(err.into());
                }
            }
        }
    }

    /// Write an encoded request to the stream.
    ///
    /// The whole request is written before flushing, so it reaches the peer in one piece.
    pub async fn write_request(&mut self, request: &Bytes) -> io::Result<()> {
        self.stream.write_all(request).await?;
        self.stream.flush().await
    }

    /// Write a single `Value` to the stream.
    pub async fn write_value(&mut self, value: &Value) -> io::Result<()> {
        let mut buf = BytesMut::new();
        encode::write_value(&mut buf, value);

        self.write_request(&buf.freeze()).await
    }

    /// Shut down the write half of the stream.
    pub async fn shutdown(&mut self) -> io::Result<()> {
        self.stream.shutdown().await
    }
}
