//! Incremental RESP decoder.
//!
//! Bytes arrive from the stream in chunks of arbitrary size. The decoder buffers them and
//! produces a `Value` once a full reply has been received. Nested arrays are decoded one
//! element at a time: completed elements are removed from the buffer and kept on a stack of
//! partially built arrays, so they are never parsed twice.

use crate::{CommandError, Value};

use atoi::FromRadix10SignedChecked;
use bytes::{Buf, Bytes, BytesMut};
use std::io::Cursor;
use std::string::FromUtf8Error;

/// Upper bound on the capacity reserved up front for an array. The length comes from the
/// peer, larger arrays still decode but grow as elements arrive.
const MAX_PREALLOCATED: usize = 1024;

/// Streaming decoder for server replies.
#[derive(Debug)]
pub struct Decoder {
    /// Bytes received but not yet consumed.
    buffer: BytesMut,
    /// Arrays whose header has been read but which still wait for elements. The last entry is
    /// the innermost array.
    pending: Vec<PendingArray>,
}

#[derive(Debug)]
struct PendingArray {
    remaining: usize,
    items: Vec<Value>,
}

/// Outcome of parsing the header of a single frame.
enum Step {
    Value(Value),
    Array(usize),
}

#[derive(Debug)]
enum Error {
    Incomplete,
    Malformed(String),
}

const ERROR_INVALID_FRAME: &str = "protocol error: invalid frame format";

impl Decoder {
    /// Create an empty `Decoder`.
    pub fn new() -> Decoder {
        Decoder {
            buffer: BytesMut::with_capacity(4 * 1024),
            pending: Vec::new(),
        }
    }

    /// The read buffer. Bytes read from the stream are appended here directly.
    pub(crate) fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buffer
    }

    /// Returns `true` if no bytes of a partial reply are being held.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.pending.is_empty()
    }

    /// Append `src` to the buffer and try to decode a reply.
    pub fn feed(&mut self, src: &[u8]) -> Result<Option<Value>, CommandError> {
        self.buffer.extend_from_slice(src);
        self.decode()
    }

    /// Tries to decode a reply from the buffered bytes.
    ///
    /// # Returns
    ///
    /// If a full reply has been buffered, it is returned and its bytes removed from the buffer.
    /// Bytes past the end of the reply stay buffered for the next call. `Ok(None)` means more
    /// input is needed. If the buffered bytes are not valid RESP, `MalformedReply` is returned
    /// and all buffered state is discarded.
    pub fn decode(&mut self) -> Result<Option<Value>, CommandError> {
        match self.advance() {
            Ok(value) => Ok(value),
            Err(Error::Incomplete) => Ok(None),
            Err(Error::Malformed(msg)) => {
                self.clear();
                Err(CommandError::MalformedReply(msg))
            }
        }
    }

    /// Drop all buffered bytes and partial arrays.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pending.clear();
    }

    fn advance(&mut self) -> Result<Option<Value>, Error> {
        'frames: loop {
            let mut buf = Cursor::new(&self.buffer[..]);

            let step = match parse_step(&mut buf) {
                Ok(step) => step,
                Err(Error::Incomplete) => return Ok(None),
                Err(err) => return Err(err),
            };

            let len = buf.position() as usize;
            self.buffer.advance(len);

            let mut value = match step {
                Step::Value(value) => value,
                Step::Array(0) => Value::Array(vec![]),
                Step::Array(n) => {
                    self.pending.push(PendingArray {
                        remaining: n,
                        items: Vec::with_capacity(n.min(MAX_PREALLOCATED)),
                    });
                    continue;
                }
            };

            // Fold the completed value into its enclosing arrays, closing every array that
            // becomes full along the way.
            while let Some(mut top) = self.pending.pop() {
                top.items.push(value);
                top.remaining -= 1;

                if top.remaining > 0 {
                    self.pending.push(top);
                    continue 'frames;
                }

                value = Value::Array(top.items);
            }

            return Ok(Some(value));
        }
    }
}

impl Default for Decoder {
    fn default() -> Decoder {
        Decoder::new()
    }
}

/// Parses the next frame header. Scalars are returned whole, arrays return their length so the
/// caller can collect the elements.
fn parse_step(src: &mut Cursor<&[u8]>) -> Result<Step, Error> {
    match eat_u8(src)? {
        // "+OK\r\n"
        b'+' => {
            let line = eat_line(src)?.to_vec();
            Ok(Step::Value(Value::Simple(String::from_utf8(line)?)))
        }
        // "-Error message\r\n"
        b'-' => {
            let line = eat_line(src)?.to_vec();
            Ok(Step::Value(Value::Error(String::from_utf8(line)?)))
        }
        // ":1000\r\n"
        b':' => Ok(Step::Value(Value::Integer(eat_decimal(src)?))),
        // "$-1\r\n" (Null)
        // "$6\r\nfoobar\r\n"
        b'$' => match eat_length(src)? {
            None => Ok(Step::Value(Value::Null)),
            Some(len) => {
                // payload plus the trailing \r\n
                if src.remaining() < len.saturating_add(2) {
                    return Err(Error::Incomplete);
                }

                let data = Bytes::copy_from_slice(&src.chunk()[..len]);
                src.advance(len);

                if src.get_u8() != b'\r' || src.get_u8() != b'\n' {
                    return Err("protocol error: bulk string not terminated by CRLF".into());
                }

                Ok(Step::Value(Value::Bulk(data)))
            }
        },
        // "*-1\r\n" (NullArray)
        // "*2\r\n:1\r\n:2\r\n"
        b'*' => match eat_length(src)? {
            None => Ok(Step::Value(Value::NullArray)),
            Some(len) => Ok(Step::Array(len)),
        },
        other => Err(format!("protocol error: invalid frame type byte `{}`", other).into()),
    }
}

fn eat_u8(src: &mut Cursor<&[u8]>) -> Result<u8, Error> {
    if !src.has_remaining() {
        return Err(Error::Incomplete);
    }

    Ok(src.get_u8())
}

fn eat_line<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], Error> {
    let start = src.position() as usize;
    let bytes: &'a [u8] = *src.get_ref();

    if bytes.len() < 2 {
        return Err(Error::Incomplete);
    }

    for i in start..bytes.len() - 1 {
        if bytes[i] == b'\r' && bytes[i + 1] == b'\n' {
            // found a line, move the position **after** the \n
            src.set_position((i + 2) as u64);

            return Ok(&bytes[start..i]);
        }
    }

    Err(Error::Incomplete)
}

/// Reads a signed decimal line. The whole line must be the number.
fn eat_decimal(src: &mut Cursor<&[u8]>) -> Result<i64, Error> {
    let line = eat_line(src)?;

    // optional `-`, then digits only
    let digits = line.strip_prefix(b"-").unwrap_or(line);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(ERROR_INVALID_FRAME.into());
    }

    match i64::from_radix_10_signed_checked(line) {
        (Some(n), used) if used == line.len() => Ok(n),
        _ => Err(ERROR_INVALID_FRAME.into()),
    }
}

/// Reads a bulk or array length line. `-1` is `None`, other negative lengths are invalid.
fn eat_length(src: &mut Cursor<&[u8]>) -> Result<Option<usize>, Error> {
    match eat_decimal(src)? {
        -1 => Ok(None),
        n if n < 0 => Err(format!("protocol error: invalid length `{}`", n).into()),
        n => Ok(Some(n as usize)),
    }
}

impl From<String> for Error {
    fn from(src: String) -> Error {
        Error::Malformed(src)
    }
}

impl From<&str> for Error {
    fn from(src: &str) -> Error {
        src.to_string().into()
    }
}

impl From<FromUtf8Error> for Error {
    fn from(_src: FromUtf8Error) -> Error {
        ERROR_INVALID_FRAME.into()
    }
}
