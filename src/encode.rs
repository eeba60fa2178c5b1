//! Serializes values and command invocations into RESP bytes.

use crate::Value;

use bytes::{BufMut, Bytes, BytesMut};

/// Encode a command invocation as a request.
///
/// Requests are always an array of bulk strings, the command name first. Arguments are never
/// sent as simple strings because they may hold arbitrary bytes, CR and LF included.
pub fn encode<I, A>(name: &str, args: I) -> Bytes
where
    I: IntoIterator<Item = A>,
    A: Into<Bytes>,
{
    let mut frame = Value::array();
    frame.push_bulk(Bytes::copy_from_slice(name.as_bytes()));

    for arg in args {
        frame.push_bulk(arg.into());
    }

    let mut dst = BytesMut::new();
    write_value(&mut dst, &frame);
    dst.freeze()
}

/// Append the wire form of `value` to `dst`.
pub fn write_value(dst: &mut BytesMut, value: &Value) {
    match value {
        Value::Simple(val) => {
            dst.put_u8(b'+');
            dst.put_slice(val.as_bytes());
            dst.put_slice(b"\r\n");
        }
        Value::Error(val) => {
            dst.put_u8(b'-');
            dst.put_slice(val.as_bytes());
            dst.put_slice(b"\r\n");
        }
        Value::Integer(val) => {
            dst.put_u8(b':');
            write_decimal(dst, *val);
        }
        Value::Bulk(val) => {
            dst.put_u8(b'$');
            write_decimal(dst, val.len() as i64);
            dst.put_slice(val);
            dst.put_slice(b"\r\n");
        }
        Value::Null => dst.put_slice(b"$-1\r\n"),
        Value::NullArray => dst.put_slice(b"*-1\r\n"),
        Value::Array(items) => {
            dst.put_u8(b'*');
            write_decimal(dst, items.len() as i64);

            for item in items {
                write_value(dst, item);
            }
        }
    }
}

/// Write a decimal followed by CRLF.
fn write_decimal(dst: &mut BytesMut, val: i64) {
    dst.put_slice(val.to_string().as_bytes());
    dst.put_slice(b"\r\n");
}
