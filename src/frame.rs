// https://redis.io/docs/reference/protocol-spec

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

static CRLF: &[u8; 2] = b"\r\n";

/// A reply produced by the engine. Replies serialize to RESP2, the protocol version whose
/// replies the engine reproduces byte for byte.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Bytes),
    /// The null bulk string, `$-1`.
    Null,
    /// The null multi-bulk, `*-1`. Returned by a blocking pop that timed out and by an `EXEC`
    /// aborted by a watched key.
    NullArray,
    Array(Vec<Frame>),
    /// Commands such as `SUBSCRIBE` push their replies to the client inbox instead.
    NoReply,
}

impl Frame {
    pub fn ok() -> Frame {
        Frame::Simple("OK".to_string())
    }

    pub fn bulk(bytes: impl Into<Bytes>) -> Frame {
        Frame::Bulk(bytes.into())
    }

    /// `Frame::Bulk` when there is a value, `Frame::Null` otherwise.
    pub fn bulk_or_null(bytes: Option<Bytes>) -> Frame {
        bytes.map(Frame::Bulk).unwrap_or(Frame::Null)
    }

    pub fn array_of_bulks<I, T>(items: I) -> Frame
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        Frame::Array(items.into_iter().map(|i| Frame::Bulk(i.into())).collect())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Frame::Error(_))
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = BytesMut::new();
        self.write_to(&mut buf);
        buf.to_vec()
    }

    fn write_to(&self, buf: &mut BytesMut) {
        match self {
            Frame::Simple(s) => {
                buf.put_u8(b'+');
                buf.put_slice(s.as_bytes());
                buf.put_slice(CRLF);
            }
            Frame::Error(s) => {
                buf.put_u8(b'-');
                buf.put_slice(s.as_bytes());
                buf.put_slice(CRLF);
            }
            Frame::Integer(i) => {
                buf.put_u8(b':');
                buf.put_slice(i.to_string().as_bytes());
                buf.put_slice(CRLF);
            }
            Frame::Bulk(bytes) => {
                buf.put_u8(b'$');
                buf.put_slice(bytes.len().to_string().as_bytes());
                buf.put_slice(CRLF);
                buf.put_slice(bytes);
                buf.put_slice(CRLF);
            }
            Frame::Null => buf.put_slice(b"$-1\r\n"),
            Frame::NullArray => buf.put_slice(b"*-1\r\n"),
            Frame::Array(frames) => {
                buf.put_u8(b'*');
                buf.put_slice(frames.len().to_string().as_bytes());
                buf.put_slice(CRLF);
                for frame in frames {
                    frame.write_to(buf);
                }
            }
            Frame::NoReply => {}
        }
    }
}

impl From<Frame> for Vec<u8> {
    fn from(frame: Frame) -> Self {
        frame.serialize()
    }
}

/// Renders replies the way `redis-cli` prints them, which is what the replay binary shows.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl Frame {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Frame::Simple(s) => write!(f, "{}", s),
            Frame::Error(s) => write!(f, "(error) {}", s),
            Frame::Integer(i) => write!(f, "(integer) {}", i),
            Frame::Bulk(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
            Frame::Null | Frame::NullArray => write!(f, "(nil)"),
            Frame::NoReply => Ok(()),
            Frame::Array(frames) if frames.is_empty() => write!(f, "(empty array)"),
            Frame::Array(frames) => {
                let width = frames.len().to_string().len();
                for (i, frame) in frames.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                        write!(f, "{:indent$}", "", indent = indent)?;
                    }
                    write!(f, "{:>width$}) ", i + 1, width = width)?;
                    frame.fmt_indented(f, indent + width + 2)?;
                }
                Ok(())
            }
        }
    }
}
