use std::io;

/// Every failure mode this crate can produce.
///
/// One variant per entry in the format's error taxonomy; `Display` renders a
/// single line suitable for a CLI to print after `Error: `.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed input at byte {offset}: {detail}")]
    Parse { offset: usize, detail: String },

    #[error("{field} value {value} exceeds its maximum of {max}")]
    Overflow {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("bad header: {0}")]
    BadHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("malformed varint (exceeds 64-bit range)")]
    MalformedVarint,

    #[error("corrupt adjacency section: {0}")]
    CorruptAdjacency(String),

    #[error("corrupt loops section: {0}")]
    CorruptLoops(String),

    #[error("this host is not little-endian; the format is little-endian only")]
    HostEndianness,

    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}

impl Error {
    pub(crate) fn parse(offset: usize, detail: impl Into<String>) -> Self {
        Error::Parse {
            offset,
            detail: detail.into(),
        }
    }
}
