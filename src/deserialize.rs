//! Single forward-pass deserializer: compact binary -> TSV edge list.

use std::io::{Cursor, Write};

use crate::emit::TextWriter;
use crate::format;
use crate::header;
use crate::{check_host_endianness, Error};

/// Decodes `input` (a version-1 or version-2 binary) to tab-separated
/// `u\tv\tw\n` lines written to `output`.
///
/// Trailing bytes after Section C and a mismatched `M_total` are both
/// tolerated, matching the reference decoder. Use [`deserialize_opts`] to
/// reject either.
pub fn deserialize<W: Write>(input: &[u8], output: W) -> Result<(), Error> {
    deserialize_opts(input, output, false)
}

/// Like [`deserialize`], but when `strict` is `true` also rejects trailing
/// bytes after Section C and a decoded edge count that disagrees with the
/// header's `M_total`.
pub fn deserialize_opts<W: Write>(input: &[u8], output: W, strict: bool) -> Result<(), Error> {
    check_host_endianness()?;

    let mut cursor = Cursor::new(input);
    let decoded = header::read(&mut cursor)?;
    let n = decoded.n;
    let orig = decoded.orig;

    let mut text = TextWriter::new(output);
    let mut decoded_edges: u64 = 0;

    for i in 0..n {
        decoded_edges += format::read_adjacency_row(&mut cursor, i as u32, n, &orig, &mut text)?;
    }
    decoded_edges += format::read_loops(&mut cursor, n, &orig, &mut text)?;

    text.flush()?;

    if strict {
        if decoded_edges != decoded.m_total {
            return Err(Error::BadHeader(format!(
                "M_total={} does not match decoded edge count {decoded_edges}",
                decoded.m_total
            )));
        }
        let pos = cursor.position() as usize;
        if pos != input.len() {
            return Err(Error::BadHeader("trailing bytes after loop section".into()));
        }
    }

    Ok(())
}
