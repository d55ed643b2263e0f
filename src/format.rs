//! Section B (adjacency) and Section C (loops) codecs.
//!
//! Both sections are byte-identical across header versions 1 and 2; only the
//! header and mapping preceding them differ (see [`crate::header`]).

use crate::emit::{BinaryWriter, TextWriter};
use crate::varint;
use crate::Error;
use std::io::{Read, Write};

/// One compacted upper-triangular entry: neighbor index and edge weight.
pub type AdjEntry = (u32, u8);

/// Writes Section B: for each vertex `i`, its degree followed by
/// `(gap, weight)` pairs with running base `prev = i`.
pub fn write_adjacency<W: Write>(
    w: &mut BinaryWriter<W>,
    adj: &[Vec<AdjEntry>],
) -> Result<(), Error> {
    for (i, entries) in adj.iter().enumerate() {
        w.write_varint(entries.len() as u64)?;
        let mut prev = i as u32;
        for &(j, weight) in entries {
            let gap = (j - prev) as u64;
            w.write_varint(gap)?;
            w.write_u8(weight)?;
            prev = j;
        }
    }
    Ok(())
}

/// Writes Section C: loop count followed by `(delta, weight)` pairs with
/// running base `acc = 0`.
pub fn write_loops<W: Write>(w: &mut BinaryWriter<W>, loops: &[(u32, u8)]) -> Result<(), Error> {
    w.write_varint(loops.len() as u64)?;
    let mut acc = 0u32;
    for &(v, weight) in loops {
        let delta = (v - acc) as u64;
        w.write_varint(delta)?;
        w.write_u8(weight)?;
        acc = v;
    }
    Ok(())
}

/// Reads Section B for vertex `i` and emits one TSV line per entry via
/// `emit`. `n` bounds valid neighbor indices. Returns the number of entries
/// decoded, for strict-mode `M_total` cross-checking.
pub fn read_adjacency_row<R: Read>(
    r: &mut R,
    i: u32,
    n: u64,
    orig: &[u32],
    text: &mut TextWriter<impl Write>,
) -> Result<u64, Error> {
    let deg = varint::decode(r)?;
    let mut prev = i;

    for _ in 0..deg {
        let gap = varint::decode(r)?;
        let gap: u32 = gap
            .try_into()
            .map_err(|_| Error::CorruptAdjacency("gap overflows u32".into()))?;
        let j = prev
            .checked_add(gap)
            .ok_or_else(|| Error::CorruptAdjacency("prev + gap overflows u32".into()))?;
        if u64::from(j) >= n {
            return Err(Error::CorruptAdjacency(format!(
                "neighbor index {j} out of range for N={n}"
            )));
        }

        let mut weight = [0u8; 1];
        read_exact_mapped(r, &mut weight)?;

        text.write_edge(orig[i as usize], orig[j as usize], weight[0])?;
        prev = j;
    }

    Ok(deg)
}

/// Reads Section C in full and emits one TSV line per loop via `emit`.
/// Returns the number of loops decoded, for strict-mode `M_total`
/// cross-checking.
pub fn read_loops<R: Read>(
    r: &mut R,
    n: u64,
    orig: &[u32],
    text: &mut TextWriter<impl Write>,
) -> Result<u64, Error> {
    let count = varint::decode(r)?;
    let mut acc = 0u32;

    for _ in 0..count {
        let delta = varint::decode(r)?;
        let delta: u32 = delta
            .try_into()
            .map_err(|_| Error::CorruptLoops("delta overflows u32".into()))?;
        let v = acc
            .checked_add(delta)
            .ok_or_else(|| Error::CorruptLoops("acc + delta overflows u32".into()))?;
        if u64::from(v) >= n {
            return Err(Error::CorruptLoops(format!(
                "loop vertex {v} out of range for N={n}"
            )));
        }

        let mut weight = [0u8; 1];
        read_exact_mapped(r, &mut weight)?;

        text.write_edge(orig[v as usize], orig[v as usize], weight[0])?;
        acc = v;
    }

    Ok(count)
}

fn read_exact_mapped<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    match r.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::UnexpectedEof),
        Err(e) => Err(Error::Io(e)),
    }
}
