//! Three-pass streaming serializer: TSV edge list -> compact binary.

use std::io::Write;

use crate::emit::BinaryWriter;
use crate::format;
use crate::header;
use crate::tsv::Scanner;
use crate::{check_host_endianness, Error};

/// Compacts and encodes the edge multiset in `input` (tab-separated
/// `u\tv\tw\n` lines) to `output` as a version-2 binary.
///
/// Bounds peak memory at `O(N + E)`: Pass 1 collects endpoints, Pass 2 counts
/// degrees and loops, Pass 3 fills the CSR and emits.
pub fn serialize<W: Write>(input: &[u8], output: W) -> Result<(), Error> {
    check_host_endianness()?;

    let mut orig = collect_identifiers(input)?;
    orig.sort_unstable();
    orig.dedup();
    let n = orig.len();

    let mut deg = vec![0u64; n];
    let mut loop_count = 0u64;
    let mut line_cnt = 0u64;

    for edge in Scanner::new(input) {
        let (a, b, _) = edge?;
        line_cnt += 1;
        let ia = lookup(&orig, a)?;
        let ib = lookup(&orig, b)?;
        if ia == ib {
            loop_count += 1;
        } else {
            deg[ia.min(ib)] += 1;
        }
    }

    let mut off = vec![0u64; n + 1];
    for i in 0..n {
        off[i + 1] = off[i] + deg[i];
    }

    let mut adj: Vec<format::AdjEntry> = vec![(0, 0); off[n] as usize];
    let mut cursor: Vec<u64> = off[..n].to_vec();
    let mut loops: Vec<(u32, u8)> = Vec::with_capacity(loop_count as usize);

    for edge in Scanner::new(input) {
        let (a, b, w) = edge?;
        let ia = lookup(&orig, a)?;
        let ib = lookup(&orig, b)?;
        if ia == ib {
            loops.push((ia as u32, w));
        } else {
            let (u, v) = (ia.min(ib), ia.max(ib));
            let slot = cursor[u] as usize;
            adj[slot] = (v as u32, w);
            cursor[u] += 1;
        }
    }

    let mut rows: Vec<Vec<format::AdjEntry>> = Vec::with_capacity(n);
    for i in 0..n {
        let start = off[i] as usize;
        let end = off[i + 1] as usize;
        let mut row = adj[start..end].to_vec();
        row.sort_unstable_by_key(|&(j, _)| j);
        rows.push(row);
    }
    loops.sort_unstable_by_key(|&(v, _)| v);

    let mut out = BinaryWriter::new(output);
    write_binary(&mut out, &orig, line_cnt, &rows, &loops)?;
    out.flush()
}

fn write_binary<W: Write>(
    out: &mut BinaryWriter<W>,
    orig: &[u32],
    m_total: u64,
    rows: &[Vec<format::AdjEntry>],
    loops: &[(u32, u8)],
) -> Result<(), Error> {
    // header::write_v2 wants a plain `Write`, not our buffered wrapper; build
    // it into a scratch buffer and copy through.
    let mut header_bytes = Vec::new();
    header::write_v2(&mut header_bytes, orig, m_total)?;
    out.write_bytes(&header_bytes)?;

    format::write_adjacency(out, rows)?;
    format::write_loops(out, loops)?;
    Ok(())
}

fn collect_identifiers(input: &[u8]) -> Result<Vec<u32>, Error> {
    let mut ids = Vec::new();
    for edge in Scanner::new(input) {
        let (a, b, _) = edge?;
        ids.push(a);
        ids.push(b);
    }
    Ok(ids)
}

fn lookup(orig: &[u32], x: u32) -> Result<usize, Error> {
    orig.binary_search(&x)
        .map_err(|_| Error::Internal("compacted identifier missing from mapping"))
}
