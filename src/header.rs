//! Header and vertex-mapping read/write, shared by both format versions.
//!
//! The header tells a reader how `N` (vertex count) and `M_total` (edge-line
//! count) are encoded, and how the `orig[0..N)` mapping that follows is
//! encoded. Section B (adjacency) and Section C (loops) that follow the
//! mapping are identical varint-coded layouts in both versions; see
//! [`crate::format`].

use std::io::{Read, Write};

use crate::varint;
use crate::{Error, ENDIAN_LE, HEADER_V1, HEADER_V2, MAGIC};

/// The decoded header plus the reconstructed `orig` mapping: everything a
/// deserializer needs before it can start Section B.
pub struct Decoded {
    pub version: u8,
    pub n: u64,
    pub m_total: u64,
    pub orig: Vec<u32>,
}

/// Writes the 6-byte magic/version/endian prefix common to both versions.
fn write_prefix<W: Write>(w: &mut W, version: u8) -> Result<(), Error> {
    w.write_all(&MAGIC)?;
    w.write_all(&[version, ENDIAN_LE])?;
    Ok(())
}

/// Writes a complete version-2 header and `orig` mapping. Writers in this
/// crate always emit version 2.
pub fn write_v2<W: Write>(w: &mut W, orig: &[u32], m_total: u64) -> Result<(), Error> {
    write_prefix(w, HEADER_V2)?;
    varint::encode(w, orig.len() as u64)?;
    varint::encode(w, m_total)?;

    if let Some((&first, rest)) = orig.split_first() {
        w.write_all(&first.to_le_bytes())?;
        let mut prev = first;
        for &id in rest {
            let delta = (id - prev) as u64;
            varint::encode(w, delta)?;
            prev = id;
        }
    }

    Ok(())
}

/// Reads the header (either version) and the `orig` mapping that follows it.
pub fn read<R: Read>(r: &mut R) -> Result<Decoded, Error> {
    let mut magic = [0u8; 4];
    read_exact_header(r, &mut magic)?;
    if magic != MAGIC {
        return Err(Error::BadHeader("bad magic".into()));
    }

    let mut tail = [0u8; 2];
    read_exact_header(r, &mut tail)?;
    let version = tail[0];
    let endian = tail[1];

    if endian != ENDIAN_LE {
        return Err(Error::BadHeader("unsupported endian marker".into()));
    }
    if version != HEADER_V1 && version != HEADER_V2 {
        return Err(Error::BadHeader(format!("unsupported version {version}")));
    }

    let (n, m_total) = if version == HEADER_V1 {
        let mut n_bytes = [0u8; 4];
        read_exact_header(r, &mut n_bytes)?;
        let mut m_bytes = [0u8; 8];
        read_exact_header(r, &mut m_bytes)?;
        (
            u32::from_le_bytes(n_bytes) as u64,
            u64::from_le_bytes(m_bytes),
        )
    } else {
        (varint::decode(r)?, varint::decode(r)?)
    };

    let orig = read_mapping(r, version, n)?;

    Ok(Decoded {
        version,
        n,
        m_total,
        orig,
    })
}

fn read_mapping<R: Read>(r: &mut R, version: u8, n: u64) -> Result<Vec<u32>, Error> {
    let n = n as usize;
    let mut orig = Vec::with_capacity(n);

    if version == HEADER_V1 {
        for _ in 0..n {
            let mut bytes = [0u8; 4];
            read_exact_header(r, &mut bytes)?;
            orig.push(u32::from_le_bytes(bytes));
        }
    } else if n > 0 {
        let mut bytes = [0u8; 4];
        read_exact_header(r, &mut bytes)?;
        let first = u32::from_le_bytes(bytes);
        orig.push(first);

        let mut prev = first;
        for _ in 1..n {
            let delta = varint::decode(r)?;
            let next = prev
                .checked_add(delta.try_into().map_err(|_| {
                    Error::BadHeader("mapping delta overflows u32".into())
                })?)
                .ok_or_else(|| Error::BadHeader("mapping delta overflows u32".into()))?;
            orig.push(next);
            prev = next;
        }
    }

    for pair in orig.windows(2) {
        if pair[0] >= pair[1] {
            return Err(Error::BadHeader(
                "vertex mapping is not strictly ascending".into(),
            ));
        }
    }

    Ok(orig)
}

fn read_exact_header<R: Read>(r: &mut R, buf: &mut [u8]) -> Result<(), Error> {
    match r.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::UnexpectedEof),
        Err(e) => Err(Error::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn v2_header_round_trips_mapping() {
        let orig = vec![10u32, 20, 4294967295];
        let mut buf = Vec::new();
        write_v2(&mut buf, &orig, 3).unwrap();

        let mut cursor = Cursor::new(buf);
        let decoded = read(&mut cursor).unwrap();
        assert_eq!(decoded.version, HEADER_V2);
        assert_eq!(decoded.n, 3);
        assert_eq!(decoded.m_total, 3);
        assert_eq!(decoded.orig, orig);
    }

    #[test]
    fn empty_mapping_round_trips() {
        let mut buf = Vec::new();
        write_v2(&mut buf, &[], 0).unwrap();

        let mut cursor = Cursor::new(buf);
        let decoded = read(&mut cursor).unwrap();
        assert_eq!(decoded.n, 0);
        assert!(decoded.orig.is_empty());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut cursor = Cursor::new(vec![0u8; 16]);
        assert!(matches!(read(&mut cursor), Err(Error::BadHeader(_))));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = MAGIC.to_vec();
        bytes.push(99);
        bytes.push(ENDIAN_LE);
        let mut cursor = Cursor::new(bytes);
        assert!(matches!(read(&mut cursor), Err(Error::BadHeader(_))));
    }

    #[test]
    fn v1_header_reads_fixed_width_mapping() {
        let mut buf = MAGIC.to_vec();
        buf.push(HEADER_V1);
        buf.push(ENDIAN_LE);
        buf.extend_from_slice(&2u32.to_le_bytes()); // N
        buf.extend_from_slice(&5u64.to_le_bytes()); // M_total
        buf.extend_from_slice(&10u32.to_le_bytes());
        buf.extend_from_slice(&20u32.to_le_bytes());

        let mut cursor = Cursor::new(buf);
        let decoded = read(&mut cursor).unwrap();
        assert_eq!(decoded.version, HEADER_V1);
        assert_eq!(decoded.orig, vec![10, 20]);
        assert_eq!(decoded.m_total, 5);
    }
}
