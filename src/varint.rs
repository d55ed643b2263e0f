//! Unsigned LEB128 varint encoding.
//!
//! Groups of 7 low bits, LSB group first, continuation bit (0x80) set on
//! every byte but the last. Values up to `u64::MAX` are supported; more than
//! 10 bytes (70 encoded bits for a 64-bit value) is malformed.

use std::io::{self, Read, Write};

use cynosure::hints::{likely, unlikely};

use crate::Error;

const MAX_BYTES: u32 = 10;

/// Writes `value` to `w` as an unsigned LEB128 varint, returning the number
/// of bytes written.
pub fn encode<W: Write>(w: &mut W, mut value: u64) -> Result<usize, Error> {
    let mut buf = [0u8; MAX_BYTES as usize];
    let mut len = 0;
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if likely(value != 0) {
            byte |= 0x80;
        }
        buf[len] = byte;
        len += 1;
        if value == 0 {
            break;
        }
    }
    w.write_all(&buf[..len])?;
    Ok(len)
}

/// The number of bytes [`encode`] would write for `value`, without writing.
pub fn encoded_len(value: u64) -> usize {
    let mut value = value;
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Reads one unsigned LEB128 varint from `r`.
///
/// Fails with [`Error::UnexpectedEof`] if the stream ends mid-varint, or
/// [`Error::MalformedVarint`] if more than 10 groups are seen (the value
/// cannot fit in 64 bits, or the final group carries bits beyond bit 63).
pub fn decode<R: Read>(r: &mut R) -> Result<u64, Error> {
    let mut result: u64 = 0;
    let mut one = [0u8; 1];

    for i in 0..MAX_BYTES {
        if let Err(e) = r.read_exact(&mut one) {
            return Err(map_read_error(e));
        }
        let byte = one[0];
        let low7 = (byte & 0x7f) as u64;

        // The 10th group (i == 9) only has room for bit 63; anything wider
        // means the encoded value can't fit in a u64.
        if unlikely(i == MAX_BYTES - 1 && low7 > 1) {
            return Err(Error::MalformedVarint);
        }

        result |= low7 << (7 * i);

        if likely(byte & 0x80 == 0) {
            return Ok(result);
        }
    }

    Err(Error::MalformedVarint)
}

fn map_read_error(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::UnexpectedEof
    } else {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn round_trip(value: u64) {
        let mut buf = Vec::new();
        let written = encode(&mut buf, value).unwrap();
        assert_eq!(written, encoded_len(value));
        assert_eq!(written, buf.len());

        let mut cursor = Cursor::new(buf);
        let decoded = decode(&mut cursor).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn round_trips_boundary_values() {
        for &v in &[
            0u64,
            1,
            127,
            128,
            16383,
            16384,
            (1u64 << 32) - 1,
            1u64 << 63,
            u64::MAX,
        ] {
            round_trip(v);
        }
    }

    #[test]
    fn encoded_len_matches_group_count() {
        assert_eq!(encoded_len(0), 1);
        assert_eq!(encoded_len(127), 1);
        assert_eq!(encoded_len(128), 2);
        assert_eq!(encoded_len(16383), 2);
        assert_eq!(encoded_len(16384), 3);
        assert_eq!(encoded_len(u64::MAX), 10);
    }

    #[test]
    fn decode_fails_on_truncated_stream() {
        // continuation bit set, but nothing follows
        let mut cursor = Cursor::new(vec![0x80]);
        assert!(matches!(decode(&mut cursor), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn decode_fails_on_overlong_varint() {
        // 10 bytes, all with continuation bit set plus a final byte that
        // still keeps it set -- never terminates within 10 groups.
        let bytes = [0xffu8; 10];
        let mut cursor = Cursor::new(bytes.to_vec());
        assert!(matches!(decode(&mut cursor), Err(Error::MalformedVarint)));
    }

    #[test]
    fn decode_fails_when_tenth_group_overflows_64_bits() {
        // 9 full continuation groups of all-1 low bits, then a 10th group
        // with bit 1 set (value 2), which doesn't fit below bit 64.
        let mut bytes = vec![0xffu8; 9];
        bytes.push(0x02);
        let mut cursor = Cursor::new(bytes);
        assert!(matches!(decode(&mut cursor), Err(Error::MalformedVarint)));
    }

    #[test]
    fn empty_stream_is_unexpected_eof() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(matches!(decode(&mut cursor), Err(Error::UnexpectedEof)));
    }
}
