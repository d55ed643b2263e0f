//! graphcodec - compact binary codec for sparse-vertex undirected weighted graphs
//!
//! An input is a multiset of edges `(u, v, w)` with `u32` endpoints and a `u8`
//! weight, given as tab-separated text. [`serialize`] compacts the vertex
//! identifiers that actually appear, builds a CSR-like upper-triangular
//! adjacency, and writes a little-endian binary. [`deserialize`] reverses the
//! process. The two operations round-trip the edge multiset, not the input
//! byte-for-byte: line order and endpoint order within a line are not
//! preserved.

mod emit;
mod error;
mod format;
mod header;
mod tsv;
mod varint;

pub mod deserialize;
pub mod serialize;

pub use error::Error;

pub use deserialize::{deserialize, deserialize_opts};
pub use serialize::serialize;

/// Magic bytes at the start of every binary produced by this crate.
pub(crate) const MAGIC: [u8; 4] = *b"GRPH";

/// Writers always emit this version; readers accept this and [`HEADER_V1`].
pub(crate) const HEADER_V2: u8 = 2;
/// Oldest version this crate can still read back.
pub(crate) const HEADER_V1: u8 = 1;
/// The only endian marker the format defines.
pub(crate) const ENDIAN_LE: u8 = 1;

/// Refuses to run on a host that isn't little-endian, matching the reference
/// encoder/decoder this format was distilled from: the wire format declares
/// itself little-endian-only rather than byte-swapping on the fly.
pub(crate) fn check_host_endianness() -> Result<(), Error> {
    if cfg!(target_endian = "big") {
        Err(Error::HostEndianness)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_endianness_check_passes_on_little_endian_hosts() {
        // This crate only targets little-endian hosts in CI; the branch for
        // big-endian is exercised by construction, not by flipping cfg here.
        assert!(check_host_endianness().is_ok());
    }
}
