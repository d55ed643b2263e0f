//! Scanner for the `u\tv\tw\n` edge-list text format.
//!
//! Built fresh over a `&[u8]` slice rather than an owned reader so the
//! serializer can re-run it for each of its three passes without cloning or
//! seeking.

use crate::Error;

const MAX_U32: u64 = u32::MAX as u64;
const MAX_U8: u64 = u8::MAX as u64;

/// A re-runnable scanner over a byte range holding `u\tv\tw\n` edge lines.
pub struct Scanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Scanner { buf, pos: 0 }
    }

    fn skip_blank_lines(&mut self) {
        while self.pos < self.buf.len() {
            match self.buf[self.pos] {
                b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Parses a run of ASCII digits as a `u64`, failing if the value exceeds
    /// `max` or if no digit is present.
    fn parse_field(&mut self, max: u64, field: &'static str) -> Result<u64, Error> {
        let start = self.pos;
        let mut value: u64 = 0;
        let mut saw_digit = false;

        while self.pos < self.buf.len() && self.buf[self.pos].is_ascii_digit() {
            let digit = (self.buf[self.pos] - b'0') as u64;
            value = value.saturating_mul(10).saturating_add(digit);
            saw_digit = true;
            self.pos += 1;
            if value > max {
                return Err(Error::Overflow {
                    field,
                    value,
                    max,
                });
            }
        }

        if !saw_digit {
            return Err(Error::parse(start, format!("expected digits for {field}")));
        }

        Ok(value)
    }

    fn expect_byte(&mut self, byte: u8, what: &'static str) -> Result<(), Error> {
        if self.pos < self.buf.len() && self.buf[self.pos] == byte {
            self.pos += 1;
            Ok(())
        } else {
            Err(Error::parse(self.pos, format!("expected {what}")))
        }
    }

    /// Consumes the line terminator: an optional `\r` followed by `\n`, or
    /// end of input (the last line need not be newline-terminated).
    fn expect_terminator(&mut self) -> Result<(), Error> {
        if self.pos >= self.buf.len() {
            return Ok(());
        }
        if self.buf[self.pos] == b'\r' {
            self.pos += 1;
        }
        if self.pos >= self.buf.len() {
            // trailing bare `\r` with no following data and no `\n`
            return Err(Error::parse(self.pos, "unterminated line"));
        }
        self.expect_byte(b'\n', "newline")
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<(u32, u32, u8), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_blank_lines();
        if self.pos >= self.buf.len() {
            return None;
        }

        let result = (|| {
            let a = self.parse_field(MAX_U32, "u")?;
            self.expect_byte(b'\t', "tab after u")?;
            let b = self.parse_field(MAX_U32, "v")?;
            self.expect_byte(b'\t', "tab after v")?;
            let w = self.parse_field(MAX_U8, "w")?;
            self.expect_terminator()?;
            Ok((a as u32, b as u32, w as u8))
        })();

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Result<Vec<(u32, u32, u8)>, Error> {
        Scanner::new(input.as_bytes()).collect()
    }

    #[test]
    fn parses_simple_lines() {
        let edges = collect("10\t20\t5\n7\t7\t255\n").unwrap();
        assert_eq!(edges, vec![(10, 20, 5), (7, 7, 255)]);
    }

    #[test]
    fn tolerates_missing_trailing_newline() {
        let edges = collect("1\t2\t3").unwrap();
        assert_eq!(edges, vec![(1, 2, 3)]);
    }

    #[test]
    fn tolerates_crlf_terminators() {
        let edges = collect("1\t2\t3\r\n4\t5\t6\r\n").unwrap();
        assert_eq!(edges, vec![(1, 2, 3), (4, 5, 6)]);
    }

    #[test]
    fn skips_leading_and_interior_blank_lines() {
        let edges = collect("\n\n1\t2\t3\n\n\n4\t5\t6\n").unwrap();
        assert_eq!(edges, vec![(1, 2, 3), (4, 5, 6)]);
    }

    #[test]
    fn empty_input_yields_no_edges() {
        assert_eq!(collect("").unwrap(), vec![]);
    }

    #[test]
    fn rejects_u_overflow() {
        let err = collect("4294967296\t1\t1\n").unwrap_err();
        assert!(matches!(err, Error::Overflow { field: "u", .. }));
    }

    #[test]
    fn rejects_w_overflow() {
        let err = collect("1\t2\t256\n").unwrap_err();
        assert!(matches!(err, Error::Overflow { field: "w", .. }));
    }

    #[test]
    fn rejects_non_digit_bytes() {
        assert!(collect("1\tx\t3\n").is_err());
        assert!(collect("1 2\t3\n").is_err());
    }

    #[test]
    fn rejects_mid_line_eof() {
        assert!(collect("1\t2\t").is_err());
        assert!(collect("1\t2").is_err());
    }

    #[test]
    fn is_rerunnable() {
        let raw = "1\t2\t3\n4\t5\t6\n";
        let first: Vec<_> = Scanner::new(raw.as_bytes()).collect::<Result<_, _>>().unwrap();
        let second: Vec<_> = Scanner::new(raw.as_bytes()).collect::<Result<_, _>>().unwrap();
        assert_eq!(first, second);
    }
}
