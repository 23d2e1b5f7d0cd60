//! Newline index with LF/CRLF-robust line/byte mapping.
//!
//! - 1-based external line numbers
//! - End byte excludes trailing '\r' for CRLF lines
//! - An empty buffer has 0 lines; a non-empty buffer without '\n' has 1

use std::cmp;

#[derive(Debug, Clone)]
pub struct NewlineIndex
{
    /// Byte positions of every '\n' in the buffer
    nl_positions: Vec<usize>,

    /// Total byte length of the buffer
    len: usize,
}

impl NewlineIndex
{
    pub fn build(bytes: &[u8]) -> Self
    {
        let nl_positions = memchr::memchr_iter(b'\n', bytes).collect();

        Self { nl_positions, len: bytes.len() }
    }

    pub fn line_count(&self) -> usize
    {
        if self.len == 0
        {
            0
        }
        else
        {
            self.nl_positions
                .len()
                + 1
        }
    }

    /// Start byte (inclusive) of a 1-based line
    fn start_byte_of_line(
        &self,
        line1: usize,
    ) -> Option<usize>
    {
        if line1 == 0 || line1 > self.line_count()
        {
            return None;
        }

        if line1 == 1
        {
            return Some(0);
        }

        self.nl_positions
            .get(line1 - 2)
            .map(|&prev_nl| prev_nl + 1)
    }

    /// End byte (exclusive) of a 1-based line, without a trailing '\r'
    fn end_byte_of_line(
        &self,
        line1: usize,
        bytes: &[u8],
    ) -> Option<usize>
    {
        if line1 == 0 || line1 > self.line_count()
        {
            return None;
        }

        if let Some(&nl) = self
            .nl_positions
            .get(line1 - 1)
        {
            if nl > 0 && bytes.get(nl - 1) == Some(&b'\r')
            {
                return Some(nl - 1);
            }
            return Some(nl);
        }

        // Last line without trailing '\n'
        Some(self.len)
    }

    /// Byte range for an inclusive 1-based line span; the end line is
    /// clamped to the last line
    pub fn byte_range_for_lines(
        &self,
        start_line1: usize,
        end_line1: usize,
        bytes: &[u8],
    ) -> Option<(usize, usize)>
    {
        if start_line1 == 0 || start_line1 > end_line1
        {
            return None;
        }

        let s = self.start_byte_of_line(start_line1)?;
        let e = self.end_byte_of_line(cmp::min(end_line1, self.line_count()), bytes)?;

        (s <= e).then_some((s, e))
    }

    /// 1-based line holding `byte`; a '\n' belongs to the next line.
    /// Returns 0 for empty buffers
    pub fn line_of_byte(
        &self,
        byte: usize,
    ) -> usize
    {
        if self.len == 0
        {
            return 0;
        }

        let before = match self
            .nl_positions
            .binary_search(&byte)
        {
            Ok(pos) => pos + 1,
            Err(pos) => pos,
        };
        before + 1
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn counts_lines()
    {
        assert_eq!(NewlineIndex::build(b"").line_count(), 0);
        assert_eq!(NewlineIndex::build(b"one").line_count(), 1);
        assert_eq!(NewlineIndex::build(b"one\ntwo\n").line_count(), 3);
    }

    #[test]
    fn maps_line_spans_to_bytes()
    {
        let text = b"alpha\r\nbeta\ngamma";
        let idx = NewlineIndex::build(text);

        assert_eq!(idx.byte_range_for_lines(1, 1, text), Some((0, 5)));
        assert_eq!(idx.byte_range_for_lines(2, 3, text), Some((7, 17)));
        // end clamps to the last line
        assert_eq!(idx.byte_range_for_lines(3, 99, text), Some((12, 17)));
        assert_eq!(idx.byte_range_for_lines(0, 1, text), None);
        assert_eq!(idx.byte_range_for_lines(3, 2, text), None);
        assert_eq!(idx.byte_range_for_lines(4, 5, text), None);
    }

    #[test]
    fn maps_bytes_to_lines()
    {
        let text = b"ab\ncd\n";
        let idx = NewlineIndex::build(text);

        assert_eq!(idx.line_of_byte(0), 1);
        assert_eq!(idx.line_of_byte(2), 2);
        assert_eq!(idx.line_of_byte(3), 2);
        assert_eq!(idx.line_of_byte(5), 3);
    }
}
