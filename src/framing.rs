//! Newline framing of the raw byte stream
//!
//! The phone emits one JSON document per line, but TCP delivers arbitrary
//! chunk boundaries: a single `recv` may carry half a record, several
//! records, or a record split across three reads. [`RecordFramer`] buffers
//! the unterminated tail of each chunk and yields only complete records.

/// Reassembles newline-delimited records from arbitrary byte chunks
pub struct RecordFramer {
    /// Bytes after the last newline seen so far
    pending: Vec<u8>,
}

impl RecordFramer {
    /// Create an empty framer
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Feed one received chunk, returning every record it completes.
    ///
    /// Records are returned without their terminating newline, with the
    /// buffered prefix from earlier chunks included. Bytes after the last
    /// newline stay buffered for the next call. Invalid UTF-8 is replaced
    /// rather than rejected here; the damaged record then fails JSON decode
    /// like any other malformed record.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut records = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop(); // terminating newline
            records.push(String::from_utf8_lossy(&line).into_owned());
        }
        records
    }

    /// Number of bytes currently buffered as an incomplete record
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Discard the buffered tail at end of stream, returning its length.
    ///
    /// An unterminated trailing fragment is never a record; the peer closing
    /// the connection mid-line loses that line.
    pub fn finish(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }
}

impl Default for RecordFramer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk_multiple_records() {
        let mut framer = RecordFramer::new();
        let records = framer.push(b"A\nB\nC");
        assert_eq!(records, vec!["A", "B"]);
        assert_eq!(framer.pending_len(), 1);
    }

    #[test]
    fn test_split_invariance() {
        // Every split of "A\nB\nC" yields the same two records
        let input = b"A\nB\nC";
        for i in 0..=input.len() {
            for j in i..=input.len() {
                let mut framer = RecordFramer::new();
                let mut records = Vec::new();
                records.extend(framer.push(&input[..i]));
                records.extend(framer.push(&input[i..j]));
                records.extend(framer.push(&input[j..]));
                assert_eq!(records, vec!["A", "B"], "split at ({}, {})", i, j);
                assert_eq!(framer.pending_len(), 1);
            }
        }
    }

    #[test]
    fn test_record_spanning_three_chunks() {
        let mut framer = RecordFramer::new();
        assert!(framer.push(b"{\"gyro").is_empty());
        assert!(framer.push(b"scope\":1").is_empty());
        let records = framer.push(b"}\n");
        assert_eq!(records, vec!["{\"gyroscope\":1}"]);
        assert_eq!(framer.pending_len(), 0);
    }

    #[test]
    fn test_empty_chunk_is_noop() {
        let mut framer = RecordFramer::new();
        framer.push(b"partial");
        assert!(framer.push(b"").is_empty());
        assert_eq!(framer.pending_len(), 7);
    }

    #[test]
    fn test_finish_discards_tail() {
        let mut framer = RecordFramer::new();
        framer.push(b"complete\nincomplete");
        assert_eq!(framer.finish(), 10);
        assert_eq!(framer.pending_len(), 0);
    }

    #[test]
    fn test_blank_lines_become_empty_records() {
        let mut framer = RecordFramer::new();
        let records = framer.push(b"\n\nA\n");
        assert_eq!(records, vec!["", "", "A"]);
    }
}
