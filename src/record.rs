//! Sentinel-delimited record stream parser.
//!
//! The extraction script ([`crate::script`]) can only print raw text, so
//! item bodies arrive on the subprocess's stdout framed by sentinel lines
//! rather than as structured data. This module reassembles the original
//! bodies with a two-state accumulator: a line starting with the sentinel
//! closes the record accumulated so far, any other line (blank ones
//! included) is folded into the current record. Embedded newlines survive;
//! the single terminator the framing adds after the last line of a body is
//! stripped on emit.
//!
//! The assembler never touches the subprocess; it consumes decoded lines
//! and yields completed bodies.

/// Incremental reassembler for one sentinel-framed stream.
///
/// Feed lines (without their terminators) in order via
/// [`push_line`](RecordAssembler::push_line); call
/// [`finish`](RecordAssembler::finish) once the stream is exhausted to
/// flush a trailing record that has no closing sentinel.
pub struct RecordAssembler<'a> {
    sentinel: &'a str,
    buf: String,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(sentinel: &'a str) -> Self {
        Self {
            sentinel,
            buf: String::new(),
        }
    }

    /// Consume one line of subprocess output.
    ///
    /// Returns the completed record when `line` is a sentinel boundary and
    /// something had accumulated; returns `None` for ordinary lines and for
    /// boundaries with an empty accumulator (a leading or doubled sentinel).
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        if line.starts_with(self.sentinel) {
            if self.buf.is_empty() {
                return None;
            }
            return Some(self.take_record());
        }

        self.buf.push_str(line);
        self.buf.push('\n');
        None
    }

    /// Flush the accumulator after end of stream.
    ///
    /// A record still being accumulated when the stream ends is emitted
    /// as-is; an orphan trailing sentinel has already reset the state and
    /// yields nothing.
    pub fn finish(mut self) -> Option<String> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.take_record())
        }
    }

    fn take_record(&mut self) -> String {
        let mut record = std::mem::take(&mut self.buf);
        // Every accumulated line carries a terminator; the final one is
        // framing, not content.
        if record.ends_with('\n') {
            record.pop();
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: &str = "6c3ab29e-test-sentinel";

    fn assemble(lines: &[&str]) -> Vec<String> {
        let mut assembler = RecordAssembler::new(SENTINEL);
        let mut records: Vec<String> = lines
            .iter()
            .filter_map(|line| assembler.push_line(line))
            .collect();
        records.extend(assembler.finish());
        records
    }

    #[test]
    fn test_single_record() {
        assert_eq!(assemble(&[SENTINEL, "hello"]), vec!["hello"]);
    }

    #[test]
    fn test_multi_line_body_keeps_embedded_newlines() {
        assert_eq!(
            assemble(&[SENTINEL, "a", SENTINEL, "b", "b2", SENTINEL]),
            vec!["a", "b\nb2"]
        );
    }

    #[test]
    fn test_leading_sentinel_emits_nothing() {
        assert_eq!(assemble(&[SENTINEL]), Vec::<String>::new());
        assert_eq!(assemble(&[SENTINEL, SENTINEL, "x"]), vec!["x"]);
    }

    #[test]
    fn test_trailing_orphan_sentinel_adds_no_record() {
        assert_eq!(assemble(&[SENTINEL, "x", SENTINEL]), vec!["x"]);
    }

    #[test]
    fn test_unterminated_final_record_is_flushed() {
        assert_eq!(assemble(&[SENTINEL, "x", SENTINEL, "tail"]), vec!["x", "tail"]);
    }

    #[test]
    fn test_no_sentinel_at_all_yields_one_record() {
        assert_eq!(assemble(&["x", "y"]), vec!["x\ny"]);
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        assert_eq!(assemble(&[]), Vec::<String>::new());
    }

    #[test]
    fn test_blank_lines_fold_into_the_current_record() {
        assert_eq!(assemble(&[SENTINEL, "a", "", "b", SENTINEL]), vec!["a\n\nb"]);
    }

    #[test]
    fn test_blank_line_alone_becomes_an_empty_record() {
        // A lone blank line still accumulates a terminator, so the boundary
        // emits a record whose body is empty.
        assert_eq!(assemble(&[SENTINEL, "", SENTINEL]), vec![""]);
    }

    #[test]
    fn test_sentinel_prefix_is_enough_to_close() {
        let noisy = format!("{SENTINEL} trailing junk");
        let mut assembler = RecordAssembler::new(SENTINEL);
        assert_eq!(assembler.push_line("body"), None);
        assert_eq!(assembler.push_line(&noisy), Some("body".to_string()));
        assert_eq!(assembler.finish(), None);
    }

    #[test]
    fn test_exactly_one_terminator_stripped() {
        // The body's own trailing blank line must survive; only the framing
        // terminator goes.
        assert_eq!(assemble(&[SENTINEL, "x", "", SENTINEL]), vec!["x\n"]);
    }
}
