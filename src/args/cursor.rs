//! Raw argument cursor: the untouched tail of the command line.
//!
//! Argument files are expanded by pushing a new frame holding the file's
//! lines; the innermost frame is always read first. Each frame remembers the
//! chain of files that included it, so cycles are caught even when the
//! including file has no lines left.

use std::collections::VecDeque;
use std::path::PathBuf;

#[derive(Debug)]
struct Frame {
    /// Canonical paths of the argument files leading to this frame, outermost
    /// first. Empty for the command line itself.
    chain: Vec<PathBuf>,
    args: VecDeque<String>,
}

/// Forward-only cursor over raw argument strings.
#[derive(Debug)]
pub struct ArgCursor {
    frames: Vec<Frame>,
}

impl ArgCursor {
    /// Cursor over the given command-line arguments.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            frames: vec![Frame {
                chain: Vec::new(),
                args: args.into_iter().map(Into::into).collect(),
            }],
        }
    }

    /// The next raw argument, without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.current().and_then(|frame| frame.args.front()).map(String::as_str)
    }

    /// Consume and return the next raw argument.
    pub fn advance(&mut self) -> Option<String> {
        while self.frames.len() > 1 && self.frames.last().is_some_and(|f| f.args.is_empty()) {
            self.frames.pop();
        }
        self.frames.last_mut().and_then(|frame| frame.args.pop_front())
    }

    /// Drain every unconsumed raw argument, innermost argument file first.
    pub fn take_remaining(&mut self) -> Vec<String> {
        let mut remaining = Vec::new();
        for frame in self.frames.iter_mut().rev() {
            remaining.extend(frame.args.drain(..));
        }
        remaining
    }

    /// Argument files that led to the next raw argument, outermost first.
    pub(crate) fn include_chain(&self) -> &[PathBuf] {
        self.current().map(|frame| frame.chain.as_slice()).unwrap_or(&[])
    }

    /// Splice the lines of an argument file in front of the remaining input.
    pub(crate) fn push_file(&mut self, chain: Vec<PathBuf>, lines: Vec<String>) {
        self.frames.push(Frame {
            chain,
            args: lines.into(),
        });
    }

    fn current(&self) -> Option<&Frame> {
        self.frames.iter().rev().find(|frame| !frame.args.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut cursor = ArgCursor::new(["a", "b"]);
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.advance().as_deref(), Some("a"));
        assert_eq!(cursor.peek(), Some("b"));
    }

    #[test]
    fn test_file_frame_is_read_first() {
        let mut cursor = ArgCursor::new(["@opts", "tail"]);
        cursor.advance();
        cursor.push_file(vec![PathBuf::from("/tmp/opts")], vec!["x".into(), "y".into()]);

        assert_eq!(cursor.include_chain(), [PathBuf::from("/tmp/opts")]);
        assert_eq!(cursor.advance().as_deref(), Some("x"));
        assert_eq!(cursor.take_remaining(), vec!["y", "tail"]);
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn test_exhausted_frames_are_skipped() {
        let mut cursor = ArgCursor::new(["tail"]);
        cursor.push_file(vec![PathBuf::from("/tmp/empty")], Vec::new());
        assert!(cursor.include_chain().is_empty());
        assert_eq!(cursor.advance().as_deref(), Some("tail"));
        assert_eq!(cursor.advance(), None);
    }
}
