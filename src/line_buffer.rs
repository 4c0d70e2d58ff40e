// This is part of hargassner-telnet.rs.
// Copyright (c) 2026, the hargassner-telnet authors.
// See README.md and LICENSE.txt for details.

/// A growing byte accumulator that reassembles newline-terminated frames
/// from arbitrarily chunked reads.
///
/// Incoming bytes are appended with [`extend`](LineBuffer::extend); complete
/// lines are popped in arrival order with [`next_line`](LineBuffer::next_line)
/// while any unterminated remainder stays buffered for the next read. The
/// buffer itself enforces no ceiling; the client checks [`len`](LineBuffer::len)
/// against its configured maximum and treats a breach as a protocol
/// violation.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Constructs an empty `LineBuffer`.
    pub fn new() -> LineBuffer {
        LineBuffer { buf: Vec::new() }
    }

    /// Appends incoming bytes to the buffer.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pops the next complete line, without its terminator. A trailing `\r`
    /// is stripped as well. Returns `None` while no complete line is
    /// buffered.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;

        let mut line: Vec<u8> = self.buf.drain(0..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        Some(line)
    }

    /// Returns the number of currently buffered bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discards all buffered bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
