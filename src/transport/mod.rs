//! Buffered word transport over a byte channel.
//!
//! The channel may deliver partial reads and writes and may pack many
//! logical messages into one physical read. Both directions buffer up to
//! [`BUFFER_WORDS`] words; the reader never exposes a word until all four
//! of its bytes have arrived, and the writer flushes automatically when
//! its buffer fills.

use std::io::{ErrorKind, Read, Write};

use crate::error::{ProtocolError, Result};
use crate::wire::Word;

/// Capacity of each direction's buffer, in words. Bounds the largest single
/// physical read or write, not the largest logical message.
pub const BUFFER_WORDS: usize = 1024;

const WORD_BYTES: usize = std::mem::size_of::<Word>();
const BUFFER_BYTES: usize = BUFFER_WORDS * WORD_BYTES;

pub struct WordReader<R> {
    inner: R,
    buf: Vec<u8>,
    len: usize,
    pos: usize,
}

impl<R: Read> WordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; BUFFER_BYTES],
            len: 0,
            pos: 0,
        }
    }

    pub fn read_word(&mut self) -> Result<Word> {
        if self.pos >= self.len {
            self.refill()?;
        }
        let end = self.pos + WORD_BYTES;
        let bytes: [u8; WORD_BYTES] = self.buf[self.pos..end]
            .try_into()
            .map_err(|_| ProtocolError::Framing("word buffer misaligned"))?;
        self.pos = end;
        Ok(Word::from_ne_bytes(bytes))
    }

    /// Blocks until at least one whole word is buffered. Zero-byte reads and
    /// interrupts are transient; anything else kills the session. If a read
    /// stops mid-word, further reads complete that word before any of it is
    /// decoded.
    fn refill(&mut self) -> Result<()> {
        self.pos = 0;
        self.len = 0;
        let mut filled = 0usize;
        loop {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => continue,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ProtocolError::Transport(e)),
            }
            if filled % WORD_BYTES == 0 {
                break;
            }
        }
        self.len = filled;
        Ok(())
    }
}

pub struct WordWriter<W> {
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> WordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(BUFFER_BYTES),
        }
    }

    pub fn write_word(&mut self, w: Word) -> Result<()> {
        self.buf.extend_from_slice(&w.to_ne_bytes());
        if self.buf.len() >= BUFFER_BYTES {
            self.flush()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Pushes all buffered words through, completing partial writes until
    /// every byte is out. Write errors are fatal.
    pub fn flush(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf)?;
            self.buf.clear();
        }
        self.inner.flush()?;
        Ok(())
    }
}
