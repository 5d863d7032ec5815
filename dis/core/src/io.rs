use std::io::{self, Read, Write};

/// Byte source collaborator. One blocking read per call; `Ok(None)` signals
/// end of stream and is normal data flow, not a failure.
pub trait InputPort {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Byte sink collaborator. One blocking write per call.
pub trait OutputPort {
    fn write_byte(&mut self, byte: u8) -> io::Result<()>;
}

/// Adapter from any [`io::Read`]. `Ok(0)` and `UnexpectedEof` both map to
/// end-of-stream; `Interrupted` reads are retried.
#[derive(Debug)]
pub struct StreamInput<R> {
    inner: R,
}

impl<R: Read> StreamInput<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> InputPort for StreamInput<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    }
}

/// Adapter from any [`io::Write`].
#[derive(Debug)]
pub struct StreamOutput<W> {
    inner: W,
}

impl<W: Write> StreamOutput<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> OutputPort for StreamOutput<W> {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.inner.write_all(&[byte])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_input_reads_until_end_of_stream() {
        let mut input = StreamInput::new(&b"ab"[..]);
        assert_eq!(input.read_byte().unwrap(), Some(b'a'));
        assert_eq!(input.read_byte().unwrap(), Some(b'b'));
        assert_eq!(input.read_byte().unwrap(), None);
        assert_eq!(input.read_byte().unwrap(), None);
    }

    #[test]
    fn stream_output_appends_bytes() {
        let mut output = StreamOutput::new(Vec::new());
        output.write_byte(b'x').unwrap();
        output.write_byte(b'y').unwrap();
        assert_eq!(output.into_inner(), b"xy");
    }

    struct InterruptedOnce {
        fired: bool,
    }

    impl Read for InterruptedOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fired {
                buf[0] = b'z';
                Ok(1)
            } else {
                self.fired = true;
                Err(io::Error::new(io::ErrorKind::Interrupted, "signal"))
            }
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let mut input = StreamInput::new(InterruptedOnce { fired: false });
        assert_eq!(input.read_byte().unwrap(), Some(b'z'));
    }
}
