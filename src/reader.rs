use {
    std::mem,
    tokio::io::{AsyncBufRead, AsyncBufReadExt},
};

/// Reads newline-delimited records from the input.
///
/// No record length is enforced: a line is buffered in memory in full
/// before it is handed out.
pub struct Reader<R> {
    input: R,
    buf: Vec<u8>,
}

pub enum LineRead {
    Eof,
    Line,
}

impl<R: AsyncBufRead + Unpin> Reader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: Vec::with_capacity(1024),
        }
    }

    /// Read the next line into `read_buf`, with the terminator (and a
    /// preceding carriage return, if any) stripped.
    pub async fn read_line(&mut self, read_buf: &mut Vec<u8>) -> std::io::Result<LineRead> {
        self.buf.clear();
        let n_bytes = self.input.read_until(b'\n', &mut self.buf).await?;

        if n_bytes == 0 {
            return Ok(LineRead::Eof);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        mem::swap(&mut self.buf, read_buf);
        Ok(LineRead::Line)
    }
}
