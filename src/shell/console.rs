use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Line-oriented wrapper around the writer user-visible output goes to.
pub struct Console<W> {
    out: W,
}

impl<W: AsyncWrite + Unpin> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub async fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    /// Raw access for commands that stream bytes, such as `cat`.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
