//! Operator-facing console protocol

use tokio::io::{AsyncWrite, AsyncWriteExt};

pub const BANNER: &str = "Chatbot started! Type 'quit', 'exit', or 'q' to stop.";
pub const PROMPT: &str = "You: ";
pub const BOT_LABEL: &str = "Bot: ";
pub const FAREWELL: &str = "Exiting chatbot. Goodbye!";

/// Writes the transcript. Every write is flushed so the prompt shows up
/// before the session blocks on input.
pub struct Console<W> {
    out: W,
}

impl<W: AsyncWrite + Unpin> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }

    pub async fn banner(&mut self) -> std::io::Result<()> {
        self.write(&format!("{BANNER}\n")).await
    }

    pub async fn prompt(&mut self) -> std::io::Result<()> {
        self.write(PROMPT).await
    }

    /// Terminate a prompt line that never received input
    pub async fn end_line(&mut self) -> std::io::Result<()> {
        self.write("\n").await
    }

    pub async fn reply(&mut self, text: &str) -> std::io::Result<()> {
        self.write(&format!("{BOT_LABEL}{text}\n")).await
    }

    pub async fn farewell(&mut self) -> std::io::Result<()> {
        self.write(&format!("{FAREWELL}\n")).await
    }
}
