//! Line-oriented terminal input shared by the REPL and its prompts.

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

use crate::error::RegistrarError;

type LineSource = Lines<Box<dyn AsyncBufRead + Send + Unpin>>;

/// One reader over the terminal, so prompts and commands never race for stdin.
pub struct ConsoleInput {
    lines: Mutex<LineSource>,
}

impl ConsoleInput {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        let boxed: Box<dyn AsyncBufRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: Mutex::new(boxed.lines()),
        }
    }

    /// Reads the next line without its terminator. `Ok(None)` at end of input.
    ///
    /// Cancel safe.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] if reading fails.
    pub async fn next_line(&self) -> Result<Option<String>, RegistrarError> {
        self.lines
            .lock()
            .await
            .next_line()
            .await
            .map_err(|e| RegistrarError::internal(format!("Failed to read input: {e}")))
    }

    /// Prints `label` and reads one answer. Blank answers and end of input
    /// read as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Internal`] if the label cannot be shown or
    /// reading fails.
    pub async fn prompt(&self, label: &str) -> Result<Option<String>, RegistrarError> {
        write_label(&mut std::io::stdout(), label)?;

        let answer = self.next_line().await?;
        Ok(answer
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty()))
    }
}

fn write_label(out: &mut impl Write, label: &str) -> Result<(), RegistrarError> {
    out.write_all(label.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| RegistrarError::internal(format!("Failed to write prompt: {e}")))
}
