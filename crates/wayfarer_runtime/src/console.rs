//! The interactive console: one local player connected to the world worker.

use std::io::{self, Write};
use std::time::Duration;

use wayfarer_foundation::Result;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::server::Client;

/// Console player loop.
pub struct Console<E: LineEditor = RustylineEditor> {
    editor: E,
    client: Client,
    prompt: String,
    reply_wait: Duration,
    show_banner: bool,
}

impl Console<RustylineEditor> {
    /// Creates a console with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(client: Client) -> Result<Self> {
        Ok(Self::with_editor(RustylineEditor::new()?, client))
    }
}

impl<E: LineEditor> Console<E> {
    /// Creates a console reading from `editor`.
    pub fn with_editor(editor: E, client: Client) -> Self {
        Self {
            editor,
            client,
            prompt: "> ".to_string(),
            reply_wait: Duration::from_millis(500),
            show_banner: true,
        }
    }

    /// Offers `keywords` for completion.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.editor.set_keywords(keywords);
        self
    }

    /// Sets how long to wait for the reply to a command.
    #[must_use]
    pub const fn with_reply_wait(mut self, reply_wait: Duration) -> Self {
        self.reply_wait = reply_wait;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// The connection this console plays through.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails or the world worker stops.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            print_banner();
        }
        loop {
            print_lines(&self.client.drain());
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.editor.add_history(trimmed);
            if trimmed == "quit" {
                break;
            }
            let replies = self.submit(trimmed)?;
            print_lines(&replies);
        }
        println!("\nFarewell.");
        Ok(())
    }

    /// Sends one line and collects the replies that arrive for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the world worker has stopped.
    pub fn submit(&mut self, line: &str) -> Result<Vec<String>> {
        self.client.send(line)?;
        let mut replies = Vec::new();
        if let Some(first) = self.client.recv_timeout(self.reply_wait) {
            replies.push(first);
            replies.extend(self.client.drain());
        }
        Ok(replies)
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
    let _ = io::stdout().flush();
}

fn print_banner() {
    println!("\x1b[1;36mWayfarer\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
    println!("Type commands to play. `quit` or Ctrl+D leaves.\n");
    let _ = io::stdout().flush();
}
