//! A `MakeWriter` that hands each formatted event to a console function.
//!
//! In the browser stdout goes nowhere, so events are routed to
//! `console.log`, `console.warn` or `console.error` by level.

use std::io::{self, Write};
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Receives one formatted event, without its trailing newline.
pub type Sink = fn(&str);

#[derive(Clone, Copy)]
pub struct ConsoleMakeWriter {
    log: Sink,
    warn: Sink,
    error: Sink,
}

impl ConsoleMakeWriter {
    pub fn new(log: Sink, warn: Sink, error: Sink) -> Self {
        Self { log, warn, error }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(
            |line| web_sys::console::log_1(&line.into()),
            |line| web_sys::console::warn_1(&line.into()),
            |line| web_sys::console::error_1(&line.into()),
        )
    }

    fn writer(&self, sink: Sink) -> ConsoleWriter {
        ConsoleWriter {
            sink,
            buffer: Vec::new(),
        }
    }
}

/// Buffers one event and emits it on flush or drop.
pub struct ConsoleWriter {
    sink: Sink,
    buffer: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer);
            (self.sink)(line.trim_end());
            self.buffer.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(self.log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        let sink = match *meta.level() {
            Level::ERROR => self.error,
            Level::WARN => self.warn,
            _ => self.log,
        };
        self.writer(sink)
    }
}
