//! Stdout sink for the race's event stream.

use std::io::{self, BufWriter, Stdout, Write};

use engine::{EventSink, MatchEvent};

/// Buffered stdout sink, one line per play.
///
/// `publish` runs inside the pile's critical section, so lines go
/// through a buffer and the first write error is remembered instead of
/// handled inline; [`finish`](StdoutSink::finish) flushes and reports
/// it.
pub struct StdoutSink {
    out: BufWriter<Stdout>,
    json: bool,
    quiet: bool,
    error: Option<io::Error>,
}

impl StdoutSink {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self {
            out: BufWriter::new(io::stdout()),
            json,
            quiet,
            error: None,
        }
    }

    fn write(&mut self, event: MatchEvent) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, &event)?;
            self.out.write_all(b"\n")
        } else {
            writeln!(self.out, "Worker {} played {}", event.worker, event.value)
        }
    }

    /// Flush the buffer and surface the first write error, if any.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.out.flush()
    }
}

impl EventSink for StdoutSink {
    fn publish(&mut self, event: MatchEvent) {
        if self.quiet || self.error.is_some() {
            return;
        }
        if let Err(err) = self.write(event) {
            self.error = Some(err);
        }
    }
}
