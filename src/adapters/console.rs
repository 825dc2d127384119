use crate::domain::ports::Notifier;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

/// Prints alerts and result lines, one per line.
pub struct ConsoleNotifier<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl ConsoleNotifier<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_line(&self, message: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", message).and_then(|_| out.flush()) {
            tracing::warn!("Failed to write message to console: {}", e);
        }
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn alert(&self, message: &str) {
        self.write_line(message);
    }

    fn show_result(&self, message: &str) {
        self.write_line(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_line_per_message() {
        let notifier = ConsoleNotifier::new(Vec::new());
        notifier.alert("Request sent to owner.");
        notifier.show_result("✅ Door Unlocked");

        let written = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(written, "Request sent to owner.\n✅ Door Unlocked\n");
    }
}
