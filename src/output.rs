//! Operator-facing text output.
//!
//! Everything the console says to the operator goes through one [`Output`]
//! sink: stdout in the binary, an in-memory buffer in tests.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// A single operator output stream.
#[derive(Clone)]
pub struct Output {
    capture: Option<Arc<Mutex<String>>>,
}

impl Output {
    /// Output that writes to stdout.
    pub fn stdout() -> Self {
        Self { capture: None }
    }

    /// Output that records into an in-memory buffer (for tests).
    #[allow(dead_code)]
    pub fn capture() -> Self {
        Self {
            capture: Some(Arc::new(Mutex::new(String::new()))),
        }
    }

    /// Print one line of operator output.
    pub fn line(&self, text: impl AsRef<str>) {
        match &self.capture {
            None => println!("{}", text.as_ref()),
            Some(buf) => {
                let mut guard = buf.lock();
                guard.push_str(text.as_ref());
                guard.push('\n');
            }
        }
    }

    /// Print a prompt without a trailing newline and flush.
    ///
    /// Prompts are presentation only; capture mode drops them so tests
    /// assert on content, not cursor furniture.
    pub fn prompt(&self, text: &str) {
        if self.capture.is_none() {
            print!("{}", text);
            let _ = std::io::stdout().flush();
        }
    }

    /// Everything recorded so far. Empty unless built with [`Output::capture`].
    #[allow(dead_code)]
    pub fn captured(&self) -> String {
        self.capture
            .as_ref()
            .map(|buf| buf.lock().clone())
            .unwrap_or_default()
    }
}
