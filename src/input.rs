//! Unified line input: scripted prefix, interactive suffix.
//!
//! The run loop consumes one lazy sequence of lines regardless of where
//! they come from: first the pre-supplied script (in order), then an
//! interactive reader that blocks until the operator supplies a line or
//! closes the input stream. The executor never special-cases the two
//! phases; only the `scripted` marker differs, which the run loop uses to
//! echo script lines into the transcript.

use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::output::Output;

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The raw text, without a trailing newline.
    pub text: String,
    /// Whether the line came from the scripted phase.
    pub scripted: bool,
}

type BoxedReader = Lines<BufReader<Box<dyn tokio::io::AsyncRead + Send + Unpin>>>;

/// Produces the scripted-then-interactive line sequence.
pub struct LineSource {
    script: std::vec::IntoIter<String>,
    had_script: bool,
    reader: BoxedReader,
    output: Output,
}

impl LineSource {
    /// A line source that falls through to stdin after the script.
    pub fn new(script: Vec<String>, output: Output) -> Self {
        Self::with_reader(script, output, Box::new(tokio::io::stdin()))
    }

    /// A line source with an explicit interactive reader (for tests).
    pub fn with_reader(
        script: Vec<String>,
        output: Output,
        reader: Box<dyn tokio::io::AsyncRead + Send + Unpin>,
    ) -> Self {
        Self {
            had_script: !script.is_empty(),
            script: script.into_iter(),
            reader: BufReader::new(reader).lines(),
            output,
        }
    }

    /// Whether any scripted lines were supplied at construction.
    pub fn has_script(&self) -> bool {
        self.had_script
    }

    /// The next line, or `None` at end of input.
    ///
    /// Blocks during the interactive phase until the operator supplies a
    /// line or signals end-of-input.
    pub async fn next(&mut self) -> std::io::Result<Option<Line>> {
        if let Some(text) = self.script.next() {
            return Ok(Some(Line {
                text,
                scripted: true,
            }));
        }

        self.output.prompt("> ");
        Ok(self.reader.next_line().await?.map(|text| Line {
            text,
            scripted: false,
        }))
    }
}
