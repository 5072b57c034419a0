//! Operator judgment
//!
//! Asks the operator whether the revision they just exercised is good,
//! bad or untestable.

use crate::models::Verdict;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Good/Bad/Skip? (g/b/s) ";
pub const INVALID_ANSWER: &str = "Invalid input. Please answer 'good' or 'bad' or 'skip'.";

/// Source of the final verdict after an interactive session
pub trait Judge {
    fn judge(&mut self) -> Verdict;
}

/// Line-oriented prompt. End of input, or a read error, means Skip.
pub struct PromptJudge<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptJudge<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl PromptJudge<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Judge for PromptJudge<R, W> {
    fn judge(&mut self) -> Verdict {
        loop {
            // A broken stdout must not keep us from reading the answer
            let _ = write!(self.output, "{}", PROMPT);
            let _ = self.output.flush();

            let mut answer = String::new();
            match self.input.read_line(&mut answer) {
                Ok(0) => {
                    let _ = writeln!(self.output);
                    return Verdict::Skip;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read answer: {}", e);
                    return Verdict::Skip;
                }
            }

            match Verdict::from_answer(&answer) {
                Some(verdict) => {
                    debug!("Operator answered {}", verdict);
                    return verdict;
                }
                None => {
                    let _ = writeln!(self.output, "{}", INVALID_ANSWER);
                }
            }
        }
    }
}
