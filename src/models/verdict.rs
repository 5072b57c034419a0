//! Verdict Model
//!
//! The tri-state classification handed back to `git bisect run` and its
//! fixed exit-code mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of testing one candidate revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The revision does not exhibit the problem
    Good,
    /// The revision exhibits the problem
    Bad,
    /// The revision cannot be tested
    Skip,
}

impl Verdict {
    /// All verdicts, in exit-code order
    pub const ALL: [Verdict; 3] = [Verdict::Good, Verdict::Bad, Verdict::Skip];

    /// Exit code understood by `git bisect run`
    pub const fn exit_code(self) -> i32 {
        match self {
            Verdict::Good => 0,
            Verdict::Bad => 1,
            Verdict::Skip => 125,
        }
    }

    /// Inverse of [`Verdict::exit_code`]
    pub fn from_exit_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.exit_code() == code)
    }

    /// Parse an operator answer. Accepts any case-insensitive prefix of
    /// "good", "bad" or "skip" as well as longer words starting with the
    /// same letter.
    pub fn from_answer(answer: &str) -> Option<Self> {
        let answer = answer.trim().to_lowercase();
        match answer.chars().next()? {
            'g' => Some(Verdict::Good),
            'b' => Some(Verdict::Bad),
            's' => Some(Verdict::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Good => write!(f, "GOOD"),
            Verdict::Bad => write!(f, "BAD"),
            Verdict::Skip => write!(f, "SKIP"),
        }
    }
}

/// Result of one state-machine step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Proceed to the next stage
    Continue,
    /// Stop here with the given verdict
    Finish(Verdict),
}
