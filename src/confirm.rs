//! Operator confirmation gates
//!
//! Destructive version-manager operations (restore, delete) must be
//! acknowledged before they proceed. The gate is a capability the caller
//! supplies: production code uses a blocking terminal prompt, the `--yes`
//! flag substitutes automatic approval, and tests script the answer.

use std::io::{self, BufRead, Write};

/// Yes/no acknowledgment required before a destructive operation
pub trait ConfirmationGate {
    /// Return true to proceed with the described operation
    fn confirm(&self, operation: &str) -> bool;
}

/// Blocking y/N prompt on the terminal. No timeout: the operation simply
/// waits until an answer is given.
pub struct TerminalGate;

impl ConfirmationGate for TerminalGate {
    fn confirm(&self, operation: &str) -> bool {
        print!("{} Proceed? (y/N): ", operation);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("y")
    }
}

/// Gate that approves everything; backs the `--yes` CLI flag
pub struct AssumeYes;

impl ConfirmationGate for AssumeYes {
    fn confirm(&self, _operation: &str) -> bool {
        true
    }
}

#[cfg(test)]
pub mod testing {
    use super::ConfirmationGate;
    use std::cell::Cell;

    /// Gate with a scripted answer, recording whether it was consulted
    pub struct ScriptedGate {
        answer: bool,
        asked: Cell<bool>,
    }

    impl ScriptedGate {
        pub fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: Cell::new(false),
            }
        }

        pub fn was_asked(&self) -> bool {
            self.asked.get()
        }
    }

    impl ConfirmationGate for ScriptedGate {
        fn confirm(&self, _operation: &str) -> bool {
            self.asked.set(true);
            self.answer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedGate;
    use super::*;

    #[test]
    fn test_assume_yes_always_approves() {
        assert!(AssumeYes.confirm("Delete everything."));
    }

    #[test]
    fn test_scripted_gate_records_consultation() {
        let gate = ScriptedGate::new(false);
        assert!(!gate.was_asked());
        assert!(!gate.confirm("Restore version v1."));
        assert!(gate.was_asked());
    }
}
