use std::io;

use dis_ring::Word;
use serde::{Deserialize, Serialize};

/// The three ring-valued registers.
#[derive(Debug, Clone, Copy)]
pub struct Registers<T: Word> {
    /// Accumulator.
    pub a: T,
    /// Program counter.
    pub c: T,
    /// Data pointer. Advances in lockstep with `c` after every step.
    pub d: T,
}

impl<T: Word> Registers<T> {
    pub fn new() -> Self {
        Self {
            a: T::zero(),
            c: T::zero(),
            d: T::zero(),
        }
    }
}

impl<T: Word> Default for Registers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle status of one machine instance.
///
/// Created `Running`; moves at most once to a terminal variant. Stepping a
/// terminal machine is a no-op, never an error. The halt variants are
/// designed termination paths; only the two I/O variants carry a failure
/// cause.
#[derive(Debug)]
pub enum Status {
    Running,
    /// The halt command executed.
    Halted,
    /// A write executed with the accumulator holding the end-of-stream
    /// sentinel (`MAX`).
    EofWrite,
    /// The quiet-loop watchdog judged the program to be spinning without
    /// I/O progress.
    QuietLoop,
    /// The output collaborator failed.
    WriteError(io::Error),
    /// The input collaborator failed for a reason other than end-of-stream.
    ReadError(io::Error),
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_running()
    }

    pub fn kind(&self) -> StatusKind {
        match self {
            Status::Running => StatusKind::Running,
            Status::Halted => StatusKind::Halted,
            Status::EofWrite => StatusKind::EofWrite,
            Status::QuietLoop => StatusKind::QuietLoop,
            Status::WriteError(_) => StatusKind::WriteError,
            Status::ReadError(_) => StatusKind::ReadError,
        }
    }
}

/// Payload-free discriminant of [`Status`], for drivers that compare or
/// serialize outcomes without touching the opaque I/O causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Running,
    Halted,
    EofWrite,
    QuietLoop,
    WriteError,
    ReadError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_track_variants() {
        assert_eq!(Status::Running.kind(), StatusKind::Running);
        assert_eq!(Status::Halted.kind(), StatusKind::Halted);
        assert_eq!(Status::EofWrite.kind(), StatusKind::EofWrite);
        assert_eq!(Status::QuietLoop.kind(), StatusKind::QuietLoop);
        let err = io::Error::new(io::ErrorKind::Other, "boom");
        assert_eq!(Status::WriteError(err).kind(), StatusKind::WriteError);
        assert!(Status::Running.is_running());
        assert!(Status::Halted.is_terminal());
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&StatusKind::EofWrite).unwrap();
        assert_eq!(json, "\"eof_write\"");
    }
}
