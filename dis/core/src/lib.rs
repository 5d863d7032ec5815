//! Execution core for the Dis virtual machine.
//!
//! One [`Machine`] owns the three ring-valued registers (accumulator A,
//! program counter C, data pointer D), a unified code/data memory of `END`
//! ring elements, and the halting/error status. A driver loads an initial
//! memory image, then steps the machine until the status leaves
//! [`Status::Running`]. Byte I/O goes through the [`InputPort`] and
//! [`OutputPort`] collaborators bound at construction; everything else is
//! internal to the core.

use thiserror::Error;

pub mod decode;
pub mod exec;
pub mod io;
pub mod loader;
pub mod memory;
pub mod state;
pub mod watchdog;

pub use decode::{decode, Op};
pub use dis_ring::{ConfigError, Ring, Word};
pub use exec::Machine;
pub use io::{InputPort, OutputPort, StreamInput, StreamOutput};
pub use loader::{parse_source, LoadError};
pub use memory::MemoryImage;
pub use state::{Registers, Status, StatusKind};
pub use watchdog::{QuietLoopConfig, QuietLoopReport, QuietLoopWatchdog};

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("ring configuration error: {0}")]
    Config(#[from] dis_ring::ConfigError),
    #[error("load error: {0}")]
    Load(#[from] loader::LoadError),
    #[error("memory of {end} words does not fit the host address space")]
    MemoryTooLarge { end: u128 },
    #[error("image of {len} words exceeds memory capacity {capacity}")]
    ImageTooLarge { len: usize, capacity: usize },
    #[error("image word {value} at index {index} is not a ring element")]
    WordOutOfRange { index: usize, value: u128 },
}

/// Word type of the configuration the language ships with.
pub type DisWord = u16;

pub const DIS_BASE: u32 = 3;
pub const DIS_DIGITS: u32 = 10;

/// The ring the language defines: ten ternary digits, 59049 words.
pub fn default_ring() -> Ring<DisWord> {
    Ring::new(DIS_BASE, DIS_DIGITS).expect("the shipped configuration is valid")
}
