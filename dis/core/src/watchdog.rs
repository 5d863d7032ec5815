//! Quiet-loop watchdog.
//!
//! The status machine has a terminal state for programs that spin without
//! I/O progress, but nothing in the instruction set transitions into it on
//! its own. The watchdog is the policy: an opt-in step counter that trips
//! after a configured number of consecutive steps in which neither I/O
//! command executed. Machines without a watchdog never enter that state.

use serde::{Deserialize, Serialize};

const DEFAULT_MAX_QUIET_STEPS: u64 = 1_000_000;

#[derive(Debug, Clone, Copy)]
pub struct QuietLoopConfig {
    /// Consecutive steps without an I/O command before the machine is judged
    /// stuck. Normalized up to 1.
    pub max_quiet_steps: u64,
}

impl Default for QuietLoopConfig {
    fn default() -> Self {
        Self {
            max_quiet_steps: DEFAULT_MAX_QUIET_STEPS,
        }
    }
}

impl QuietLoopConfig {
    fn normalized(self) -> Self {
        Self {
            max_quiet_steps: self.max_quiet_steps.max(1),
        }
    }
}

/// Retained when the watchdog trips, for drivers that report the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietLoopReport {
    pub quiet_steps: u64,
    /// Executed-step index at which the limit was crossed.
    pub detected_at: u64,
    /// Program counter after the tripping step.
    pub pc: u128,
}

#[derive(Debug)]
pub struct QuietLoopWatchdog {
    config: QuietLoopConfig,
    quiet_steps: u64,
    last_report: Option<QuietLoopReport>,
}

impl QuietLoopWatchdog {
    pub fn new(config: QuietLoopConfig) -> Self {
        Self {
            config: config.normalized(),
            quiet_steps: 0,
            last_report: None,
        }
    }

    /// Feed one executed step. Returns true when the quiet limit is crossed.
    pub fn record_step(&mut self, performed_io: bool, step_index: u64, pc: u128) -> bool {
        if performed_io {
            self.quiet_steps = 0;
            return false;
        }
        self.quiet_steps += 1;
        if self.quiet_steps < self.config.max_quiet_steps {
            return false;
        }
        self.last_report = Some(QuietLoopReport {
            quiet_steps: self.quiet_steps,
            detected_at: step_index,
            pc,
        });
        true
    }

    pub fn quiet_steps(&self) -> u64 {
        self.quiet_steps
    }

    pub fn last_report(&self) -> Option<&QuietLoopReport> {
        self.last_report.as_ref()
    }
}
