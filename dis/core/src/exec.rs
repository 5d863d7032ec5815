use std::env;

use dis_ring::{Ring, Word};

use crate::decode::{decode, Op};
use crate::io::{InputPort, OutputPort};
use crate::loader::parse_source;
use crate::memory::MemoryImage;
use crate::state::{Registers, Status, StatusKind};
use crate::watchdog::{QuietLoopConfig, QuietLoopReport, QuietLoopWatchdog};
use crate::Result;

/// One machine instance: registers, memory, status, and the two byte-stream
/// collaborators bound at construction.
///
/// The machine exclusively owns its registers and memory for its lifetime.
/// Drivers interact through image loading before the run, [`Machine::step`]
/// and the run helpers during it, and the read-only accessors at any point.
pub struct Machine<T: Word, I, O> {
    ring: Ring<T>,
    regs: Registers<T>,
    memory: MemoryImage<T>,
    status: Status,
    input: I,
    output: O,
    watchdog: Option<QuietLoopWatchdog>,
    steps: u64,
    bytes_read: u64,
    bytes_written: u64,
    trace: bool,
}

impl<T: Word, I: InputPort, O: OutputPort> Machine<T, I, O> {
    pub fn new(ring: Ring<T>, input: I, output: O) -> Result<Self> {
        Ok(Self {
            memory: MemoryImage::new(&ring)?,
            ring,
            regs: Registers::new(),
            status: Status::Running,
            input,
            output,
            watchdog: None,
            steps: 0,
            bytes_read: 0,
            bytes_written: 0,
            trace: env::var("DIS_TRACE_EXEC").is_ok(),
        })
    }

    /// Attach the quiet-loop watchdog. Without one the machine never enters
    /// the no-I/O terminal state.
    pub fn with_watchdog(mut self, config: QuietLoopConfig) -> Self {
        self.watchdog = Some(QuietLoopWatchdog::new(config));
        self
    }

    pub fn load_image_words(&mut self, words: &[T]) -> Result<()> {
        self.memory.load_words(words, &self.ring)
    }

    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.memory.load_bytes(bytes, &self.ring)
    }

    /// Parse program text (commands, whitespace, comments) and install it.
    pub fn load_source(&mut self, text: &str) -> Result<()> {
        let program = parse_source(text)?;
        self.load_image_bytes(&program)
    }

    /// Execute one step. A no-op once the status is terminal.
    pub fn step(&mut self) {
        if !self.status.is_running() {
            return;
        }
        let word = self.memory.load(self.regs.c);
        let op = decode(word);
        if self.trace {
            eprintln!(
                "[dis-exec] step={step} c={c} d={d} a={a} word={word} op={op}",
                step = self.steps,
                c = self.regs.c.to_wide(),
                d = self.regs.d.to_wide(),
                a = self.regs.a.to_wide(),
                word = word.to_wide(),
                op = op.map_or('.', Op::symbol),
            );
        }
        let mut performed_io = false;
        match op {
            Some(Op::Halt) => self.status = Status::Halted,
            Some(Op::Load) => self.regs.d = self.memory.load(self.regs.d),
            Some(Op::Rot) => {
                let z = self.ring.rotate_right(self.memory.load(self.regs.d));
                self.store_result(z);
            }
            Some(Op::Jmp) => self.regs.c = self.memory.load(self.regs.d),
            Some(Op::Out) => {
                performed_io = true;
                self.write_accumulator();
            }
            Some(Op::Sub) => {
                let z = self
                    .ring
                    .digit_subtract(self.regs.a, self.memory.load(self.regs.d));
                self.store_result(z);
            }
            Some(Op::In) => {
                performed_io = true;
                self.read_accumulator();
            }
            Some(Op::Nop) | None => {}
        }
        self.steps += 1;
        if self.status.is_running() {
            self.regs.c = self.ring.successor(self.regs.c);
            self.regs.d = self.ring.successor(self.regs.d);
            if let Some(dog) = self.watchdog.as_mut() {
                if dog.record_step(performed_io, self.steps, self.regs.c.to_wide()) {
                    self.status = Status::QuietLoop;
                }
            }
        }
    }

    /// Step until the status is terminal.
    pub fn run(&mut self) -> StatusKind {
        while self.status.is_running() {
            self.step();
        }
        self.status.kind()
    }

    /// Step at most `max_steps` times, for drivers that interleave other
    /// work with execution.
    pub fn run_for(&mut self, max_steps: u64) -> StatusKind {
        let mut taken = 0;
        while self.status.is_running() && taken < max_steps {
            self.step();
            taken += 1;
        }
        self.status.kind()
    }

    // Both arithmetic commands write their result to the accumulator and to
    // memory[D]; this is the instruction set's one shared store path.
    fn store_result(&mut self, z: T) {
        self.regs.a = z;
        self.memory.store(self.regs.d, z);
    }

    fn write_accumulator(&mut self) {
        if self.regs.a == self.ring.max() {
            self.status = Status::EofWrite;
            return;
        }
        let byte = (self.regs.a.to_wide() & 0xFF) as u8;
        match self.output.write_byte(byte) {
            Ok(()) => self.bytes_written += 1,
            Err(cause) => self.status = Status::WriteError(cause),
        }
    }

    fn read_accumulator(&mut self) {
        match self.input.read_byte() {
            Ok(Some(byte)) => {
                self.bytes_read += 1;
                self.regs.a = self.ring.wrap(byte as u128);
            }
            Ok(None) => self.regs.a = self.ring.max(),
            Err(cause) => {
                self.regs.a = self.ring.max();
                self.status = Status::ReadError(cause);
            }
        }
    }

    pub fn ring(&self) -> &Ring<T> {
        &self.ring
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn status_kind(&self) -> StatusKind {
        self.status.kind()
    }

    pub fn a(&self) -> T {
        self.regs.a
    }

    pub fn c(&self) -> T {
        self.regs.c
    }

    pub fn d(&self) -> T {
        self.regs.d
    }

    /// Seed the accumulator before a run. Values outside the ring are
    /// reduced modulo `END`.
    pub fn set_a(&mut self, value: T) {
        self.regs.a = self.ring.wrap(value.to_wide());
    }

    pub fn memory(&self) -> &MemoryImage<T> {
        &self.memory
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn watchdog_report(&self) -> Option<&QuietLoopReport> {
        self.watchdog.as_ref().and_then(QuietLoopWatchdog::last_report)
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn into_io(self) -> (I, O) {
        (self.input, self.output)
    }
}
