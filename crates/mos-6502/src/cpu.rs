//! The 6502 core: reset, stack access and the instruction-stepping engine.

use emu_core::{Bus, Cpu, Observable, Value};
use thiserror::Error;
use tracing::{trace, warn};

use crate::opcodes::{OpcodeEntry, decode};
use crate::{Registers, Status};

/// Reset vector (low byte; high byte at +1).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Software-break vector (low byte; high byte at +1).
pub const BRK_VECTOR: u16 = 0xFFFE;

/// Raised by [`Mos6502::step`] when an instruction cannot be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    /// The byte at `pc` has no entry in the opcode table. PC is left
    /// pointing at it.
    #[error("undefined opcode ${opcode:02X} at ${pc:04X}")]
    UndefinedOpcode { opcode: u8, pc: u16 },
}

/// An instruction as it sits in memory, decoded without executing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fetched {
    pub pc: u16,
    pub entry: OpcodeEntry,
    raw: [u8; 3],
    len: u8,
}

impl Fetched {
    /// Opcode followed by its operand bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.raw[..usize::from(self.len)]
    }

    #[must_use]
    pub fn opcode(&self) -> u8 {
        self.raw[0]
    }
}

/// NMOS 6502 with the stable undocumented opcodes.
///
/// State is just the register file and a running cycle total. Memory is
/// borrowed from the caller for every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,
    /// Cycles executed since the last reset.
    cycles: u64,
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl Mos6502 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            cycles: 0,
        }
    }

    // =========================================================================
    // Register accessors
    // =========================================================================

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    #[must_use]
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    #[must_use]
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    #[must_use]
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    #[must_use]
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Status register as the hardware byte (B as currently held, bit 5 set).
    #[must_use]
    pub fn status(&self) -> u8 {
        self.regs.p.to_byte()
    }

    #[must_use]
    pub fn flags(&self) -> Status {
        self.regs.p
    }

    /// Replace C Z I D V N from a status byte. B is left alone.
    pub fn set_status(&mut self, value: u8) {
        self.regs.p.set_from_byte(value);
    }

    /// Total cycles executed since the last reset.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // =========================================================================
    // Stack
    // =========================================================================

    pub fn push_byte<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let address = self.regs.push();
        bus.write(address, value);
    }

    /// Push high byte first so the word reads little-endian in memory.
    pub fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push_byte(bus, high);
        self.push_byte(bus, low);
    }

    pub fn pull_byte<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let address = self.regs.pop();
        bus.read(address)
    }

    pub fn pull_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = self.pull_byte(bus);
        let high = self.pull_byte(bus);
        u16::from_le_bytes([low, high])
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Load PC from the reset vector, return every register to its power-up
    /// value and zero memory.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        let pc = bus.read_word(RESET_VECTOR);
        self.regs = Registers { pc, ..Registers::new() };
        self.cycles = 0;
        bus.clear();
    }

    /// Execute one instruction and return the cycles it took.
    ///
    /// An undefined opcode leaves every register, PC included, as it was
    /// before the call.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, StepError> {
        let pc = self.regs.pc;
        let opcode = self.fetch(bus);

        let OpcodeEntry::Defined {
            mnemonic,
            mode,
            cycles: base,
        } = decode(opcode)
        else {
            self.regs.pc = pc;
            warn!(pc = format_args!("${pc:04X}"), "undefined opcode ${opcode:02X}");
            return Err(StepError::UndefinedOpcode { opcode, pc });
        };

        let resolved = self.resolve(bus, mode);
        let mut cycles = u32::from(base) + u32::from(resolved.extra_cycles);
        self.execute(bus, mnemonic, resolved.address, &mut cycles);
        self.cycles += u64::from(cycles);

        trace!(
            pc = format_args!("${pc:04X}"),
            opcode = format_args!("${opcode:02X}"),
            %mnemonic,
            cycles,
            "step"
        );
        Ok(cycles)
    }

    /// Decode the instruction at PC without executing it or moving PC.
    pub fn peek_instruction<B: Bus>(&self, bus: &mut B) -> Fetched {
        let pc = self.regs.pc;
        let entry = decode(bus.read(pc));
        let len = entry.length().unwrap_or(1);
        let mut raw = [0; 3];
        for (offset, byte) in (0..u16::from(len)).zip(raw.iter_mut()) {
            *byte = bus.read(pc.wrapping_add(offset));
        }
        Fetched { pc, entry, raw, len }
    }
}

impl Cpu for Mos6502 {
    type Registers = Registers;
    type Error = StepError;

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, StepError> {
        Mos6502::step(self, bus)
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        Mos6502::reset(self, bus);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }
}

const QUERY_PATHS: &[&str] = &[
    "pc", "a", "x", "y", "sp", "p", "flags.c", "flags.z", "flags.i", "flags.d", "flags.b",
    "flags.v", "flags.n", "cycles",
];

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        let p = &self.regs.p;
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "sp" => Some(self.regs.sp.into()),
            "p" => Some(p.to_byte().into()),
            "flags.c" => Some(p.carry.into()),
            "flags.z" => Some(p.zero.into()),
            "flags.i" => Some(p.interrupt_disable.into()),
            "flags.d" => Some(p.decimal.into()),
            "flags.b" => Some(p.brk.into()),
            "flags.v" => Some(p.overflow.into()),
            "flags.n" => Some(p.negative.into()),
            "cycles" => Some(self.cycles.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
