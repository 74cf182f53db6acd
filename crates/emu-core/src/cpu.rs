//! CPU core trait.

use crate::Bus;

/// A CPU that executes whole instructions.
///
/// The bus is passed in, not owned, so the harness keeps control of memory
/// between steps. Each `step` runs exactly one instruction to completion;
/// there is no partially executed state to observe or resume.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Raised when an instruction cannot be executed.
    type Error;

    /// Execute one instruction. Returns the cycles it consumed.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Self::Error>;

    /// Put the CPU in its power-up state, reading whatever vectors it needs
    /// from the bus.
    fn reset<B: Bus>(&mut self, bus: &mut B);

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;
}
