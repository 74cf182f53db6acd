//! MOS 6502 CPU emulator, stepped one instruction at a time.
//!
//! This implements the NMOS 6502 instruction set together with the stable
//! undocumented ("illegal") opcodes. Each call to [`Mos6502::step`] runs a
//! whole instruction against a borrowed [`emu_core::Bus`] and returns the
//! exact number of cycles it took, page-crossing and branch penalties
//! included.
//!
//! # Illegal Opcodes
//!
//! Implemented as the composition of two documented operations on the same
//! address:
//! - LAX, SAX, DCP, ISB
//! - SLO, SRE, RLA, RRA
//! - USBC ($EB), an alternate encoding of SBC immediate
//!
//! The unstable opcodes (ANC, ALR, ARR, SBX, SHA and friends) and the
//! opcodes that lock up the processor are undefined; `step` reports them
//! as [`StepError::UndefinedOpcode`].
//!
//! # Non-features
//!
//! No IRQ or NMI lines, and no BCD arithmetic: the decimal flag is stored
//! but ADC and SBC ignore it.

mod addressing;
mod cpu;
pub mod flags;
mod instructions;
mod opcodes;
mod registers;

pub use addressing::{AddressingMode, Resolved, page_crossed};
pub use cpu::{BRK_VECTOR, Fetched, Mos6502, RESET_VECTOR, StepError};
pub use flags::Status;
pub use opcodes::{Mnemonic, OPCODE_TABLE, OpcodeEntry, decode};
pub use registers::{Registers, STACK_PAGE};
