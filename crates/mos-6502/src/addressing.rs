//! 6502 addressing modes and the effective-address resolver.
//!
//! Resolving a mode consumes the operand bytes after the opcode (advancing
//! PC) and yields the effective address, or `None` when the instruction
//! works on a register instead of memory. Some indexed modes cost one extra
//! cycle when the index carries into the next page; the resolver reports it
//! so the dispatcher can add it to the table's base count.

use emu_core::Bus;

use crate::Mos6502;

/// How an instruction finds its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand (CLC, RTS, TAX ...).
    Implied,
    /// Operand is the accumulator itself (ASL A).
    Accumulator,
    /// $nnnn
    Absolute,
    /// $nnnn,X - one extra cycle on page crossing.
    AbsoluteX,
    /// $nnnn,Y - one extra cycle on page crossing.
    AbsoluteY,
    /// #$nn - the operand byte is read in place.
    Immediate,
    /// ($nnnn) with a normal 16-bit pointer increment.
    Indirect,
    /// ($nn,X) - pointer in zero page, indexed before dereferencing.
    IndexedIndirect,
    /// ($nn),Y - zero-page pointer, Y added after; extra cycle on page crossing.
    IndirectIndexed,
    /// Signed branch offset relative to the following instruction.
    Relative,
    /// $nn
    ZeroPage,
    /// $nn,X - wraps within zero page.
    ZeroPageX,
    /// $nn,Y - wraps within zero page.
    ZeroPageY,
    /// JMP ($nnnn) with the NMOS page-wrap bug on the pointer's high byte.
    JumpIndirect,
    /// $nnnn,X for stores and read-modify-write: never adds a cycle.
    AbsoluteXFixed,
    /// $nnnn,Y for stores and read-modify-write: never adds a cycle.
    AbsoluteYFixed,
    /// ($nn),Y for stores and read-modify-write: never adds a cycle.
    IndirectIndexedFixed,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_bytes(self) -> u8 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::IndexedIndirect
            | Self::IndirectIndexed
            | Self::IndirectIndexedFixed
            | Self::Relative
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY => 1,
            Self::Absolute
            | Self::AbsoluteX
            | Self::AbsoluteY
            | Self::AbsoluteXFixed
            | Self::AbsoluteYFixed
            | Self::Indirect
            | Self::JumpIndirect => 2,
        }
    }
}

/// Outcome of resolving an addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// Effective address, or `None` for implied and accumulator modes.
    pub address: Option<u16>,
    /// Cycles to add to the opcode's base count.
    pub extra_cycles: u8,
}

impl Resolved {
    const fn at(address: u16) -> Self {
        Self {
            address: Some(address),
            extra_cycles: 0,
        }
    }

    const fn indexed(base: u16, address: u16) -> Self {
        Self {
            address: Some(address),
            extra_cycles: page_crossed(base, address) as u8,
        }
    }
}

/// True when two addresses lie in different 256-byte pages.
#[must_use]
pub const fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl Mos6502 {
    /// Fetch the next byte at PC and increment PC.
    pub(crate) fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit word (little-endian) at PC.
    pub(crate) fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = self.fetch(bus);
        let high = self.fetch(bus);
        u16::from_le_bytes([low, high])
    }

    /// Read a pointer stored in zero page. The high byte wraps from $FF to $00.
    fn read_zero_page_word<B: Bus>(bus: &mut B, pointer: u8) -> u16 {
        let low = bus.read(u16::from(pointer));
        let high = bus.read(u16::from(pointer.wrapping_add(1)));
        u16::from_le_bytes([low, high])
    }

    /// Compute the effective address for `mode`, consuming operand bytes.
    pub fn resolve<B: Bus>(&mut self, bus: &mut B, mode: AddressingMode) -> Resolved {
        match mode {
            AddressingMode::Implied | AddressingMode::Accumulator => Resolved {
                address: None,
                extra_cycles: 0,
            },
            AddressingMode::Absolute => Resolved::at(self.fetch_word(bus)),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(bus);
                Resolved::indexed(base, base.wrapping_add(u16::from(self.regs.x)))
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(bus);
                Resolved::indexed(base, base.wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::AbsoluteXFixed => {
                let base = self.fetch_word(bus);
                Resolved::at(base.wrapping_add(u16::from(self.regs.x)))
            }
            AddressingMode::AbsoluteYFixed => {
                let base = self.fetch_word(bus);
                Resolved::at(base.wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::Immediate => {
                let address = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                Resolved::at(address)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word(bus);
                Resolved::at(bus.read_word(pointer))
            }
            AddressingMode::JumpIndirect => {
                let pointer = self.fetch_word(bus);
                let low = bus.read(pointer);
                // High byte comes from the same page: ($10FF) reads $10FF/$1000.
                let high = bus.read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
                Resolved::at(u16::from_le_bytes([low, high]))
            }
            AddressingMode::IndexedIndirect => {
                let pointer = self.fetch(bus).wrapping_add(self.regs.x);
                Resolved::at(Self::read_zero_page_word(bus, pointer))
            }
            AddressingMode::IndirectIndexed => {
                let pointer = self.fetch(bus);
                let base = Self::read_zero_page_word(bus, pointer);
                Resolved::indexed(base, base.wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::IndirectIndexedFixed => {
                let pointer = self.fetch(bus);
                let base = Self::read_zero_page_word(bus, pointer);
                Resolved::at(base.wrapping_add(u16::from(self.regs.y)))
            }
            AddressingMode::Relative => {
                let offset = self.fetch(bus) as i8;
                Resolved::at(self.regs.pc.wrapping_add_signed(i16::from(offset)))
            }
            AddressingMode::ZeroPage => Resolved::at(u16::from(self.fetch(bus))),
            AddressingMode::ZeroPageX => {
                Resolved::at(u16::from(self.fetch(bus).wrapping_add(self.regs.x)))
            }
            AddressingMode::ZeroPageY => {
                Resolved::at(u16::from(self.fetch(bus).wrapping_add(self.regs.y)))
            }
        }
    }
}
