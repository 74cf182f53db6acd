//! Undocumented opcodes.
//!
//! Each one runs two documented operations back to back on the same
//! effective address. Flags are whatever the second operation leaves.
//! USBC (opcode $EB) is dispatched straight to SBC.

use emu_core::Bus;

use crate::Mos6502;

impl Mos6502 {
    /// DCP - DEC then CMP
    pub(super) fn dcp<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.dec(bus, address);
        self.cmp(bus, address);
    }

    /// ISB - INC then SBC
    pub(super) fn isb<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.inc(bus, address);
        self.sbc(bus, address);
    }

    /// LAX - LDA then LDX
    pub(super) fn lax<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.lda(bus, address);
        self.ldx(bus, address);
    }

    /// RLA - ROL then AND
    pub(super) fn rla<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.rol(bus, address);
        self.and(bus, address);
    }

    /// RRA - ROR then ADC
    pub(super) fn rra<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.ror(bus, address);
        self.adc(bus, address);
    }

    /// SAX - store A AND X. No flags.
    pub(super) fn sax<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.write_operand(bus, address, self.regs.a & self.regs.x);
    }

    /// SLO - ASL then ORA
    pub(super) fn slo<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.asl(bus, address);
        self.ora(bus, address);
    }

    /// SRE - LSR then EOR
    pub(super) fn sre<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.lsr(bus, address);
        self.eor(bus, address);
    }
}
