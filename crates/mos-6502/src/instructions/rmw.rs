//! Shifts, rotates and memory increment/decrement.
//!
//! These read the operand, modify it and write it back. With no address
//! the accumulator is the operand.

use emu_core::Bus;

use crate::Mos6502;

impl Mos6502 {
    fn modify<B: Bus>(
        &mut self,
        bus: &mut B,
        address: Option<u16>,
        f: impl FnOnce(&mut Self, u8) -> u8,
    ) {
        let value = self.read_operand(bus, address);
        let result = f(self, value);
        self.write_operand(bus, address, result);
        self.regs.p.update_nz(result);
    }

    pub(super) fn asl<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.modify(bus, address, |cpu, value| {
            cpu.regs.p.carry = value & 0x80 != 0;
            value << 1
        });
    }

    pub(super) fn lsr<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.modify(bus, address, |cpu, value| {
            cpu.regs.p.carry = value & 0x01 != 0;
            value >> 1
        });
    }

    pub(super) fn rol<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.modify(bus, address, |cpu, value| {
            let carry_in = u8::from(cpu.regs.p.carry);
            cpu.regs.p.carry = value & 0x80 != 0;
            (value << 1) | carry_in
        });
    }

    pub(super) fn ror<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.modify(bus, address, |cpu, value| {
            let carry_in = u8::from(cpu.regs.p.carry) << 7;
            cpu.regs.p.carry = value & 0x01 != 0;
            (value >> 1) | carry_in
        });
    }

    pub(super) fn inc<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.modify(bus, address, |_, value| value.wrapping_add(1));
    }

    pub(super) fn dec<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.modify(bus, address, |_, value| value.wrapping_sub(1));
    }
}
