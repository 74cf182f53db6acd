//! Loads, arithmetic, logic and comparison.
//!
//! ADC and SBC always work in binary. The decimal flag is carried in the
//! status register but this CPU variant ignores it here.

use emu_core::Bus;

use crate::Mos6502;

impl Mos6502 {
    pub(super) fn lda<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.regs.a = self.read_operand(bus, address);
        self.regs.p.update_nz(self.regs.a);
    }

    pub(super) fn ldx<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.regs.x = self.read_operand(bus, address);
        self.regs.p.update_nz(self.regs.x);
    }

    /// ADC - Add with Carry
    pub(super) fn adc<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        let value = self.read_operand(bus, address);
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(value) + u16::from(self.regs.p.carry);
        let result = sum as u8;

        self.regs.p.carry = sum > 0xFF;
        // Both inputs share a sign the result does not have.
        self.regs.p.overflow = (a ^ result) & (value ^ result) & 0x80 != 0;
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    /// SBC - Subtract with Borrow. Carry clear means borrow.
    pub(super) fn sbc<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        let value = self.read_operand(bus, address);
        let a = self.regs.a;
        let borrow = u16::from(!self.regs.p.carry);
        let diff = u16::from(a).wrapping_sub(u16::from(value)).wrapping_sub(borrow);
        let result = diff as u8;

        self.regs.p.carry = diff < 0x100;
        self.regs.p.overflow = (a ^ value) & (a ^ result) & 0x80 != 0;
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    pub(super) fn and<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.regs.a &= self.read_operand(bus, address);
        self.regs.p.update_nz(self.regs.a);
    }

    pub(super) fn ora<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.regs.a |= self.read_operand(bus, address);
        self.regs.p.update_nz(self.regs.a);
    }

    pub(super) fn eor<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        self.regs.a ^= self.read_operand(bus, address);
        self.regs.p.update_nz(self.regs.a);
    }

    pub(super) fn cmp<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        let value = self.read_operand(bus, address);
        self.compare(self.regs.a, value);
    }

    /// Register minus value: C is an unsigned `>=`, N and Z come from the
    /// difference.
    pub(super) fn compare(&mut self, register: u8, value: u8) {
        self.regs.p.carry = register >= value;
        self.regs.p.update_nz(register.wrapping_sub(value));
    }

    /// BIT - N and V are copied from the operand, Z from A AND operand.
    pub(super) fn bit<B: Bus>(&mut self, bus: &mut B, address: Option<u16>) {
        let value = self.read_operand(bus, address);
        self.regs.p.zero = self.regs.a & value == 0;
        self.regs.p.negative = value & 0x80 != 0;
        self.regs.p.overflow = value & 0x40 != 0;
    }
}
