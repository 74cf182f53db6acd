//! Branches, jumps, subroutine calls and the software interrupt.

use emu_core::Bus;

use crate::Mos6502;
use crate::addressing::page_crossed;
use crate::cpu::BRK_VECTOR;

impl Mos6502 {
    /// Shared by all eight conditional branches. A taken branch costs one
    /// cycle, plus one more if the target is in a different page from the
    /// next instruction.
    pub(super) fn branch(&mut self, condition: bool, target: Option<u16>, cycles: &mut u32) {
        let Some(target) = target else { return };
        if !condition {
            return;
        }
        *cycles += 1;
        if page_crossed(self.regs.pc, target) {
            *cycles += 1;
        }
        self.regs.pc = target;
    }

    pub(super) fn jmp(&mut self, target: Option<u16>) {
        if let Some(target) = target {
            self.regs.pc = target;
        }
    }

    /// JSR - push the address of the last operand byte, then jump.
    pub(super) fn jsr<B: Bus>(&mut self, bus: &mut B, target: Option<u16>) {
        let Some(target) = target else { return };
        self.push_word(bus, self.regs.pc.wrapping_sub(1));
        self.regs.pc = target;
    }

    pub(super) fn rts<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pull_word(bus).wrapping_add(1);
    }

    /// BRK - push PC + 2 and status with B set, then vector through $FFFE.
    pub(super) fn brk<B: Bus>(&mut self, bus: &mut B) {
        self.push_word(bus, self.regs.pc.wrapping_add(2));
        self.push_byte(bus, self.regs.p.to_byte_with_break());
        self.regs.p.interrupt_disable = true;
        self.regs.pc = bus.read_word(BRK_VECTOR);
    }

    /// RTI - status first, then PC. B is not restored.
    pub(super) fn rti<B: Bus>(&mut self, bus: &mut B) {
        let status = self.pull_byte(bus);
        self.regs.p.set_from_byte(status);
        self.regs.pc = self.pull_word(bus);
    }
}
