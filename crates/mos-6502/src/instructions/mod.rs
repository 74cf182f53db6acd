//! Instruction handlers.
//!
//! Every handler receives the effective address produced by the resolver.
//! `None` means the instruction's operand is the accumulator (shifts and
//! rotates in accumulator mode) or that it has no operand at all. Only
//! branches add cycles on top of the table count.

mod alu;
mod control;
mod illegal;
mod rmw;

use emu_core::Bus;

use crate::{Mnemonic, Mos6502};

impl Mos6502 {
    /// Operand value: memory at `address`, or the accumulator.
    fn read_operand<B: Bus>(&self, bus: &mut B, address: Option<u16>) -> u8 {
        match address {
            Some(address) => bus.read(address),
            None => self.regs.a,
        }
    }

    fn write_operand<B: Bus>(&mut self, bus: &mut B, address: Option<u16>, value: u8) {
        match address {
            Some(address) => bus.write(address, value),
            None => self.regs.a = value,
        }
    }

    /// Run the handler for `mnemonic`. Branch penalties are added to `cycles`.
    pub(crate) fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        mnemonic: Mnemonic,
        address: Option<u16>,
        cycles: &mut u32,
    ) {
        match mnemonic {
            // =================================================================
            // Loads and stores
            // =================================================================
            Mnemonic::Lda => self.lda(bus, address),
            Mnemonic::Ldx => self.ldx(bus, address),
            Mnemonic::Ldy => {
                self.regs.y = self.read_operand(bus, address);
                self.regs.p.update_nz(self.regs.y);
            }
            Mnemonic::Sta => self.write_operand(bus, address, self.regs.a),
            Mnemonic::Stx => self.write_operand(bus, address, self.regs.x),
            Mnemonic::Sty => self.write_operand(bus, address, self.regs.y),

            // =================================================================
            // Arithmetic and logic
            // =================================================================
            Mnemonic::Adc => self.adc(bus, address),
            Mnemonic::Sbc => self.sbc(bus, address),
            Mnemonic::And => self.and(bus, address),
            Mnemonic::Ora => self.ora(bus, address),
            Mnemonic::Eor => self.eor(bus, address),
            Mnemonic::Cmp => self.cmp(bus, address),
            Mnemonic::Cpx => {
                let value = self.read_operand(bus, address);
                self.compare(self.regs.x, value);
            }
            Mnemonic::Cpy => {
                let value = self.read_operand(bus, address);
                self.compare(self.regs.y, value);
            }
            Mnemonic::Bit => self.bit(bus, address),

            // =================================================================
            // Read-modify-write
            // =================================================================
            Mnemonic::Asl => self.asl(bus, address),
            Mnemonic::Lsr => self.lsr(bus, address),
            Mnemonic::Rol => self.rol(bus, address),
            Mnemonic::Ror => self.ror(bus, address),
            Mnemonic::Inc => self.inc(bus, address),
            Mnemonic::Dec => self.dec(bus, address),

            // =================================================================
            // Register increment/decrement and transfers
            // =================================================================
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
            }
            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
            }
            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.sp;
                self.regs.p.update_nz(self.regs.x);
            }
            // TXS does not touch flags
            Mnemonic::Txs => self.regs.sp = self.regs.x,

            // =================================================================
            // Stack
            // =================================================================
            Mnemonic::Pha => self.push_byte(bus, self.regs.a),
            Mnemonic::Php => self.push_byte(bus, self.regs.p.to_byte_with_break()),
            Mnemonic::Pla => {
                self.regs.a = self.pull_byte(bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Mnemonic::Plp => {
                let value = self.pull_byte(bus);
                self.regs.p.set_from_byte(value);
            }

            // =================================================================
            // Flags
            // =================================================================
            Mnemonic::Clc => self.regs.p.carry = false,
            Mnemonic::Sec => self.regs.p.carry = true,
            Mnemonic::Cli => self.regs.p.interrupt_disable = false,
            Mnemonic::Sei => self.regs.p.interrupt_disable = true,
            Mnemonic::Cld => self.regs.p.decimal = false,
            Mnemonic::Sed => self.regs.p.decimal = true,
            Mnemonic::Clv => self.regs.p.overflow = false,

            // =================================================================
            // Branches, jumps, subroutines and interrupts
            // =================================================================
            Mnemonic::Bcc => self.branch(!self.regs.p.carry, address, cycles),
            Mnemonic::Bcs => self.branch(self.regs.p.carry, address, cycles),
            Mnemonic::Bne => self.branch(!self.regs.p.zero, address, cycles),
            Mnemonic::Beq => self.branch(self.regs.p.zero, address, cycles),
            Mnemonic::Bpl => self.branch(!self.regs.p.negative, address, cycles),
            Mnemonic::Bmi => self.branch(self.regs.p.negative, address, cycles),
            Mnemonic::Bvc => self.branch(!self.regs.p.overflow, address, cycles),
            Mnemonic::Bvs => self.branch(self.regs.p.overflow, address, cycles),
            Mnemonic::Jmp => self.jmp(address),
            Mnemonic::Jsr => self.jsr(bus, address),
            Mnemonic::Rts => self.rts(bus),
            Mnemonic::Brk => self.brk(bus),
            Mnemonic::Rti => self.rti(bus),

            // Operand bytes and cycles are already consumed.
            Mnemonic::Nop => {}

            // =================================================================
            // Undocumented
            // =================================================================
            Mnemonic::Dcp => self.dcp(bus, address),
            Mnemonic::Isb => self.isb(bus, address),
            Mnemonic::Lax => self.lax(bus, address),
            Mnemonic::Rla => self.rla(bus, address),
            Mnemonic::Rra => self.rra(bus, address),
            Mnemonic::Sax => self.sax(bus, address),
            Mnemonic::Slo => self.slo(bus, address),
            Mnemonic::Sre => self.sre(bus, address),
            Mnemonic::Usbc => self.sbc(bus, address),
        }
    }
}
