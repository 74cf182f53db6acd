//! 6502 CPU registers.

use crate::Status;

/// Base of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// 6502 CPU register set.
///
/// - A: 8-bit accumulator
/// - X, Y: 8-bit index registers
/// - SP: 8-bit stack pointer (stack is at $0100-$01FF)
/// - PC: 16-bit program counter
/// - P: processor status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer (points to next free location).
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create registers in the documented post-reset state: SP = $FD, I set,
    /// everything else clear. PC is loaded from the reset vector separately.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            p: Status {
                carry: false,
                zero: false,
                interrupt_disable: true,
                decimal: false,
                brk: false,
                overflow: false,
                negative: false,
            },
        }
    }

    /// Claim a stack slot for a push: returns the address to write, then
    /// decrements SP (wrapping within the stack page).
    pub fn push(&mut self) -> u16 {
        let addr = self.stack_addr();
        self.sp = self.sp.wrapping_sub(1);
        addr
    }

    /// Release a stack slot for a pull: increments SP, then returns the
    /// address to read.
    pub fn pop(&mut self) -> u16 {
        self.sp = self.sp.wrapping_add(1);
        self.stack_addr()
    }

    /// Get the current stack address without modifying SP.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        STACK_PAGE | (self.sp as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_pointer_wraps_inside_page_one() {
        let mut regs = Registers::new();
        regs.sp = 0x00;
        assert_eq!(regs.push(), 0x0100);
        assert_eq!(regs.sp, 0xFF);
        assert_eq!(regs.stack_addr(), 0x01FF);

        assert_eq!(regs.pop(), 0x0100);
        assert_eq!(regs.sp, 0x00);
    }
}
