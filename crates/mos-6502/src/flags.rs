//! 6502 processor status register (P).
//!
//! The flags live as individual booleans and are only packed into the
//! hardware byte layout at the boundary: stack pushes and pulls, and
//! external inspection.
//!
//! ```text
//! bit  7 6 5 4 3 2 1 0
//!      N V 1 B D I Z C
//! ```

/// Carry flag - set if operation resulted in carry/borrow.
pub const C: u8 = 0x01;

/// Zero flag - set if result is zero.
pub const Z: u8 = 0x02;

/// Interrupt disable.
pub const I: u8 = 0x04;

/// Decimal mode. Tracked, but this variant does no BCD arithmetic.
pub const D: u8 = 0x08;

/// Break - only meaningful in a byte pushed to the stack.
pub const B: u8 = 0x10;

/// Unused bit - always reads as 1.
pub const U: u8 = 0x20;

/// Overflow flag - set if signed arithmetic overflowed.
pub const V: u8 = 0x40;

/// Negative flag - set if result has bit 7 set.
pub const N: u8 = 0x80;

/// Processor status flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub carry: bool,
    pub zero: bool,
    pub interrupt_disable: bool,
    pub decimal: bool,
    /// Break. Never restored from a pulled byte; see [`Status::set_from_byte`].
    pub brk: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl Status {
    /// Unpack a status byte. B and the unused bit are ignored.
    #[must_use]
    pub const fn from_byte(value: u8) -> Self {
        Self {
            carry: value & C != 0,
            zero: value & Z != 0,
            interrupt_disable: value & I != 0,
            decimal: value & D != 0,
            brk: false,
            overflow: value & V != 0,
            negative: value & N != 0,
        }
    }

    /// Pack the flags as N V 1 B D I Z C.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        let mut p = U;
        if self.negative {
            p |= N;
        }
        if self.overflow {
            p |= V;
        }
        if self.brk {
            p |= B;
        }
        if self.decimal {
            p |= D;
        }
        if self.interrupt_disable {
            p |= I;
        }
        if self.zero {
            p |= Z;
        }
        if self.carry {
            p |= C;
        }
        p
    }

    /// Byte pushed by BRK and PHP: B forced to 1 for this push only.
    #[must_use]
    pub const fn to_byte_with_break(self) -> u8 {
        self.to_byte() | B
    }

    /// Restore C, Z, I, D, V and N from a pulled byte. B keeps its value.
    pub fn set_from_byte(&mut self, value: u8) {
        let brk = self.brk;
        *self = Self::from_byte(value);
        self.brk = brk;
    }

    /// Update N and Z flags based on a value.
    pub fn update_nz(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = value & 0x80 != 0;
    }
}
