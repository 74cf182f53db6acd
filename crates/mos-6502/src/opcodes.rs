//! Opcode decode table.
//!
//! Every one of the 256 opcode bytes maps to either a defined instruction
//! (mnemonic, addressing mode, base cycle count) or `Undefined`. The table
//! covers the documented NMOS set plus the stable undocumented opcodes;
//! the unstable and jamming ones are left undefined.

use std::fmt;

use crate::AddressingMode;
use crate::AddressingMode as M;
use self::Mnemonic as I;

/// Instruction mnemonics, documented first, then the undocumented ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented
    Dcp,
    Isb,
    Lax,
    Rla,
    Rra,
    Sax,
    Slo,
    Sre,
    Usbc,
}

impl Mnemonic {
    /// Upper-case assembler name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Dcp => "DCP",
            Self::Isb => "ISB",
            Self::Lax => "LAX",
            Self::Rla => "RLA",
            Self::Rra => "RRA",
            Self::Sax => "SAX",
            Self::Slo => "SLO",
            Self::Sre => "SRE",
            Self::Usbc => "USBC",
        }
    }

    /// True for undocumented instructions. The extra NOP encodings share the
    /// documented `Nop` mnemonic and are not flagged.
    #[must_use]
    pub const fn is_illegal(self) -> bool {
        matches!(
            self,
            Self::Dcp
                | Self::Isb
                | Self::Lax
                | Self::Rla
                | Self::Rra
                | Self::Sax
                | Self::Slo
                | Self::Sre
                | Self::Usbc
        )
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot in the decode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeEntry {
    Defined {
        mnemonic: Mnemonic,
        mode: AddressingMode,
        /// Base cycles, before page-cross and branch penalties.
        cycles: u8,
    },
    Undefined,
}

impl OpcodeEntry {
    /// Instruction length in bytes, opcode included. `None` when undefined.
    #[must_use]
    pub const fn length(self) -> Option<u8> {
        match self {
            Self::Defined { mode, .. } => Some(1 + mode.operand_bytes()),
            Self::Undefined => None,
        }
    }
}

const fn op(mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> OpcodeEntry {
    OpcodeEntry::Defined {
        mnemonic,
        mode,
        cycles,
    }
}

const UNDEFINED: OpcodeEntry = OpcodeEntry::Undefined;

/// Decode table indexed by opcode byte.
pub static OPCODE_TABLE: [OpcodeEntry; 256] = [
    // $00-$0F
    op(I::Brk, M::Implied, 7),
    op(I::Ora, M::IndexedIndirect, 6),
    UNDEFINED,
    op(I::Slo, M::IndexedIndirect, 8),
    op(I::Nop, M::ZeroPage, 3),
    op(I::Ora, M::ZeroPage, 3),
    op(I::Asl, M::ZeroPage, 5),
    op(I::Slo, M::ZeroPage, 5),
    op(I::Php, M::Implied, 3),
    op(I::Ora, M::Immediate, 2),
    op(I::Asl, M::Accumulator, 2),
    UNDEFINED,
    op(I::Nop, M::Absolute, 4),
    op(I::Ora, M::Absolute, 4),
    op(I::Asl, M::Absolute, 6),
    op(I::Slo, M::Absolute, 6),
    // $10-$1F
    op(I::Bpl, M::Relative, 2),
    op(I::Ora, M::IndirectIndexed, 5),
    UNDEFINED,
    op(I::Slo, M::IndirectIndexedFixed, 8),
    op(I::Nop, M::ZeroPageX, 4),
    op(I::Ora, M::ZeroPageX, 4),
    op(I::Asl, M::ZeroPageX, 6),
    op(I::Slo, M::ZeroPageX, 6),
    op(I::Clc, M::Implied, 2),
    op(I::Ora, M::AbsoluteY, 4),
    op(I::Nop, M::Implied, 2),
    op(I::Slo, M::AbsoluteYFixed, 7),
    op(I::Nop, M::AbsoluteX, 4),
    op(I::Ora, M::AbsoluteX, 4),
    op(I::Asl, M::AbsoluteXFixed, 7),
    op(I::Slo, M::AbsoluteXFixed, 7),
    // $20-$2F
    op(I::Jsr, M::Absolute, 6),
    op(I::And, M::IndexedIndirect, 6),
    UNDEFINED,
    op(I::Rla, M::IndexedIndirect, 8),
    op(I::Bit, M::ZeroPage, 3),
    op(I::And, M::ZeroPage, 3),
    op(I::Rol, M::ZeroPage, 5),
    op(I::Rla, M::ZeroPage, 5),
    op(I::Plp, M::Implied, 4),
    op(I::And, M::Immediate, 2),
    op(I::Rol, M::Accumulator, 2),
    UNDEFINED,
    op(I::Bit, M::Absolute, 4),
    op(I::And, M::Absolute, 4),
    op(I::Rol, M::Absolute, 6),
    op(I::Rla, M::Absolute, 6),
    // $30-$3F
    op(I::Bmi, M::Relative, 2),
    op(I::And, M::IndirectIndexed, 5),
    UNDEFINED,
    op(I::Rla, M::IndirectIndexedFixed, 8),
    op(I::Nop, M::ZeroPageX, 4),
    op(I::And, M::ZeroPageX, 4),
    op(I::Rol, M::ZeroPageX, 6),
    op(I::Rla, M::ZeroPageX, 6),
    op(I::Sec, M::Implied, 2),
    op(I::And, M::AbsoluteY, 4),
    op(I::Nop, M::Implied, 2),
    op(I::Rla, M::AbsoluteYFixed, 7),
    op(I::Nop, M::AbsoluteX, 4),
    op(I::And, M::AbsoluteX, 4),
    op(I::Rol, M::AbsoluteXFixed, 7),
    op(I::Rla, M::AbsoluteXFixed, 7),
    // $40-$4F
    op(I::Rti, M::Implied, 6),
    op(I::Eor, M::IndexedIndirect, 6),
    UNDEFINED,
    op(I::Sre, M::IndexedIndirect, 8),
    op(I::Nop, M::ZeroPage, 3),
    op(I::Eor, M::ZeroPage, 3),
    op(I::Lsr, M::ZeroPage, 5),
    op(I::Sre, M::ZeroPage, 5),
    op(I::Pha, M::Implied, 3),
    op(I::Eor, M::Immediate, 2),
    op(I::Lsr, M::Accumulator, 2),
    UNDEFINED,
    op(I::Jmp, M::Absolute, 3),
    op(I::Eor, M::Absolute, 4),
    op(I::Lsr, M::Absolute, 6),
    op(I::Sre, M::Absolute, 6),
    // $50-$5F
    op(I::Bvc, M::Relative, 2),
    op(I::Eor, M::IndirectIndexed, 5),
    UNDEFINED,
    op(I::Sre, M::IndirectIndexedFixed, 8),
    op(I::Nop, M::ZeroPageX, 4),
    op(I::Eor, M::ZeroPageX, 4),
    op(I::Lsr, M::ZeroPageX, 6),
    op(I::Sre, M::ZeroPageX, 6),
    op(I::Cli, M::Implied, 2),
    op(I::Eor, M::AbsoluteY, 4),
    op(I::Nop, M::Implied, 2),
    op(I::Sre, M::AbsoluteYFixed, 7),
    op(I::Nop, M::AbsoluteX, 4),
    op(I::Eor, M::AbsoluteX, 4),
    op(I::Lsr, M::AbsoluteXFixed, 7),
    op(I::Sre, M::AbsoluteXFixed, 7),
    // $60-$6F
    op(I::Rts, M::Implied, 6),
    op(I::Adc, M::IndexedIndirect, 6),
    UNDEFINED,
    op(I::Rra, M::IndexedIndirect, 8),
    op(I::Nop, M::ZeroPage, 3),
    op(I::Adc, M::ZeroPage, 3),
    op(I::Ror, M::ZeroPage, 5),
    op(I::Rra, M::ZeroPage, 5),
    op(I::Pla, M::Implied, 4),
    op(I::Adc, M::Immediate, 2),
    op(I::Ror, M::Accumulator, 2),
    UNDEFINED,
    op(I::Jmp, M::JumpIndirect, 5),
    op(I::Adc, M::Absolute, 4),
    op(I::Ror, M::Absolute, 6),
    op(I::Rra, M::Absolute, 6),
    // $70-$7F
    op(I::Bvs, M::Relative, 2),
    op(I::Adc, M::IndirectIndexed, 5),
    UNDEFINED,
    op(I::Rra, M::IndirectIndexedFixed, 8),
    op(I::Nop, M::ZeroPageX, 4),
    op(I::Adc, M::ZeroPageX, 4),
    op(I::Ror, M::ZeroPageX, 6),
    op(I::Rra, M::ZeroPageX, 6),
    op(I::Sei, M::Implied, 2),
    op(I::Adc, M::AbsoluteY, 4),
    op(I::Nop, M::Implied, 2),
    op(I::Rra, M::AbsoluteYFixed, 7),
    op(I::Nop, M::AbsoluteX, 4),
    op(I::Adc, M::AbsoluteX, 4),
    op(I::Ror, M::AbsoluteXFixed, 7),
    op(I::Rra, M::AbsoluteXFixed, 7),
    // $80-$8F
    op(I::Nop, M::Immediate, 2),
    op(I::Sta, M::IndexedIndirect, 6),
    op(I::Nop, M::Immediate, 2),
    op(I::Sax, M::IndexedIndirect, 6),
    op(I::Sty, M::ZeroPage, 3),
    op(I::Sta, M::ZeroPage, 3),
    op(I::Stx, M::ZeroPage, 3),
    op(I::Sax, M::ZeroPage, 3),
    op(I::Dey, M::Implied, 2),
    op(I::Nop, M::Immediate, 2),
    op(I::Txa, M::Implied, 2),
    UNDEFINED,
    op(I::Sty, M::Absolute, 4),
    op(I::Sta, M::Absolute, 4),
    op(I::Stx, M::Absolute, 4),
    op(I::Sax, M::Absolute, 4),
    // $90-$9F
    op(I::Bcc, M::Relative, 2),
    op(I::Sta, M::IndirectIndexedFixed, 6),
    UNDEFINED,
    UNDEFINED,
    op(I::Sty, M::ZeroPageX, 4),
    op(I::Sta, M::ZeroPageX, 4),
    op(I::Stx, M::ZeroPageY, 4),
    op(I::Sax, M::ZeroPageY, 4),
    op(I::Tya, M::Implied, 2),
    op(I::Sta, M::AbsoluteYFixed, 5),
    op(I::Txs, M::Implied, 2),
    UNDEFINED,
    UNDEFINED,
    op(I::Sta, M::AbsoluteXFixed, 5),
    UNDEFINED,
    UNDEFINED,
    // $A0-$AF
    op(I::Ldy, M::Immediate, 2),
    op(I::Lda, M::IndexedIndirect, 6),
    op(I::Ldx, M::Immediate, 2),
    op(I::Lax, M::IndexedIndirect, 6),
    op(I::Ldy, M::ZeroPage, 3),
    op(I::Lda, M::ZeroPage, 3),
    op(I::Ldx, M::ZeroPage, 3),
    op(I::Lax, M::ZeroPage, 3),
    op(I::Tay, M::Implied, 2),
    op(I::Lda, M::Immediate, 2),
    op(I::Tax, M::Implied, 2),
    UNDEFINED,
    op(I::Ldy, M::Absolute, 4),
    op(I::Lda, M::Absolute, 4),
    op(I::Ldx, M::Absolute, 4),
    op(I::Lax, M::Absolute, 4),
    // $B0-$BF
    op(I::Bcs, M::Relative, 2),
    op(I::Lda, M::IndirectIndexed, 5),
    UNDEFINED,
    op(I::Lax, M::IndirectIndexed, 5),
    op(I::Ldy, M::ZeroPageX, 4),
    op(I::Lda, M::ZeroPageX, 4),
    op(I::Ldx, M::ZeroPageY, 4),
    op(I::Lax, M::ZeroPageY, 4),
    op(I::Clv, M::Implied, 2),
    op(I::Lda, M::AbsoluteY, 4),
    op(I::Tsx, M::Implied, 2),
    UNDEFINED,
    op(I::Ldy, M::AbsoluteX, 4),
    op(I::Lda, M::AbsoluteX, 4),
    op(I::Ldx, M::AbsoluteY, 4),
    op(I::Lax, M::AbsoluteY, 4),
    // $C0-$CF
    op(I::Cpy, M::Immediate, 2),
    op(I::Cmp, M::IndexedIndirect, 6),
    op(I::Nop, M::Immediate, 2),
    op(I::Dcp, M::IndexedIndirect, 8),
    op(I::Cpy, M::ZeroPage, 3),
    op(I::Cmp, M::ZeroPage, 3),
    op(I::Dec, M::ZeroPage, 5),
    op(I::Dcp, M::ZeroPage, 5),
    op(I::Iny, M::Implied, 2),
    op(I::Cmp, M::Immediate, 2),
    op(I::Dex, M::Implied, 2),
    UNDEFINED,
    op(I::Cpy, M::Absolute, 4),
    op(I::Cmp, M::Absolute, 4),
    op(I::Dec, M::Absolute, 6),
    op(I::Dcp, M::Absolute, 6),
    // $D0-$DF
    op(I::Bne, M::Relative, 2),
    op(I::Cmp, M::IndirectIndexed, 5),
    UNDEFINED,
    op(I::Dcp, M::IndirectIndexedFixed, 8),
    op(I::Nop, M::ZeroPageX, 4),
    op(I::Cmp, M::ZeroPageX, 4),
    op(I::Dec, M::ZeroPageX, 6),
    op(I::Dcp, M::ZeroPageX, 6),
    op(I::Cld, M::Implied, 2),
    op(I::Cmp, M::AbsoluteY, 4),
    op(I::Nop, M::Implied, 2),
    op(I::Dcp, M::AbsoluteYFixed, 7),
    op(I::Nop, M::AbsoluteX, 4),
    op(I::Cmp, M::AbsoluteX, 4),
    op(I::Dec, M::AbsoluteXFixed, 7),
    op(I::Dcp, M::AbsoluteXFixed, 7),
    // $E0-$EF
    op(I::Cpx, M::Immediate, 2),
    op(I::Sbc, M::IndexedIndirect, 6),
    op(I::Nop, M::Immediate, 2),
    op(I::Isb, M::IndexedIndirect, 8),
    op(I::Cpx, M::ZeroPage, 3),
    op(I::Sbc, M::ZeroPage, 3),
    op(I::Inc, M::ZeroPage, 5),
    op(I::Isb, M::ZeroPage, 5),
    op(I::Inx, M::Implied, 2),
    op(I::Sbc, M::Immediate, 2),
    op(I::Nop, M::Implied, 2),
    op(I::Usbc, M::Immediate, 2),
    op(I::Cpx, M::Absolute, 4),
    op(I::Sbc, M::Absolute, 4),
    op(I::Inc, M::Absolute, 6),
    op(I::Isb, M::Absolute, 6),
    // $F0-$FF
    op(I::Beq, M::Relative, 2),
    op(I::Sbc, M::IndirectIndexed, 5),
    UNDEFINED,
    op(I::Isb, M::IndirectIndexedFixed, 8),
    op(I::Nop, M::ZeroPageX, 4),
    op(I::Sbc, M::ZeroPageX, 4),
    op(I::Inc, M::ZeroPageX, 6),
    op(I::Isb, M::ZeroPageX, 6),
    op(I::Sed, M::Implied, 2),
    op(I::Sbc, M::AbsoluteY, 4),
    op(I::Nop, M::Implied, 2),
    op(I::Isb, M::AbsoluteYFixed, 7),
    op(I::Nop, M::AbsoluteX, 4),
    op(I::Sbc, M::AbsoluteX, 4),
    op(I::Inc, M::AbsoluteXFixed, 7),
    op(I::Isb, M::AbsoluteXFixed, 7),
];

/// Look up an opcode byte.
#[must_use]
pub fn decode(opcode: u8) -> OpcodeEntry {
    OPCODE_TABLE[usize::from(opcode)]
}
