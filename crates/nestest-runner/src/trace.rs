//! nestest-style trace lines and reference log comparison.
//!
//! A line records the state *before* an instruction executes:
//!
//! ```text
//! C000  4C F5 C5  JMP                             A:00 X:00 Y:00 P:24 SP:FD CYC:7
//! ```
//!
//! Undocumented instructions get a `*` in front of the mnemonic, as in the
//! reference log. Operands are not disassembled.

use std::fmt;

use emu_core::Ticks;
use mos_6502::{Fetched, Mos6502, OpcodeEntry};
use thiserror::Error;

/// Register state at an instruction boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    pub cycles: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing {0} field")]
    Missing(&'static str),

    #[error("bad {field} value {text:?}")]
    BadValue { field: &'static str, text: String },
}

impl Snapshot {
    #[must_use]
    pub fn capture(cpu: &Mos6502, cycles: Ticks) -> Self {
        Self {
            pc: cpu.pc(),
            a: cpu.a(),
            x: cpu.x(),
            y: cpu.y(),
            p: cpu.status(),
            sp: cpu.sp(),
            cycles: cycles.get(),
        }
    }

    /// Parse the register fields out of a reference log line. Anything else
    /// on the line (disassembly, PPU position) is ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let pc_text = line.get(..4).ok_or(ParseError::Missing("PC"))?;
        let pc = u16::from_str_radix(pc_text, 16).map_err(|_| ParseError::BadValue {
            field: "PC",
            text: pc_text.to_string(),
        })?;

        Ok(Self {
            pc,
            a: hex_field(line, "A")?,
            x: hex_field(line, "X")?,
            y: hex_field(line, "Y")?,
            p: hex_field(line, "P")?,
            sp: hex_field(line, "SP")?,
            cycles: {
                let text = field(line, "CYC")?;
                text.parse().map_err(|_| ParseError::BadValue {
                    field: "CYC",
                    text: text.to_string(),
                })?
            },
        })
    }

    /// Human-readable differences, empty when the two agree.
    #[must_use]
    pub fn diff(&self, actual: &Self) -> Vec<String> {
        let mut out = Vec::new();
        if self.pc != actual.pc {
            out.push(format!("PC: want {:04X}, got {:04X}", self.pc, actual.pc));
        }
        let regs = [
            ("A", self.a, actual.a),
            ("X", self.x, actual.x),
            ("Y", self.y, actual.y),
            ("P", self.p, actual.p),
            ("SP", self.sp, actual.sp),
        ];
        for (name, want, got) in regs {
            if want != got {
                out.push(format!("{name}: want {want:02X}, got {got:02X}"));
            }
        }
        if self.cycles != actual.cycles {
            out.push(format!("CYC: want {}, got {}", self.cycles, actual.cycles));
        }
        out
    }
}

/// Value of a `NAME:value` token. `NAME:` must start a whitespace-separated
/// token so `SP:` is not mistaken for `P:`.
fn field<'a>(line: &'a str, name: &'static str) -> Result<&'a str, ParseError> {
    line.split_whitespace()
        .find_map(|token| token.strip_prefix(name)?.strip_prefix(':'))
        .ok_or(ParseError::Missing(name))
}

fn hex_field(line: &str, name: &'static str) -> Result<u8, ParseError> {
    let text = field(line, name)?;
    u8::from_str_radix(text, 16).map_err(|_| ParseError::BadValue {
        field: name,
        text: text.to_string(),
    })
}

/// One formatted trace line.
pub struct TraceLine<'a> {
    pub fetched: &'a Fetched,
    pub state: &'a Snapshot,
}

impl fmt::Display for TraceLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self
            .fetched
            .bytes()
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        let (marker, name) = match self.fetched.entry {
            OpcodeEntry::Defined { mnemonic, .. } => {
                (if mnemonic.is_illegal() { '*' } else { ' ' }, mnemonic.name())
            }
            OpcodeEntry::Undefined => ('*', "???"),
        };
        let s = self.state;
        write!(
            f,
            "{:04X}  {bytes:<8} {marker}{name:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            s.pc, s.a, s.x, s.y, s.p, s.sp, s.cycles
        )
    }
}
