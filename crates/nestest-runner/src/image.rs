//! Program image loaders.
//!
//! iNES files (the format nestest ships in) have their PRG-ROM copied to
//! $8000. A single 16 KiB bank is mirrored at $C000, the way NROM-128
//! cartridges appear to the CPU. Raw images are copied verbatim.

use emu_core::{Memory, MemoryError};
use thiserror::Error;

const MAGIC: &[u8; 4] = b"NES\x1A";
const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_BANK_LEN: usize = 0x4000;

/// PRG-ROM base address.
pub const PRG_BASE: u16 = 0x8000;
/// Upper bank address, where a single 16 KiB bank is mirrored.
pub const PRG_MIRROR: u16 = 0xC000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("file is {0} bytes, too short for an iNES header")]
    TruncatedHeader(usize),

    #[error("not an iNES image (bad magic)")]
    BadMagic,

    #[error("image has no PRG-ROM")]
    NoPrg,

    #[error("{banks} PRG-ROM banks do not fit in $8000-$FFFF")]
    PrgTooLarge { banks: u8 },

    #[error("file is {actual} bytes, header declares {expected}")]
    ShortFile { expected: usize, actual: usize },

    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Validate an iNES header and return the PRG-ROM bytes.
pub fn prg_rom(data: &[u8]) -> Result<&[u8], ImageError> {
    if data.len() < HEADER_LEN {
        return Err(ImageError::TruncatedHeader(data.len()));
    }
    if &data[..4] != MAGIC {
        return Err(ImageError::BadMagic);
    }

    let banks = data[4];
    match banks {
        0 => return Err(ImageError::NoPrg),
        1 | 2 => {}
        _ => return Err(ImageError::PrgTooLarge { banks }),
    }

    let has_trainer = data[6] & 0x04 != 0;
    let start = HEADER_LEN + if has_trainer { TRAINER_LEN } else { 0 };
    let end = start + usize::from(banks) * PRG_BANK_LEN;
    data.get(start..end).ok_or(ImageError::ShortFile {
        expected: end,
        actual: data.len(),
    })
}

/// Copy an iNES image's PRG-ROM into memory.
pub fn load_ines(mem: &mut Memory, data: &[u8]) -> Result<(), ImageError> {
    let prg = prg_rom(data)?;
    mem.load(PRG_BASE, prg)?;
    if prg.len() == PRG_BANK_LEN {
        mem.load(PRG_MIRROR, prg)?;
    }
    Ok(())
}

/// Copy a raw image into memory at `address`.
pub fn load_raw(mem: &mut Memory, address: u16, data: &[u8]) -> Result<(), ImageError> {
    mem.load(address, data)?;
    Ok(())
}
