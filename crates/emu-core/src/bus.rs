//! Memory bus interface and the flat 64 KiB memory behind it.

use thiserror::Error;

/// Number of distinct addresses reachable with a 16-bit address.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Memory bus interface.
///
/// Components access memory through this trait. Every address in the 16-bit
/// range is valid; there is no unmapped region and no access can fail.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);

    /// Return every writable location to zero.
    fn clear(&mut self);

    /// Read a little-endian word. The high byte comes from `address + 1`,
    /// wrapping from $FFFF to $0000.
    fn read_word(&mut self, address: u16) -> u16 {
        let low = self.read(address);
        let high = self.read(address.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Write a little-endian word, low byte at `address`.
    fn write_word(&mut self, address: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write(address, low);
        self.write(address.wrapping_add(1), high);
    }
}

/// Errors raised when placing data into memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The data would run past the top of the address space.
    #[error("{len} bytes at ${start:04X} run past $FFFF")]
    OutOfRange { start: u16, len: usize },
}

/// Flat RAM covering the full 16-bit address space.
///
/// Cloning produces a verbatim snapshot; assigning a clone back restores it.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create zero-filled memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: vec![0; MEMORY_SIZE],
        }
    }

    /// Copy `bytes` into memory starting at `start`.
    ///
    /// Fails without writing anything if the slice would not fit below $10000.
    pub fn load(&mut self, start: u16, bytes: &[u8]) -> Result<(), MemoryError> {
        let begin = usize::from(start);
        let end = begin + bytes.len();
        if end > MEMORY_SIZE {
            return Err(MemoryError::OutOfRange {
                start,
                len: bytes.len(),
            });
        }
        self.data[begin..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Read without going through the bus (no side effects, shared borrow).
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.data[usize::from(address)]
    }

    /// The whole address space as a slice, index = address.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("size", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl Bus for Memory {
    fn read(&mut self, address: u16) -> u8 {
        self.data[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.data[usize::from(address)] = value;
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }
}
