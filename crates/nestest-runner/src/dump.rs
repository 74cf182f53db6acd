//! Hex dump of a memory range, 16 bytes per row.

use std::fmt::Write;

use emu_core::Memory;

/// Rows are widened to whole 16-byte lines covering `start..=end`.
#[must_use]
pub fn hex_dump(mem: &Memory, start: u16, end: u16) -> String {
    let first = usize::from(start) & !0xF;
    let last = usize::from(end) | 0xF;
    let bytes = mem.as_slice();

    let mut out = String::new();
    for row in (first..=last).step_by(16) {
        let _ = write!(out, "${row:04X} ");
        for byte in &bytes[row..row + 16] {
            let _ = write!(out, " {byte:02X}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_aligned() {
        let mut mem = Memory::new();
        mem.load(0x0002, &[0xAB, 0xCD]).unwrap();
        let dump = hex_dump(&mem, 0x0002, 0x0008);
        assert_eq!(
            dump,
            "$0000  00 00 AB CD 00 00 00 00 00 00 00 00 00 00 00 00\n"
        );
    }

    #[test]
    fn top_of_memory_does_not_overflow() {
        let mem = Memory::new();
        let dump = hex_dump(&mem, 0xFFF0, 0xFFFF);
        assert_eq!(dump.lines().count(), 1);
        assert!(dump.starts_with("$FFF0 "));
    }

    #[test]
    fn spans_multiple_rows() {
        let mem = Memory::new();
        assert_eq!(hex_dump(&mem, 0x010F, 0x0110).lines().count(), 2);
    }
}
