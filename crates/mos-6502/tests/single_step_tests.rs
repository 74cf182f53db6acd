//! Integration tests using Tom Harte's `SingleStepTests` for the 6502.
//!
//! Each opcode file holds 10,000 single-instruction cases. The final
//! registers and touched RAM are compared after one `step`, and the cycles
//! `step` reports are compared against the length of the recorded bus trace.
//!
//! Test data lives in `test-data/65x02/6502/v1/XX.json`.
//!
//! Cases that exercise behaviour this core deliberately differs on are
//! skipped: undefined opcodes, BRK (return address), and ADC/SBC-family
//! cases with the decimal flag set (no BCD).

use emu_core::{Bus, Memory};
use mos_6502::{Mnemonic, Mos6502, OpcodeEntry, Status, decode, flags};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// JSON test case format.
#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    cycles: Vec<(u16, u8, String)>,
}

/// JSON CPU state format.
#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    s: u8,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

/// Set up the CPU and memory from the initial test state.
fn setup(cpu: &mut Mos6502, mem: &mut Memory, state: &CpuState) {
    for &(addr, value) in &state.ram {
        mem.write(addr, value);
    }
    cpu.regs.pc = state.pc;
    cpu.regs.sp = state.s;
    cpu.regs.a = state.a;
    cpu.regs.x = state.x;
    cpu.regs.y = state.y;
    cpu.regs.p = Status::from_byte(state.p);
}

/// Compare the CPU/memory state against expected, returning a list of mismatches.
fn compare(cpu: &Mos6502, mem: &Memory, expected: &CpuState) -> Vec<String> {
    let mut errors = Vec::new();

    let regs = [
        ("PC", u32::from(cpu.pc()), u32::from(expected.pc)),
        ("S", u32::from(cpu.sp()), u32::from(expected.s)),
        ("A", u32::from(cpu.a()), u32::from(expected.a)),
        ("X", u32::from(cpu.x()), u32::from(expected.x)),
        ("Y", u32::from(cpu.y()), u32::from(expected.y)),
    ];
    for (name, got, want) in regs {
        if got != want {
            errors.push(format!("{name}: got ${got:02X}, want ${want:02X}"));
        }
    }

    // B and the unused bit only exist on the stack.
    let mask = !(flags::B | flags::U);
    let actual_p = cpu.status() & mask;
    let expected_p = expected.p & mask;
    if actual_p != expected_p {
        errors.push(format!(
            "P: got ${actual_p:02X} ({actual_p:08b}), want ${expected_p:02X} ({expected_p:08b})"
        ));
    }

    for &(addr, expected_val) in &expected.ram {
        let actual_val = mem.peek(addr);
        if actual_val != expected_val {
            errors.push(format!(
                "RAM[${addr:04X}]: got ${actual_val:02X}, want ${expected_val:02X}"
            ));
        }
    }

    errors
}

fn skipped(opcode: u8, initial: &CpuState) -> bool {
    match decode(opcode) {
        OpcodeEntry::Undefined => true,
        OpcodeEntry::Defined { mnemonic, .. } => match mnemonic {
            Mnemonic::Brk => true,
            Mnemonic::Adc | Mnemonic::Sbc | Mnemonic::Rra | Mnemonic::Isb | Mnemonic::Usbc => {
                initial.p & flags::D != 0
            }
            _ => false,
        },
    }
}

#[test]
#[ignore = "requires test-data/65x02 - run with --ignored"]
fn run_all() {
    let test_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("parent of crate dir")
        .parent()
        .expect("workspace root")
        .join("test-data/65x02/6502/v1");

    if !test_dir.exists() {
        eprintln!("Test data not found at {}", test_dir.display());
        eprintln!("Skipping SingleStepTests.");
        return;
    }

    let mut total_pass = 0u64;
    let mut total_fail = 0u64;
    let mut total_skip = 0u64;
    let mut total_files = 0u32;

    for opcode in 0..=0xFF_u8 {
        let filename = format!("{opcode:02x}.json");
        let path = test_dir.join(&filename);
        if !path.exists() {
            continue;
        }

        let data = fs::read_to_string(&path).unwrap_or_else(|e| {
            panic!("Failed to read {}: {e}", path.display());
        });
        let tests: Vec<TestCase> = serde_json::from_str(&data).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {e}", path.display());
        });

        let mut file_pass = 0u32;
        let mut file_fail = 0u32;
        let mut first_failures: Vec<String> = Vec::new();

        for test in &tests {
            if skipped(opcode, &test.initial) {
                total_skip += 1;
                continue;
            }

            let mut cpu = Mos6502::new();
            let mut mem = Memory::new();
            setup(&mut cpu, &mut mem, &test.initial);

            let mut errors = match cpu.step(&mut mem) {
                Ok(cycles) if cycles as usize == test.cycles.len() => Vec::new(),
                Ok(cycles) => vec![format!("cycles: got {cycles}, want {}", test.cycles.len())],
                Err(e) => vec![e.to_string()],
            };
            errors.extend(compare(&cpu, &mem, &test.final_state));

            if errors.is_empty() {
                file_pass += 1;
            } else {
                file_fail += 1;
                if first_failures.len() < 5 {
                    first_failures.push(format!("  FAIL [{}]: {}", test.name, errors.join(", ")));
                }
            }
        }

        let status = if file_fail == 0 { "PASS" } else { "FAIL" };
        println!(
            "Opcode ${opcode:02X} ({filename}): {status} - {file_pass}/{} passed",
            file_pass + file_fail
        );
        for msg in &first_failures {
            println!("{msg}");
        }

        total_pass += u64::from(file_pass);
        total_fail += u64::from(file_fail);
        total_files += 1;
    }

    println!();
    println!("=== SingleStepTests Summary ===");
    println!(
        "Files: {total_files}, Pass: {total_pass}, Fail: {total_fail}, Skipped: {total_skip}"
    );

    assert_eq!(total_fail, 0, "{total_fail} tests failed");
}
