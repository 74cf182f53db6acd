//! Headless 6502 program runner.
//!
//! Loads a program image, resets the CPU and steps it until a stop
//! condition is met. With `--reference` every instruction boundary is
//! checked against a nestest-format log and the run stops at the first
//! divergence.
//!
//! ```text
//! nestest-runner nestest.nes --start-pc C000 --reference nestest.log
//! ```

mod dump;
mod image;
mod trace;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use emu_core::{Bus, Memory, Ticks};
use mos_6502::{Mos6502, RESET_VECTOR, StepError};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use image::ImageError;
use trace::{Snapshot, TraceLine};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// iNES cartridge image; PRG-ROM goes to $8000.
    Ines,
    /// Raw bytes copied to --load-addr.
    Raw,
}

#[derive(Clone, Copy, Debug)]
struct DumpRange {
    start: u16,
    end: u16,
}

#[derive(Parser)]
#[clap(author, about, long_about = None, version)]
struct Cli {
    /// Program image to run.
    image: PathBuf,

    /// Image format.
    #[clap(long, value_enum, default_value_t = Format::Ines)]
    format: Format,

    /// Load address for raw images.
    #[clap(long, value_parser = parse_hex_u16, default_value = "0")]
    load_addr: u16,

    /// Program counter after loading, overriding the reset vector.
    #[clap(long, value_parser = parse_hex_u16)]
    start_pc: Option<u16>,

    /// Cycle count at the first instruction (the reset sequence takes 7).
    #[clap(long, default_value_t = 7)]
    start_cycles: u64,

    /// Stop after this many instructions.
    #[clap(long)]
    max_instructions: Option<u64>,

    /// Stop once the cycle total reaches this value.
    #[clap(long)]
    max_cycles: Option<u64>,

    /// nestest-format log to compare against.
    #[clap(long)]
    reference: Option<PathBuf>,

    /// Print a trace line before every instruction.
    #[clap(long)]
    trace: bool,

    /// Memory range to dump after the run, e.g. 0000:00FF.
    #[clap(long, value_parser = parse_range)]
    dump: Option<DumpRange>,
}

/// Parse a 16-bit hex value with an optional `0x` or `$` prefix.
fn parse_hex_u16(text: &str) -> Result<u16, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|e| format!("{text:?}: {e}"))
}

fn parse_range(text: &str) -> Result<DumpRange, String> {
    let (start, end) = text
        .split_once(':')
        .ok_or_else(|| format!("{text:?}: expected START:END"))?;
    let range = DumpRange {
        start: parse_hex_u16(start)?,
        end: parse_hex_u16(end)?,
    };
    if range.start > range.end {
        return Err(format!("{text:?}: start is after end"));
    }
    Ok(range)
}

/// Why a run ended. Hitting an undefined opcode or diverging from the
/// reference makes the process exit with a failure status.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Stop {
    InstructionLimit,
    CycleBudget,
    Undefined(StepError),
    ReferenceEnd,
    Diverged { line: usize, differences: Vec<String> },
}

impl Stop {
    fn is_failure(&self) -> bool {
        matches!(self, Stop::Undefined(_) | Stop::Diverged { .. })
    }
}

struct Outcome {
    stop: Stop,
    instructions: u64,
    cycles: Ticks,
}

/// Step until a stop condition. Reference lines are compared before each
/// instruction runs.
fn run(cpu: &mut Mos6502, mem: &mut Memory, cli: &Cli, reference: Option<&str>) -> Outcome {
    let mut cycles = Ticks::new(cli.start_cycles);
    let mut instructions = 0u64;
    let mut expected = reference.map(|log| {
        log.lines()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
    });

    let stop = loop {
        if cli.max_instructions.is_some_and(|max| instructions >= max) {
            break Stop::InstructionLimit;
        }
        if cli.max_cycles.is_some_and(|max| cycles.get() >= max) {
            break Stop::CycleBudget;
        }

        let state = Snapshot::capture(cpu, cycles);

        if let Some(lines) = expected.as_mut() {
            let Some((index, text)) = lines.next() else {
                break Stop::ReferenceEnd;
            };
            let differences = match Snapshot::parse(text) {
                Ok(want) => want.diff(&state),
                Err(e) => vec![e.to_string()],
            };
            if !differences.is_empty() {
                error!(line = index + 1, "reference: {text}");
                break Stop::Diverged {
                    line: index + 1,
                    differences,
                };
            }
        }

        if cli.trace {
            let fetched = cpu.peek_instruction(mem);
            println!(
                "{}",
                TraceLine {
                    fetched: &fetched,
                    state: &state,
                }
            );
        }

        match cpu.step(mem) {
            Ok(taken) => cycles += taken,
            Err(e) => break Stop::Undefined(e),
        }
        instructions += 1;
    };

    Outcome {
        stop,
        instructions,
        cycles,
    }
}

/// Reset, load the image and choose the starting PC: `--start-pc` if given,
/// otherwise the image's reset vector.
fn boot(cli: &Cli, data: &[u8]) -> Result<(Mos6502, Memory), ImageError> {
    let mut mem = Memory::new();
    let mut cpu = Mos6502::new();

    // Reset zeroes memory, so it has to come before the image is loaded.
    cpu.reset(&mut mem);
    match cli.format {
        Format::Ines => image::load_ines(&mut mem, data)?,
        Format::Raw => image::load_raw(&mut mem, cli.load_addr, data)?,
    }
    cpu.regs.pc = match cli.start_pc {
        Some(pc) => pc,
        None => mem.read_word(RESET_VECTOR),
    };
    Ok((cpu, mem))
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nestest_runner=info,mos_6502=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let reference = cli
        .reference
        .as_ref()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("failed to read reference log {}", path.display()))
        })
        .transpose()?;

    let data = fs::read(&cli.image)
        .with_context(|| format!("failed to read {}", cli.image.display()))?;
    let (mut cpu, mut mem) =
        boot(&cli, &data).with_context(|| format!("failed to load {}", cli.image.display()))?;
    info!(bytes = data.len(), format = ?cli.format, "loaded {}", cli.image.display());
    info!(pc = format_args!("${:04X}", cpu.pc()), "starting");

    let outcome = run(&mut cpu, &mut mem, &cli, reference.as_deref());

    match &outcome.stop {
        Stop::InstructionLimit => info!("instruction limit reached"),
        Stop::CycleBudget => info!("cycle budget reached"),
        Stop::ReferenceEnd => info!("reference log exhausted, all lines matched"),
        Stop::Undefined(e) => warn!("{e}"),
        Stop::Diverged { line, differences } => {
            error!("diverged from reference at line {line}: {}", differences.join(", "));
        }
    }

    println!(
        "PC:{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        cpu.pc(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.status(),
        cpu.sp()
    );
    println!(
        "{} instructions, {} cycles",
        outcome.instructions, outcome.cycles
    );

    if let Some(range) = cli.dump {
        print!("{}", dump::hex_dump(&mem, range.start, range.end));
    }

    Ok(if outcome.stop.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("nestest-runner").chain(args.iter().copied()))
    }

    fn program(bytes: &[u8]) -> (Mos6502, Memory) {
        let mut mem = Memory::new();
        mem.load(0x0600, bytes).unwrap();
        let mut cpu = Mos6502::new();
        cpu.regs.pc = 0x0600;
        (cpu, mem)
    }

    #[test]
    fn hex_arguments_accept_prefixes() {
        assert_eq!(parse_hex_u16("C000"), Ok(0xC000));
        assert_eq!(parse_hex_u16("0xc000"), Ok(0xC000));
        assert_eq!(parse_hex_u16("$C000"), Ok(0xC000));
        assert!(parse_hex_u16("10000").is_err());
        assert!(parse_range("0010:0000").is_err());
        let range = parse_range("$0000:0x00FF").unwrap();
        assert_eq!((range.start, range.end), (0x0000, 0x00FF));
    }

    #[test]
    fn cli_defaults() {
        let cli = cli(&["nestest.nes"]);
        assert!(matches!(cli.format, Format::Ines));
        assert_eq!(cli.start_cycles, 7);
        assert_eq!(cli.start_pc, None);
        assert!(!cli.trace);
    }

    #[test]
    fn stops_at_instruction_limit() {
        // INX; JMP $0600
        let (mut cpu, mut mem) = program(&[0xE8, 0x4C, 0x00, 0x06]);
        let outcome = run(
            &mut cpu,
            &mut mem,
            &cli(&["x", "--max-instructions", "10"]),
            None,
        );
        assert_eq!(outcome.stop, Stop::InstructionLimit);
        assert_eq!(outcome.instructions, 10);
        assert_eq!(outcome.cycles.get(), 7 + 5 * (2 + 3));
        assert_eq!(cpu.x(), 5);
    }

    #[test]
    fn stops_at_cycle_budget() {
        let (mut cpu, mut mem) = program(&[0xE8, 0x4C, 0x00, 0x06]);
        let outcome = run(&mut cpu, &mut mem, &cli(&["x", "--max-cycles", "20"]), None);
        assert_eq!(outcome.stop, Stop::CycleBudget);
        assert!(outcome.cycles.get() >= 20);
    }

    /// One-bank iNES image with the reset vector pointing at `entry`.
    fn ines_with_vector(entry: u16) -> Vec<u8> {
        let mut data = vec![0; 16 + 0x4000];
        data[..4].copy_from_slice(b"NES\x1A");
        data[4] = 1;
        // $FFFC in the $C000 mirror is offset $3FFC in the bank.
        let [low, high] = entry.to_le_bytes();
        data[16 + 0x3FFC] = low;
        data[16 + 0x3FFD] = high;
        data
    }

    #[test]
    fn boot_starts_at_reset_vector() {
        let data = ines_with_vector(0xC123);
        let (cpu, mem) = boot(&cli(&["x.nes"]), &data).unwrap();
        assert_eq!(mem.peek(0xFFFC), 0x23);
        assert_eq!(cpu.pc(), 0xC123);
        assert_eq!(cpu.sp(), 0xFD);
    }

    #[test]
    fn boot_start_pc_overrides_vector() {
        let data = ines_with_vector(0xC123);
        let (cpu, _) = boot(&cli(&["x.nes", "--start-pc", "C000"]), &data).unwrap();
        assert_eq!(cpu.pc(), 0xC000);
    }

    #[test]
    fn boot_raw_image_uses_load_address() {
        // Raw image covering $FFFA-$FFFF with the reset vector at $0600.
        let data = [0x00, 0x00, 0x00, 0x06, 0x00, 0x00];
        let (cpu, mem) = boot(&cli(&["x.bin", "--format", "raw", "--load-addr", "$FFFA"]), &data)
            .unwrap();
        assert_eq!(mem.peek(0xFFFD), 0x06);
        assert_eq!(cpu.pc(), 0x0600);
    }

    #[test]
    fn failing_stops() {
        assert!(Stop::Undefined(StepError::UndefinedOpcode { opcode: 0x02, pc: 0 }).is_failure());
        assert!(
            Stop::Diverged {
                line: 1,
                differences: Vec::new(),
            }
            .is_failure()
        );
        assert!(!Stop::InstructionLimit.is_failure());
        assert!(!Stop::CycleBudget.is_failure());
        assert!(!Stop::ReferenceEnd.is_failure());
    }

    #[test]
    fn stops_on_undefined_opcode() {
        // NOP; KIL
        let (mut cpu, mut mem) = program(&[0xEA, 0x02]);
        let outcome = run(&mut cpu, &mut mem, &cli(&["x"]), None);
        assert_eq!(
            outcome.stop,
            Stop::Undefined(StepError::UndefinedOpcode {
                opcode: 0x02,
                pc: 0x0601
            })
        );
        assert_eq!(outcome.instructions, 1);
        assert_eq!(cpu.pc(), 0x0601);
    }

    #[test]
    fn follows_and_diverges_from_reference() {
        // LDA #$01; LDX #$02
        let (cpu0, mem0) = program(&[0xA9, 0x01, 0xA2, 0x02]);
        let good = "0600  A9 01     LDA #$01   A:00 X:00 Y:00 P:24 SP:FD CYC:7\n\
                    0602  A2 02     LDX #$02   A:01 X:00 Y:00 P:24 SP:FD CYC:9\n";
        let (mut cpu, mut mem) = (cpu0.clone(), mem0.clone());
        let outcome = run(&mut cpu, &mut mem, &cli(&["x"]), Some(good));
        assert_eq!(outcome.stop, Stop::ReferenceEnd);
        assert_eq!(outcome.instructions, 2);

        let bad = "0600  A9 01     LDA #$01   A:00 X:00 Y:00 P:24 SP:FD CYC:7\n\
                   0602  A2 02     LDX #$02   A:02 X:00 Y:00 P:24 SP:FD CYC:9\n";
        let (mut cpu, mut mem) = (cpu0, mem0);
        let outcome = run(&mut cpu, &mut mem, &cli(&["x"]), Some(bad));
        assert_eq!(
            outcome.stop,
            Stop::Diverged {
                line: 2,
                differences: vec!["A: want 02, got 01".to_string()],
            }
        );
    }
}
