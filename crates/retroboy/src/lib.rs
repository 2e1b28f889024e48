//! Host-side tooling around the NES core: instruction tracing against a
//! reference log, and disassembly of cartridge PRG.

use std::io::Write;

use anyhow::{bail, Context, Result};
use retroboy_nes::cpu::{AddrMode, Op};
use retroboy_nes::machine::wiring::reference_bus;
use retroboy_nes::{Cartridge, Cpu, TraceLine};
use typed_builder::TypedBuilder;

/// Settings for a trace run.
#[derive(TypedBuilder)]
pub struct TraceInfo {
    /// Raw iNES image.
    pub rom: Vec<u8>,
    /// Start here instead of at the RESET vector (nestest automation uses
    /// 0xC000).
    #[builder(default)]
    pub entry: Option<u16>,
    /// Cycle count shown on the first line.
    #[builder(default = 7)]
    pub start_cycles: u64,
    /// Initial P, e.g. 0x24 to match nestest.
    #[builder(default)]
    pub status: Option<u8>,
    /// Maximum number of instructions to trace.
    #[builder(default = 10_000)]
    pub instructions: usize,
    /// Stop at an undocumented opcode or a jump-to-self loop.
    #[builder(default = false)]
    pub stop_on_jam: bool,
    /// Reference log text to compare each line against.
    #[builder(default)]
    pub compare: Option<String>,
}

pub enum Command {
    Trace(TraceInfo),
    Disasm { rom: Vec<u8>, start: u16, end: u16 },
}

pub fn run(command: Command) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Trace(info) => {
            let traced = run_trace(info, &mut out)?;
            log::info!("traced {traced} instructions");
        }
        Command::Disasm { rom, start, end } => {
            run_disasm(&rom, start, end, &mut out)?;
        }
    }
    Ok(())
}

/// Execute a cartridge one instruction at a time, writing a nestest-style
/// line before each instruction. Returns the number of instructions traced.
///
/// With a reference log the run fails at the first line whose registers,
/// flags or cycle count differ.
pub fn run_trace(info: TraceInfo, out: &mut impl Write) -> Result<usize> {
    let cartridge = Cartridge::from_bytes(&info.rom).context("failed to parse cartridge")?;
    let mut bus = reference_bus(&cartridge);
    let mut cpu = Cpu::new();

    cpu.reset(&mut bus);
    while !cpu.complete() {
        cpu.clock(&mut bus);
    }
    if let Some(entry) = info.entry {
        cpu.regs.pc = entry;
    }
    if let Some(status) = info.status {
        cpu.regs.set_p(status);
    }
    cpu.set_clock_count(info.start_cycles);

    let mut reference = info
        .compare
        .as_deref()
        .map(|log| log.lines().filter(|line| !line.trim().is_empty()));

    let mut traced = 0;
    while traced < info.instructions {
        let line = cpu.trace_line(&bus);
        writeln!(out, "{line}")?;
        log::trace!("{line}");

        if let Some(reference) = reference.as_mut() {
            let Some(expected) = reference.next() else {
                log::info!("reference log exhausted after {traced} instructions");
                break;
            };
            let parsed = TraceLine::parse_nestest(expected)
                .with_context(|| format!("unparsable reference line: {expected}"))?;
            if !line.same_state(&parsed) {
                bail!(
                    "diverged after {traced} instructions\nexpected: {expected}\n  actual: {line}"
                );
            }
        }

        if info.stop_on_jam && jammed(&bus, &cpu) {
            log::warn!("stopping at 0x{:04X}: {}", line.pc, line.assembly);
            break;
        }

        cpu.step(&mut bus);
        traced += 1;
    }

    Ok(traced)
}

/// The next instruction is an undocumented fallback or jumps to itself.
fn jammed(bus: &impl retroboy_nes::Bus, cpu: &Cpu) -> bool {
    let decoded = Cpu::decode_at(bus, cpu.regs.pc);
    decoded.instruction.op == Op::Xxx
        || (decoded.instruction.op == Op::Jmp
            && decoded.instruction.mode == AddrMode::Abs
            && decoded.operand == cpu.regs.pc)
}

/// Write the disassembly of `start..=end` as the CPU would see it after
/// reset on the reference bus.
pub fn run_disasm(rom: &[u8], start: u16, end: u16, out: &mut impl Write) -> Result<()> {
    if start > end {
        bail!("start 0x{start:04X} is past end 0x{end:04X}");
    }
    let cartridge = Cartridge::from_bytes(rom).context("failed to parse cartridge")?;
    let bus = reference_bus(&cartridge);

    for line in Cpu::disassemble(&bus, start, end).values() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Parse an address written as `C000`, `0xC000` or `$C000`.
pub fn parse_address(text: &str) -> Result<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_prefix('$'))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).with_context(|| format!("invalid address '{text}'"))
}

/// Parse a byte written in hex, with the same prefixes as [`parse_address`].
pub fn parse_byte(text: &str) -> Result<u8> {
    let value = parse_address(text)?;
    u8::try_from(value).with_context(|| format!("'{text}' does not fit in a byte"))
}
