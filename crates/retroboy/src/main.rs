use std::process::exit;

use anyhow::{Context, Result};
use retroboy::{parse_address, parse_byte, Command, TraceInfo};

const USAGE: &str = "\
Usage:
  retroboy trace <rom.nes> [--entry ADDR] [--cycles N] [--status P] [--count N]
                           [--compare LOG] [--stop-on-jam]
  retroboy disasm <rom.nes> <start> <end>

Addresses and P are hex (C000, 0xC000 or $C000).
Example (nestest automation mode):
  retroboy trace nestest.nes --entry C000 --status 24 --compare nestest.log";

fn usage_error(message: &str) -> ! {
    eprintln!("{message}\n\n{USAGE}");
    exit(2);
}

fn read_rom(path: &str) -> Result<Vec<u8>> {
    log::info!("Loading ROM path: '{path}'");
    std::fs::read(path).with_context(|| format!("failed to read ROM file '{path}'"))
}

fn parse_trace(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let Some(rom_path) = args.next() else {
        usage_error("trace: missing ROM path");
    };
    let rom = read_rom(&rom_path)?;

    let mut entry = None;
    let mut status = None;
    let mut start_cycles = 7;
    let mut instructions = 10_000;
    let mut compare = None;
    let mut stop_on_jam = false;

    while let Some(flag) = args.next() {
        if flag == "--stop-on-jam" {
            stop_on_jam = true;
            continue;
        }
        let Some(value) = args.next() else {
            usage_error(&format!("{flag} needs a value"));
        };
        match flag.as_str() {
            "--entry" => entry = Some(parse_address(&value)?),
            "--status" => status = Some(parse_byte(&value)?),
            "--cycles" => {
                start_cycles = value
                    .parse()
                    .with_context(|| format!("invalid cycle count '{value}'"))?
            }
            "--count" => {
                instructions = value
                    .parse()
                    .with_context(|| format!("invalid instruction count '{value}'"))?
            }
            "--compare" => {
                let log = std::fs::read_to_string(&value)
                    .with_context(|| format!("failed to read reference log '{value}'"))?;
                compare = Some(log);
            }
            other => usage_error(&format!("unknown option '{other}'")),
        }
    }

    Ok(Command::Trace(
        TraceInfo::builder()
            .rom(rom)
            .entry(entry)
            .start_cycles(start_cycles)
            .status(status)
            .instructions(instructions)
            .stop_on_jam(stop_on_jam)
            .compare(compare)
            .build(),
    ))
}

fn parse_disasm(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let (Some(rom_path), Some(start), Some(end)) = (args.next(), args.next(), args.next()) else {
        usage_error("disasm: expected <rom.nes> <start> <end>");
    };
    Ok(Command::Disasm {
        rom: read_rom(&rom_path)?,
        start: parse_address(&start)?,
        end: parse_address(&end)?,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("trace") => parse_trace(args)?,
        Some("disasm") | Some("disassemble") => parse_disasm(args)?,
        Some(other) => usage_error(&format!("Unknown command '{other}'")),
        None => usage_error("No command given"),
    };

    retroboy::run(command)
}
