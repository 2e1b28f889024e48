use std::fmt;

use super::{Bus, Cpu};

/// CPU state at an instruction boundary, in the column layout of the
/// widely published `nestest.log`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TraceLine {
    pub pc: u16,
    pub bytes: Vec<u8>,
    pub assembly: String,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    pub cycles: u64,
}

impl TraceLine {
    /// Parse one line of a nestest-style log.
    ///
    /// Only the address, instruction bytes, disassembly and the
    /// `A: X: Y: P: SP: CYC:` columns are read; the PPU column is skipped.
    /// Returns `None` for lines that do not carry every register.
    pub fn parse_nestest(line: &str) -> Option<TraceLine> {
        let pc = u16::from_str_radix(line.get(0..4)?, 16).ok()?;
        let bytes = line
            .get(6..14)?
            .split_whitespace()
            .map(|b| u8::from_str_radix(b, 16).ok())
            .collect::<Option<Vec<u8>>>()?;
        let assembly = line.get(15..48).unwrap_or_default().trim().to_string();

        let mut trace = TraceLine {
            pc,
            bytes,
            assembly,
            ..TraceLine::default()
        };
        let mut seen = 0u8;
        for token in line.split_whitespace() {
            let Some((key, value)) = token.split_once(':') else {
                continue;
            };
            match key {
                "A" => trace.a = u8::from_str_radix(value, 16).ok()?,
                "X" => trace.x = u8::from_str_radix(value, 16).ok()?,
                "Y" => trace.y = u8::from_str_radix(value, 16).ok()?,
                "P" => trace.p = u8::from_str_radix(value, 16).ok()?,
                "SP" => trace.sp = u8::from_str_radix(value, 16).ok()?,
                "CYC" => trace.cycles = value.parse().ok()?,
                _ => continue,
            }
            seen += 1;
        }

        (seen == 6).then_some(trace)
    }

    /// Compare everything the CPU is responsible for: PC, registers, flags
    /// and cycle count. Disassembly text is ignored.
    pub fn same_state(&self, other: &TraceLine) -> bool {
        self.pc == other.pc
            && self.a == other.a
            && self.x == other.x
            && self.y == other.y
            && self.p == other.p
            && self.sp == other.sp
            && self.cycles == other.cycles
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self
            .bytes
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        // Undocumented mnemonics carry a leading '*' in the mnemonic column.
        let assembly = if self.assembly.starts_with('*') {
            self.assembly.clone()
        } else {
            format!(" {}", self.assembly)
        };
        write!(
            f,
            "{:04X}  {:<8} {:<33}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc, bytes, assembly, self.a, self.x, self.y, self.p, self.sp, self.cycles
        )
    }
}

impl Cpu {
    /// Snapshot the state about to execute, for tracing.
    ///
    /// Meaningful at instruction boundaries (`complete()` is true). The
    /// instruction is decoded with peek reads, so tracing never disturbs the
    /// bus.
    pub fn trace_line<B: Bus + ?Sized>(&self, bus: &B) -> TraceLine {
        let decoded = Self::decode_at(bus, self.regs.pc);
        TraceLine {
            pc: self.regs.pc,
            bytes: decoded.bytes(),
            assembly: decoded.assembly(),
            a: self.regs.a,
            x: self.regs.x,
            y: self.regs.y,
            p: self.regs.p(),
            sp: self.regs.sp,
            cycles: self.clock_count,
        }
    }
}
