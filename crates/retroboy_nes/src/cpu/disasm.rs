use std::collections::BTreeMap;

use super::{lookup, AddrMode, Bus, Cpu, Instruction};

/// One decoded instruction, read without side effects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decoded {
    pub addr: u16,
    pub opcode: u8,
    pub instruction: &'static Instruction,
    /// Raw operand: the low byte only for one byte operands.
    pub operand: u16,
}

impl Decoded {
    /// Instruction length in bytes.
    pub fn size(&self) -> u16 {
        self.instruction.size()
    }

    /// The instruction bytes as they sit in memory.
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.opcode];
        match self.instruction.mode.operand_len() {
            1 => bytes.push(self.operand as u8),
            2 => bytes.extend_from_slice(&self.operand.to_le_bytes()),
            _ => {}
        }
        bytes
    }

    /// Operand in assembler syntax, empty for implied instructions.
    /// Branches show their resolved target.
    pub fn operand_text(&self) -> String {
        let lo = self.operand as u8;
        match self.instruction.mode {
            AddrMode::Imp => String::new(),
            AddrMode::Imm => format!("#${lo:02X}"),
            AddrMode::Zp0 => format!("${lo:02X}"),
            AddrMode::Zpx => format!("${lo:02X},X"),
            AddrMode::Zpy => format!("${lo:02X},Y"),
            AddrMode::Izx => format!("(${lo:02X},X)"),
            AddrMode::Izy => format!("(${lo:02X}),Y"),
            AddrMode::Abs => format!("${:04X}", self.operand),
            AddrMode::Abx => format!("${:04X},X", self.operand),
            AddrMode::Aby => format!("${:04X},Y", self.operand),
            AddrMode::Ind => format!("(${:04X})", self.operand),
            AddrMode::Rel => format!("${:04X}", self.branch_target()),
        }
    }

    /// Mnemonic and operand, e.g. `LDA #$00`.
    pub fn assembly(&self) -> String {
        let operand = self.operand_text();
        if operand.is_empty() {
            self.instruction.mnemonic.to_string()
        } else {
            format!("{} {}", self.instruction.mnemonic, operand)
        }
    }

    fn branch_target(&self) -> u16 {
        let offset = self.operand as u8 as i8 as i16 as u16;
        self.addr.wrapping_add(2).wrapping_add(offset)
    }
}

impl Cpu {
    /// Decode the instruction at `addr` using peek reads only.
    pub fn decode_at<B: Bus + ?Sized>(bus: &B, addr: u16) -> Decoded {
        let opcode = bus.peek(addr);
        let instruction = lookup(opcode);
        let operand = match instruction.mode.operand_len() {
            0 => 0,
            1 => bus.peek(addr.wrapping_add(1)) as u16,
            _ => {
                let lo = bus.peek(addr.wrapping_add(1)) as u16;
                let hi = bus.peek(addr.wrapping_add(2)) as u16;
                (hi << 8) | lo
            }
        };
        Decoded {
            addr,
            opcode,
            instruction,
            operand,
        }
    }

    /// Disassemble the inclusive range `start..=end`.
    ///
    /// Each entry maps an instruction address to a line such as
    /// `$C000: LDA #$00 {IMM}`. Only `peek` is used, so devices with read
    /// side effects are left untouched. Decoding stops at the end of the
    /// address space rather than wrapping back to 0x0000.
    pub fn disassemble<B: Bus + ?Sized>(bus: &B, start: u16, end: u16) -> BTreeMap<u16, String> {
        let mut lines = BTreeMap::new();
        let mut addr = start as u32;

        while addr <= end as u32 {
            let decoded = Self::decode_at(bus, addr as u16);
            let line = format!(
                "${:04X}: {} {{{}}}",
                decoded.addr,
                decoded.assembly(),
                decoded.instruction.mode.tag()
            );
            lines.insert(decoded.addr, line);
            addr += decoded.size() as u32;
        }

        lines
    }
}
