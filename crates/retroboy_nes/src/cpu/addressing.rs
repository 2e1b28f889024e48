use super::{AddrMode, Bus, Cpu};

/// True when `a` and `b` live on different 256-byte pages.
#[inline]
pub(super) fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl Cpu {
    /// Resolve the operand for the current instruction.
    ///
    /// Sets `addr_abs` (or `addr_rel` for branches, or `fetched` for
    /// implied mode) and returns 1 when the mode may cost an extra cycle,
    /// i.e. when indexing crossed a page boundary.
    pub(super) fn run_addressing<B: Bus>(&mut self, bus: &mut B, mode: AddrMode) -> u8 {
        match mode {
            AddrMode::Imp => {
                self.fetched = self.regs.a;
                0
            }
            AddrMode::Imm => {
                self.addr_abs = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                0
            }
            AddrMode::Zp0 => {
                self.addr_abs = self.fetch8(bus) as u16;
                0
            }
            AddrMode::Zpx => {
                self.addr_abs = self.fetch8(bus).wrapping_add(self.regs.x) as u16;
                0
            }
            AddrMode::Zpy => {
                self.addr_abs = self.fetch8(bus).wrapping_add(self.regs.y) as u16;
                0
            }
            AddrMode::Rel => {
                let offset = self.fetch8(bus) as i8;
                self.addr_rel = offset as i16 as u16;
                0
            }
            AddrMode::Abs => {
                self.addr_abs = self.fetch16(bus);
                0
            }
            AddrMode::Abx => self.absolute_indexed(bus, self.regs.x),
            AddrMode::Aby => self.absolute_indexed(bus, self.regs.y),
            AddrMode::Ind => {
                let ptr = self.fetch16(bus);
                let lo = bus.read(ptr) as u16;
                // Hardware bug: the high byte never carries into the next
                // page, so a pointer at $xxFF wraps to $xx00.
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr + 1
                };
                let hi = bus.read(hi_addr) as u16;
                self.addr_abs = (hi << 8) | lo;
                0
            }
            AddrMode::Izx => {
                let zp = self.fetch8(bus).wrapping_add(self.regs.x);
                let lo = bus.read(zp as u16) as u16;
                let hi = bus.read(zp.wrapping_add(1) as u16) as u16;
                self.addr_abs = (hi << 8) | lo;
                0
            }
            AddrMode::Izy => {
                let zp = self.fetch8(bus);
                let lo = bus.read(zp as u16) as u16;
                let hi = bus.read(zp.wrapping_add(1) as u16) as u16;
                let base = (hi << 8) | lo;
                self.addr_abs = base.wrapping_add(self.regs.y as u16);
                page_crossed(base, self.addr_abs) as u8
            }
        }
    }

    fn absolute_indexed<B: Bus>(&mut self, bus: &mut B, index: u8) -> u8 {
        let base = self.fetch16(bus);
        self.addr_abs = base.wrapping_add(index as u16);
        page_crossed(base, self.addr_abs) as u8
    }
}
