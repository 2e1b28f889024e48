use super::{AddrMode, Bus, Cpu};
use crate::STACK_BASE;

impl Cpu {
    /// Read the byte at PC and advance PC.
    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Read a little-endian word at PC and advance PC by two.
    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus) as u16;
        let hi = self.fetch8(bus) as u16;
        (hi << 8) | lo
    }

    /// Read a little-endian word, e.g. an interrupt vector.
    #[inline]
    pub(super) fn read16<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u16 {
        let lo = bus.read(addr) as u16;
        let hi = bus.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Load the operand of the current instruction into `fetched`.
    ///
    /// Implied/accumulator instructions already have their operand (A) in
    /// `fetched`, so no bus access happens for them.
    #[inline]
    pub(super) fn fetch_operand<B: Bus>(&mut self, bus: &mut B) -> u8 {
        if self.mode != AddrMode::Imp {
            self.fetched = bus.read(self.addr_abs);
        }
        self.fetched
    }

    /// Store the result of a read-modify-write op back to A or memory.
    #[inline]
    pub(super) fn write_back<B: Bus>(&mut self, bus: &mut B, value: u8) {
        if self.mode == AddrMode::Imp {
            self.regs.a = value;
        } else {
            bus.write(self.addr_abs, value);
        }
    }

    #[inline]
    pub(super) fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        bus.write(STACK_BASE + self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    #[inline]
    pub(super) fn pop<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        bus.read(STACK_BASE + self.regs.sp as u16)
    }

    /// Push a word high byte first, so it sits little-endian in memory.
    #[inline]
    pub(super) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    #[inline]
    pub(super) fn pop16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        (hi << 8) | lo
    }
}
