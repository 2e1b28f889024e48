use super::{Bus, Cpu, Status};
use crate::{IRQ_VECTOR, NMI_VECTOR};

const IRQ_CYCLES: u8 = 7;
const NMI_CYCLES: u8 = 8;

impl Cpu {
    /// Request a maskable interrupt.
    ///
    /// Ignored while the interrupt-disable flag is set. Otherwise PC and P
    /// (with B clear and U set) are pushed, I is set and PC is loaded from
    /// the IRQ vector at 0xFFFE. Costs 7 cycles.
    pub fn irq<B: Bus>(&mut self, bus: &mut B) {
        if self.regs.flag(Status::INTERRUPT_DISABLE) {
            log::trace!("irq ignored at pc=0x{:04X}: I set", self.regs.pc);
            return;
        }
        log::debug!("irq taken at pc=0x{:04X}", self.regs.pc);
        self.enter_interrupt(bus, IRQ_VECTOR);
        self.cycles = IRQ_CYCLES;
    }

    /// Signal a non-maskable interrupt.
    ///
    /// Same stack frame as [`Cpu::irq`] but taken unconditionally and
    /// vectored through 0xFFFA. Costs 8 cycles.
    pub fn nmi<B: Bus>(&mut self, bus: &mut B) {
        log::debug!("nmi taken at pc=0x{:04X}", self.regs.pc);
        self.enter_interrupt(bus, NMI_VECTOR);
        self.cycles = NMI_CYCLES;
    }

    fn enter_interrupt<B: Bus>(&mut self, bus: &mut B, vector: u16) {
        self.push16(bus, self.regs.pc);

        let pushed = (self.regs.status - Status::BREAK) | Status::UNUSED;
        self.push(bus, pushed.bits());
        self.regs.status.insert(Status::INTERRUPT_DISABLE);

        self.regs.pc = self.read16(bus, vector);
    }
}
