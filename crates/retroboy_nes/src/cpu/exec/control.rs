use super::super::addressing::page_crossed;
use super::super::{Bus, Cpu, Status};

impl Cpu {
    /// Conditional relative branch.
    ///
    /// A taken branch costs one extra cycle, and one more if the target is
    /// on a different page than the instruction that follows the branch.
    pub(super) fn branch(&mut self, taken: bool) -> u8 {
        if taken {
            self.cycles += 1;
            let target = self.regs.pc.wrapping_add(self.addr_rel);
            if page_crossed(target, self.regs.pc) {
                self.cycles += 1;
            }
            self.regs.pc = target;
        }
        0
    }

    pub(super) fn exec_jmp(&mut self) -> u8 {
        self.regs.pc = self.addr_abs;
        0
    }

    /// JSR pushes the address of its own last byte; RTS adds one back.
    pub(super) fn exec_jsr<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let ret = self.regs.pc.wrapping_sub(1);
        self.push16(bus, ret);
        self.regs.pc = self.addr_abs;
        0
    }

    pub(super) fn exec_rts<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.pc = self.pop16(bus).wrapping_add(1);
        0
    }

    pub(super) fn exec_rti<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let pulled = Status::from_bits_retain(self.pop(bus));
        self.regs.status = (pulled - Status::BREAK) | Status::UNUSED;
        self.regs.pc = self.pop16(bus);
        0
    }

    /// Software interrupt.
    ///
    /// The immediate addressing mode has already stepped PC over the padding
    /// byte, so the pushed return address is the BRK address plus two. P is
    /// pushed with B set, then I is set and PC is loaded from 0xFFFE.
    pub(super) fn exec_brk<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.push16(bus, self.regs.pc);
        let pushed = self.regs.status | Status::BREAK | Status::UNUSED;
        self.push(bus, pushed.bits());
        self.regs.status.insert(Status::INTERRUPT_DISABLE);
        self.regs.pc = self.read16(bus, crate::IRQ_VECTOR);
        0
    }
}
