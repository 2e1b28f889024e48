use super::super::{Bus, Cpu, Status};

impl Cpu {
    pub(super) fn exec_pha<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.push(bus, self.regs.a);
        0
    }

    /// PHP always pushes B and U set; the live register is unchanged.
    pub(super) fn exec_php<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let pushed = self.regs.status | Status::BREAK | Status::UNUSED;
        self.push(bus, pushed.bits());
        0
    }

    pub(super) fn exec_pla<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.a = self.pop(bus);
        self.regs.set_zn(self.regs.a);
        0
    }

    /// PLP restores every flag except B, which has no latch, and U, which
    /// always reads as 1.
    pub(super) fn exec_plp<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let pulled = Status::from_bits_retain(self.pop(bus));
        self.regs.status = (pulled - Status::BREAK) | Status::UNUSED;
        0
    }
}
