use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let result = self.fetch_operand(bus).wrapping_add(1);
        bus.write(self.addr_abs, result);
        self.regs.set_zn(result);
        0
    }

    pub(super) fn exec_dec<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let result = self.fetch_operand(bus).wrapping_sub(1);
        bus.write(self.addr_abs, result);
        self.regs.set_zn(result);
        0
    }

    pub(super) fn exec_inx(&mut self) -> u8 {
        self.regs.x = self.regs.x.wrapping_add(1);
        self.regs.set_zn(self.regs.x);
        0
    }

    pub(super) fn exec_iny(&mut self) -> u8 {
        self.regs.y = self.regs.y.wrapping_add(1);
        self.regs.set_zn(self.regs.y);
        0
    }

    pub(super) fn exec_dex(&mut self) -> u8 {
        self.regs.x = self.regs.x.wrapping_sub(1);
        self.regs.set_zn(self.regs.x);
        0
    }

    pub(super) fn exec_dey(&mut self) -> u8 {
        self.regs.y = self.regs.y.wrapping_sub(1);
        self.regs.set_zn(self.regs.y);
        0
    }
}
