use super::super::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_lda<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.a = self.fetch_operand(bus);
        self.regs.set_zn(self.regs.a);
        1
    }

    pub(super) fn exec_ldx<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.x = self.fetch_operand(bus);
        self.regs.set_zn(self.regs.x);
        1
    }

    pub(super) fn exec_ldy<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.y = self.fetch_operand(bus);
        self.regs.set_zn(self.regs.y);
        1
    }

    /// STA/STX/STY. Stores never touch the flags.
    pub(super) fn exec_store<B: Bus>(&mut self, bus: &mut B, value: u8) -> u8 {
        bus.write(self.addr_abs, value);
        0
    }

    pub(super) fn exec_tax(&mut self) -> u8 {
        self.regs.x = self.regs.a;
        self.regs.set_zn(self.regs.x);
        0
    }

    pub(super) fn exec_tay(&mut self) -> u8 {
        self.regs.y = self.regs.a;
        self.regs.set_zn(self.regs.y);
        0
    }

    pub(super) fn exec_tsx(&mut self) -> u8 {
        self.regs.x = self.regs.sp;
        self.regs.set_zn(self.regs.x);
        0
    }

    pub(super) fn exec_txa(&mut self) -> u8 {
        self.regs.a = self.regs.x;
        self.regs.set_zn(self.regs.a);
        0
    }

    /// TXS is the one transfer that leaves Z/N alone.
    pub(super) fn exec_txs(&mut self) -> u8 {
        self.regs.sp = self.regs.x;
        0
    }

    pub(super) fn exec_tya(&mut self) -> u8 {
        self.regs.a = self.regs.y;
        self.regs.set_zn(self.regs.a);
        0
    }
}
