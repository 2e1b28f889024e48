use super::super::{Bus, Cpu, Status};

impl Cpu {
    /// Binary add with carry. The D flag is honoured as storage only;
    /// no BCD correction is applied.
    pub(super) fn exec_adc<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.fetch_operand(bus);
        self.add_with_carry(value);
        1
    }

    /// Subtract with borrow, computed as A + !M + C.
    pub(super) fn exec_sbc<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.fetch_operand(bus);
        self.add_with_carry(value ^ 0xFF);
        1
    }

    fn add_with_carry(&mut self, value: u8) {
        let a = self.regs.a as u16;
        let m = value as u16;
        let sum = a + m + self.regs.carry() as u16;

        self.regs.set_flag(Status::CARRY, sum > 0xFF);
        self.regs
            .set_flag(Status::OVERFLOW, (!(a ^ m) & (a ^ sum)) & 0x0080 != 0);
        self.regs.a = sum as u8;
        self.regs.set_zn(self.regs.a);
    }

    pub(super) fn exec_and<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.a &= self.fetch_operand(bus);
        self.regs.set_zn(self.regs.a);
        1
    }

    pub(super) fn exec_ora<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.a |= self.fetch_operand(bus);
        self.regs.set_zn(self.regs.a);
        1
    }

    pub(super) fn exec_eor<B: Bus>(&mut self, bus: &mut B) -> u8 {
        self.regs.a ^= self.fetch_operand(bus);
        self.regs.set_zn(self.regs.a);
        1
    }

    /// BIT: Z from A & M, N and V copied straight from bits 7 and 6 of M.
    pub(super) fn exec_bit<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.fetch_operand(bus);
        self.regs.set_flag(Status::ZERO, self.regs.a & value == 0);
        self.regs.set_flag(Status::NEGATIVE, value & 0x80 != 0);
        self.regs.set_flag(Status::OVERFLOW, value & 0x40 != 0);
        0
    }

    /// CMP/CPX/CPY: register minus operand, result discarded.
    ///
    /// `extra` is what the instruction returns for the page-cross rule:
    /// CMP has indexed forms that pay the penalty, CPX/CPY do not.
    pub(super) fn exec_compare<B: Bus>(&mut self, bus: &mut B, register: u8, extra: u8) -> u8 {
        let value = self.fetch_operand(bus);
        let diff = register.wrapping_sub(value);
        self.regs.set_flag(Status::CARRY, register >= value);
        self.regs.set_zn(diff);
        extra
    }
}
