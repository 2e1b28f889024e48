use super::super::{Bus, Cpu, Status};

impl Cpu {
    pub(super) fn exec_asl<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.fetch_operand(bus);
        let result = value << 1;
        self.regs.set_flag(Status::CARRY, value & 0x80 != 0);
        self.regs.set_zn(result);
        self.write_back(bus, result);
        0
    }

    pub(super) fn exec_lsr<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.fetch_operand(bus);
        let result = value >> 1;
        self.regs.set_flag(Status::CARRY, value & 0x01 != 0);
        self.regs.set_zn(result);
        self.write_back(bus, result);
        0
    }

    /// Rotate left through carry: old C enters bit 0, bit 7 leaves into C.
    pub(super) fn exec_rol<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.fetch_operand(bus);
        let result = (value << 1) | self.regs.carry();
        self.regs.set_flag(Status::CARRY, value & 0x80 != 0);
        self.regs.set_zn(result);
        self.write_back(bus, result);
        0
    }

    /// Rotate right through carry: old C enters bit 7, bit 0 leaves into C.
    pub(super) fn exec_ror<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.fetch_operand(bus);
        let result = (self.regs.carry() << 7) | (value >> 1);
        self.regs.set_flag(Status::CARRY, value & 0x01 != 0);
        self.regs.set_zn(result);
        self.write_back(bus, result);
        0
    }
}
