use super::super::{Cpu, Status};

impl Cpu {
    pub(super) fn exec_flag(&mut self, flag: Status, value: bool) -> u8 {
        self.regs.set_flag(flag, value);
        0
    }

    /// NOP, documented or not. Never touches the bus beyond its operand
    /// bytes. The absolute,X variants pay the page-cross penalty like a read.
    pub(super) fn exec_nop(&mut self) -> u8 {
        1
    }

    /// Fallback for undocumented opcodes: burn the table's cycles only.
    pub(super) fn exec_illegal(&mut self) -> u8 {
        log::trace!(
            "undocumented opcode 0x{:02X} at pc=0x{:04X}",
            self.opcode,
            self.regs.pc.wrapping_sub(1)
        );
        0
    }
}
