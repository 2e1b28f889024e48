use super::{AddrMode, Bus, Cpu, Registers, Status};
use crate::RESET_VECTOR;

/// Stack pointer value after the reset sequence.
pub(super) const SP_AFTER_RESET: u8 = 0xFD;

/// Cycles consumed by the reset sequence.
const RESET_CYCLES: u8 = 8;

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Create a CPU with cleared registers.
    ///
    /// Nothing is read from the bus until [`Cpu::reset`] is called, so a CPU
    /// can be constructed before the bus is fully wired.
    pub fn new() -> Self {
        Self {
            regs: Registers {
                status: Status::UNUSED,
                ..Registers::default()
            },
            fetched: 0,
            addr_abs: 0,
            addr_rel: 0,
            opcode: 0,
            mode: AddrMode::Imp,
            cycles: 0,
            clock_count: 0,
        }
    }

    /// Put the CPU into its known post-reset state.
    ///
    /// PC is loaded from the little-endian RESET vector at 0xFFFC, A/X/Y are
    /// cleared, SP is set to 0xFD and P holds only the unused bit. The
    /// sequence takes 8 cycles.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.read16(bus, RESET_VECTOR);
        self.regs.a = 0;
        self.regs.x = 0;
        self.regs.y = 0;
        self.regs.sp = SP_AFTER_RESET;
        self.regs.status = Status::UNUSED;

        self.addr_rel = 0;
        self.addr_abs = 0;
        self.fetched = 0;
        self.mode = AddrMode::Imp;

        self.cycles = RESET_CYCLES;
    }
}
