mod alu;
mod control;
mod incdec;
mod ld;
mod shift;
mod stack;
mod system;

use super::{Bus, Cpu, Op, Status};

impl Cpu {
    /// Execute one operation after its addressing mode has run.
    ///
    /// Returns 1 if the operation accepts the page-cross penalty requested
    /// by its addressing mode. Read instructions do; stores and
    /// read-modify-write instructions already include the worst case in
    /// their base cycle count and return 0.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) -> u8 {
        match op {
            // Arithmetic and logic.
            Op::Adc => self.exec_adc(bus),
            Op::Sbc => self.exec_sbc(bus),
            Op::And => self.exec_and(bus),
            Op::Ora => self.exec_ora(bus),
            Op::Eor => self.exec_eor(bus),
            Op::Bit => self.exec_bit(bus),
            Op::Cmp => self.exec_compare(bus, self.regs.a, 1),
            Op::Cpx => self.exec_compare(bus, self.regs.x, 0),
            Op::Cpy => self.exec_compare(bus, self.regs.y, 0),

            // Shifts and rotates, on A or memory.
            Op::Asl => self.exec_asl(bus),
            Op::Lsr => self.exec_lsr(bus),
            Op::Rol => self.exec_rol(bus),
            Op::Ror => self.exec_ror(bus),

            // Increments and decrements.
            Op::Inc => self.exec_inc(bus),
            Op::Dec => self.exec_dec(bus),
            Op::Inx => self.exec_inx(),
            Op::Iny => self.exec_iny(),
            Op::Dex => self.exec_dex(),
            Op::Dey => self.exec_dey(),

            // Loads, stores and transfers.
            Op::Lda => self.exec_lda(bus),
            Op::Ldx => self.exec_ldx(bus),
            Op::Ldy => self.exec_ldy(bus),
            Op::Sta => self.exec_store(bus, self.regs.a),
            Op::Stx => self.exec_store(bus, self.regs.x),
            Op::Sty => self.exec_store(bus, self.regs.y),
            Op::Tax => self.exec_tax(),
            Op::Tay => self.exec_tay(),
            Op::Tsx => self.exec_tsx(),
            Op::Txa => self.exec_txa(),
            Op::Txs => self.exec_txs(),
            Op::Tya => self.exec_tya(),

            // Branches.
            Op::Bcc => self.branch(!self.regs.flag(Status::CARRY)),
            Op::Bcs => self.branch(self.regs.flag(Status::CARRY)),
            Op::Bne => self.branch(!self.regs.flag(Status::ZERO)),
            Op::Beq => self.branch(self.regs.flag(Status::ZERO)),
            Op::Bpl => self.branch(!self.regs.flag(Status::NEGATIVE)),
            Op::Bmi => self.branch(self.regs.flag(Status::NEGATIVE)),
            Op::Bvc => self.branch(!self.regs.flag(Status::OVERFLOW)),
            Op::Bvs => self.branch(self.regs.flag(Status::OVERFLOW)),

            // Jumps, subroutines and software interrupt.
            Op::Jmp => self.exec_jmp(),
            Op::Jsr => self.exec_jsr(bus),
            Op::Rts => self.exec_rts(bus),
            Op::Rti => self.exec_rti(bus),
            Op::Brk => self.exec_brk(bus),

            // Stack.
            Op::Pha => self.exec_pha(bus),
            Op::Php => self.exec_php(bus),
            Op::Pla => self.exec_pla(bus),
            Op::Plp => self.exec_plp(bus),

            // Flag set/clear.
            Op::Clc => self.exec_flag(Status::CARRY, false),
            Op::Sec => self.exec_flag(Status::CARRY, true),
            Op::Cli => self.exec_flag(Status::INTERRUPT_DISABLE, false),
            Op::Sei => self.exec_flag(Status::INTERRUPT_DISABLE, true),
            Op::Cld => self.exec_flag(Status::DECIMAL, false),
            Op::Sed => self.exec_flag(Status::DECIMAL, true),
            Op::Clv => self.exec_flag(Status::OVERFLOW, false),

            Op::Nop => self.exec_nop(),
            Op::Xxx => self.exec_illegal(),
        }
    }
}
