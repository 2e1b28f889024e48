mod addressing;
mod disasm;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod table;
mod trace;

pub use disasm::Decoded;
pub use regs::{Registers, Status};
pub use table::{lookup, AddrMode, Instruction, Op, INSTRUCTIONS};
pub use trace::TraceLine;

/// Abstraction over the CPU-visible address space.
///
/// The interpreter only ever talks to memory through this trait, so tests can
/// run it against a flat 64 KiB array while a real machine plugs in a
/// [`MemoryBus`](crate::machine::MemoryBus) full of mapped devices.
pub trait Bus {
    /// Read a byte as the CPU would, allowing device side effects.
    fn read(&mut self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);

    /// Side-effect free read used by the disassembler and tracer.
    ///
    /// Devices whose reads change state (latches, FIFOs) must return what
    /// `read` would return without performing the mutation.
    fn peek(&self, addr: u16) -> u8;
}

/// MOS 6502 interpreter, stepped one clock cycle at a time.
///
/// All work for an instruction happens on the first cycle it occupies; the
/// remaining cycles only count down so that the host sees correct timing.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Operand value produced by the addressing mode or by `fetch`.
    fetched: u8,
    /// Effective address computed by the addressing mode.
    addr_abs: u16,
    /// Sign-extended branch displacement.
    addr_rel: u16,
    opcode: u8,
    /// Mode of the instruction being executed, so RMW ops know whether to
    /// target A or memory.
    mode: AddrMode,
    /// Cycles left before the next opcode fetch.
    cycles: u8,
    /// Total cycles clocked since construction.
    clock_count: u64,
}

impl Cpu {
    /// Advance the CPU by a single clock cycle.
    ///
    /// When no instruction is in flight the next opcode is fetched, decoded
    /// and executed in full, and the cycle counter is loaded with its cost:
    /// base cycles plus one if both the addressing mode and the operation
    /// ask for it (indexed page crosses on read instructions).
    pub fn clock<B: Bus>(&mut self, bus: &mut B) {
        if self.cycles == 0 {
            self.opcode = self.fetch8(bus);
            self.regs.status.insert(Status::UNUSED);

            let instr = lookup(self.opcode);
            self.mode = instr.mode;
            self.cycles = instr.cycles;

            let mode_extra = self.run_addressing(bus, instr.mode);
            let op_extra = self.execute(bus, instr.op);
            self.cycles += mode_extra & op_extra;

            self.regs.status.insert(Status::UNUSED);
        }

        self.clock_count = self.clock_count.wrapping_add(1);
        self.cycles -= 1;
    }

    /// True when the current instruction (or interrupt entry) has used up
    /// all of its cycles and the next `clock` will fetch a new opcode.
    #[inline]
    pub fn complete(&self) -> bool {
        self.cycles == 0
    }

    /// Clock until the in-flight instruction finishes, starting a new one if
    /// none is in flight. Returns the number of cycles consumed.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let start = self.clock_count;
        loop {
            self.clock(bus);
            if self.complete() {
                break;
            }
        }
        self.clock_count.wrapping_sub(start) as u32
    }

    /// Cycles remaining for the in-flight instruction.
    #[inline]
    pub fn cycles_remaining(&self) -> u8 {
        self.cycles
    }

    /// Total number of cycles clocked so far.
    #[inline]
    pub fn clock_count(&self) -> u64 {
        self.clock_count
    }

    /// Override the running cycle total, e.g. to line up with a reference
    /// trace that starts counting from a non-zero value.
    pub fn set_clock_count(&mut self, count: u64) {
        self.clock_count = count;
    }

    /// Opcode of the most recently started instruction.
    #[inline]
    pub fn opcode(&self) -> u8 {
        self.opcode
    }
}
