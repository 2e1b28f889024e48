use bitflags::bitflags;

bitflags! {
    /// Processor status register (P).
    ///
    /// Layout, MSB first: N V U B D I Z C. `UNUSED` has no latch on real
    /// hardware and always reads back as 1; `BREAK` only exists in copies of
    /// P pushed to the stack.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Status: u8 {
        const CARRY = 1 << 0;
        const ZERO = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL = 1 << 3;
        const BREAK = 1 << 4;
        const UNUSED = 1 << 5;
        const OVERFLOW = 1 << 6;
        const NEGATIVE = 1 << 7;
    }
}

/// Programmer-visible 6502 registers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// Offset into the stack page at 0x0100; wraps in both directions.
    pub sp: u8,
    pub pc: u16,
    pub status: Status,
}

impl Registers {
    /// Raw value of P as software would observe it.
    #[inline]
    pub fn p(&self) -> u8 {
        self.status.bits()
    }

    /// Overwrite P from a raw byte. Every bit is representable.
    #[inline]
    pub fn set_p(&mut self, value: u8) {
        self.status = Status::from_bits_retain(value);
    }

    /// Update Z and N from an 8-bit result.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.status.set(Status::ZERO, value == 0);
        self.status.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    #[inline]
    pub fn flag(&self, flag: Status) -> bool {
        self.status.contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.status.set(flag, value);
    }

    /// Carry as 0 or 1, for arithmetic.
    #[inline]
    pub fn carry(&self) -> u8 {
        self.status.contains(Status::CARRY) as u8
    }
}
