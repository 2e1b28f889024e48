use std::rc::Rc;

use super::fixed_prg_offset;

/// Mapper 0: no bank switching.
///
/// NROM-128 carries one 16 KiB bank, which shows up at both 0x8000 and
/// 0xC000. NROM-256 fills the whole window with its 32 KiB.
#[derive(Clone)]
pub struct NromPrg {
    prg: Rc<[u8]>,
}

impl NromPrg {
    pub(super) fn new(prg: Rc<[u8]>) -> Self {
        Self { prg }
    }

    pub(super) fn peek(&self, addr: u16) -> u8 {
        self.prg[fixed_prg_offset(&self.prg, addr)]
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        log::trace!("NROM ignores write 0x{value:02X} to 0x{addr:04X}");
    }
}
