use std::cell::Cell;
use std::rc::Rc;

use super::{fixed_prg_offset, ChrMemory, CHR_BANK_SIZE};
use crate::machine::MappedDevice;

/// Mapper 3, CPU side: fixed PRG; writes select the 8 KiB CHR bank.
#[derive(Clone)]
pub struct CnromPrg {
    prg: Rc<[u8]>,
    chr_bank: Rc<Cell<u8>>,
    chr_banks: u8,
}

impl CnromPrg {
    pub(super) fn new(prg: Rc<[u8]>, chr_bank: Rc<Cell<u8>>, chr_banks: u8) -> Self {
        Self {
            prg,
            chr_bank,
            chr_banks,
        }
    }

    pub(super) fn peek(&self, addr: u16) -> u8 {
        self.prg[fixed_prg_offset(&self.prg, addr)]
    }

    pub(super) fn write(&mut self, _addr: u16, value: u8) {
        let bank = value % self.chr_banks;
        log::debug!("CNROM CHR bank select 0x{value:02X} -> bank {bank}");
        self.chr_bank.set(bank);
    }
}

/// Mapper 3, PPU side: the pattern tables show the CHR bank the CPU side
/// last selected.
#[derive(Clone)]
pub struct CnromChr {
    chr: ChrMemory,
    chr_bank: Rc<Cell<u8>>,
}

impl CnromChr {
    pub(super) fn new(chr: ChrMemory, chr_bank: Rc<Cell<u8>>) -> Self {
        Self { chr, chr_bank }
    }

    fn offset(&self, addr: u16) -> usize {
        let bank = self.chr_bank.get() as usize % self.chr.banks().max(1);
        bank * CHR_BANK_SIZE + (addr & 0x1FFF) as usize
    }
}

impl MappedDevice for CnromChr {
    fn start(&self) -> u16 {
        0x0000
    }

    fn end(&self) -> u16 {
        0x1FFF
    }

    fn peek(&self, addr: u16) -> u8 {
        self.chr.peek(self.offset(addr))
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.chr.write(self.offset(addr), value);
    }

    fn name(&self) -> &str {
        "CNROM chr"
    }
}
