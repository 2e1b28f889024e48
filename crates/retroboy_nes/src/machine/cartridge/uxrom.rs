use std::cell::Cell;
use std::rc::Rc;

use super::PRG_BANK_SIZE;

/// Mapper 2: switchable 16 KiB bank at 0x8000, last bank fixed at 0xC000.
///
/// Any write to 0x8000-0xFFFF selects the lower bank. The register value is
/// wrapped to the number of banks present before it is stored.
#[derive(Clone)]
pub struct UxromPrg {
    prg: Rc<[u8]>,
    bank: Rc<Cell<u8>>,
}

impl UxromPrg {
    pub(super) fn new(prg: Rc<[u8]>, bank: Rc<Cell<u8>>) -> Self {
        Self { prg, bank }
    }

    fn banks(&self) -> usize {
        self.prg.len() / PRG_BANK_SIZE
    }

    pub(super) fn peek(&self, addr: u16) -> u8 {
        let bank = if addr < 0xC000 {
            self.bank.get() as usize % self.banks()
        } else {
            self.banks() - 1
        };
        self.prg[bank * PRG_BANK_SIZE + (addr & 0x3FFF) as usize]
    }

    pub(super) fn write(&mut self, _addr: u16, value: u8) {
        let bank = (value as usize % self.banks()) as u8;
        log::debug!("UxROM bank select 0x{value:02X} -> bank {bank}");
        self.bank.set(bank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banked_prg(banks: usize) -> Rc<[u8]> {
        let mut prg = vec![0; banks * PRG_BANK_SIZE];
        for (i, chunk) in prg.chunks_mut(PRG_BANK_SIZE).enumerate() {
            chunk.fill(i as u8);
        }
        Rc::from(prg)
    }

    #[test]
    fn lower_window_switches_and_upper_stays_on_last_bank() {
        let bank = Rc::new(Cell::new(0));
        let mut mapper = UxromPrg::new(banked_prg(8), Rc::clone(&bank));

        assert_eq!(mapper.peek(0x8000), 0);
        assert_eq!(mapper.peek(0xC000), 7);

        mapper.write(0x8000, 3);
        assert_eq!(bank.get(), 3);
        assert_eq!(mapper.peek(0x8000), 3);
        assert_eq!(mapper.peek(0xBFFF), 3);
        assert_eq!(mapper.peek(0xC000), 7);
        assert_eq!(mapper.peek(0xFFFF), 7);

        // Writes in the fixed window select banks too.
        mapper.write(0xFFF0, 5);
        assert_eq!(mapper.peek(0x8000), 5);
    }

    #[test]
    fn bank_select_wraps_to_present_banks() {
        let bank = Rc::new(Cell::new(0));
        let mut mapper = UxromPrg::new(banked_prg(4), bank);

        mapper.write(0x8000, 0x0E);
        assert_eq!(mapper.peek(0x8000), 2);
        mapper.write(0x8000, 0xFF);
        assert_eq!(mapper.peek(0x8000), 3);
    }
}
