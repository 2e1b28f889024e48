use std::collections::BTreeMap;

use super::{MappedDevice, ADDRESS_SPACE};
use crate::cpu::Bus;

/// Address-range router between the CPU and its devices.
///
/// Every address is owned by at most one device. Registering a device over
/// addresses that already have an owner moves them to the newcomer and logs
/// a warning; the earlier device keeps whatever addresses it still owns.
pub struct MemoryBus {
    devices: Vec<Box<dyn MappedDevice>>,
    /// Index into `devices` for every address.
    owners: Vec<Option<u16>>,
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            owners: vec![None; ADDRESS_SPACE],
        }
    }

    /// Claim the device's declared range for it.
    ///
    /// Returns the device's index on this bus. Panics if the device reports
    /// a reversed range.
    pub fn map_device(&mut self, device: Box<dyn MappedDevice>) -> usize {
        let (start, end) = (device.start(), device.end());
        assert!(
            start <= end,
            "device {} has a reversed range 0x{start:04X}-0x{end:04X}",
            device.name()
        );
        let index = u16::try_from(self.devices.len()).unwrap_or_else(|_| {
            panic!("device table full, cannot map {}", device.name())
        });

        // Previous owner -> (first, last) address taken from it.
        let mut overridden: BTreeMap<u16, (u16, u16)> = BTreeMap::new();
        for addr in start..=end {
            let slot = &mut self.owners[addr as usize];
            if let Some(prev) = *slot {
                overridden
                    .entry(prev)
                    .and_modify(|range| range.1 = addr)
                    .or_insert((addr, addr));
            }
            *slot = Some(index);
        }
        for (prev, (lo, hi)) in overridden {
            log::warn!(
                "{new} at 0x{start:04X}-0x{end:04X} overrides {old} at 0x{lo:04X}-0x{hi:04X}",
                new = device.name(),
                old = self.devices[prev as usize].name(),
            );
        }

        log::debug!(
            "mapped {} at 0x{start:04X}-0x{end:04X}",
            device.name()
        );
        self.devices.push(device);
        index as usize
    }

    /// Whether some device currently claims `addr`.
    pub fn is_mapped(&self, addr: u16) -> bool {
        self.owners[addr as usize].is_some()
    }

    /// Whether every address of the 64 KiB space is claimed.
    pub fn fully_mapped(&self) -> bool {
        self.owners.iter().all(Option::is_some)
    }

    /// Name of the device answering for `addr`, if any.
    pub fn owner_name(&self, addr: u16) -> Option<&str> {
        self.owners[addr as usize].map(|index| self.devices[index as usize].name())
    }

    /// Read through the owning device. `peek` selects the side-effect free
    /// path used by tooling.
    pub fn read_byte(&mut self, addr: u16, peek: bool) -> u8 {
        if peek {
            return self.device(addr).peek(addr);
        }
        let index = self.owner(addr);
        self.devices[index].read(addr)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        let index = self.owner(addr);
        self.devices[index].write(addr, value);
    }

    fn owner(&self, addr: u16) -> usize {
        match self.owners[addr as usize] {
            Some(index) => index as usize,
            None => panic!("bus access to unmapped address 0x{addr:04X}"),
        }
    }

    fn device(&self, addr: u16) -> &dyn MappedDevice {
        self.devices[self.owner(addr)].as_ref()
    }
}

impl Bus for MemoryBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_byte(addr, false)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value);
    }

    fn peek(&self, addr: u16) -> u8 {
        self.device(addr).peek(addr)
    }
}
