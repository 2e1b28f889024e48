//! Stock bus layouts for hosts that do not need anything custom.
//!
//! The CPU layout claims all 64 KiB and the PPU layout its whole 14-bit
//! space, so a CPU can be reset against them straight away. Hosts replace placeholder ranges (the PPU and APU
//! registers) by mapping their own devices on top afterwards.

use super::{Cartridge, MemoryBus, MirroredRam, Ram};

/// 2 KiB of internal RAM, mirrored through 0x0000-0x1FFF.
const INTERNAL_RAM_PAGE: usize = 0x0800;
/// Eight PPU registers, mirrored through 0x2000-0x3FFF.
const PPU_REGISTER_PAGE: usize = 8;
/// 2 KiB of nametable RAM on the PPU side, mirrored through 0x2000-0x3FFF.
const NAMETABLE_PAGE: usize = 0x0800;

/// CPU bus for a cartridge:
///
/// | range         | device                                   |
/// |---------------|------------------------------------------|
/// | 0x0000-0x1FFF | internal RAM, 2 KiB x4                   |
/// | 0x2000-0x3FFF | PPU register placeholder, 8 bytes x1024  |
/// | 0x4000-0x5FFF | APU/IO placeholder RAM                   |
/// | 0x6000-0x7FFF | work RAM                                 |
/// | 0x8000-0xFFFF | cartridge PRG mapper                     |
pub fn reference_bus(cartridge: &Cartridge) -> MemoryBus {
    let mut bus = MemoryBus::new();
    bus.map_device(Box::new(
        MirroredRam::new(0x0000, INTERNAL_RAM_PAGE, 4).named("internal ram"),
    ));
    bus.map_device(Box::new(
        MirroredRam::new(0x2000, PPU_REGISTER_PAGE, 0x2000 / PPU_REGISTER_PAGE)
            .named("ppu registers"),
    ));
    bus.map_device(Box::new(Ram::new(0x4000, 0x5FFF).named("io")));
    if !cartridge.has_extended_ram() {
        log::debug!("cartridge has no extended RAM flag; mapping work RAM anyway");
    }
    bus.map_device(Box::new(Ram::new(0x6000, 0x7FFF).named("work ram")));
    bus.map_device(Box::new(cartridge.cpu_mapper()));
    bus
}

/// PPU bus for a cartridge: pattern tables from the cartridge's CHR mapper
/// at 0x0000-0x1FFF, nametable RAM mirrored through 0x2000-0x3FFF.
pub fn ppu_bus(cartridge: &Cartridge) -> MemoryBus {
    let mut bus = MemoryBus::new();
    bus.map_device(Box::new(cartridge.ppu_mapper()));
    bus.map_device(Box::new(
        MirroredRam::new(0x2000, NAMETABLE_PAGE, 4).named("nametables"),
    ));
    bus
}
