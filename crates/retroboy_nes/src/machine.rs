mod bus;
mod cartridge;
mod device;
pub mod wiring;

pub use bus::MemoryBus;
pub use cartridge::{
    Cartridge, CartridgeError, CnromChr, CnromPrg, CpuMapper, FixedChr, MapperKind, Mirroring,
    NromPrg, PpuMapper, UxromPrg,
};
pub use device::{MappedDevice, MirroredRam, Ram};

/// Size of the CPU address space.
pub const ADDRESS_SPACE: usize = 0x10000;

#[cfg(test)]
mod tests;
