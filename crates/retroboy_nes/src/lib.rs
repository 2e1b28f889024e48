pub mod cpu;
pub mod machine;

pub use cpu::{Bus, Cpu, Status, TraceLine};
pub use machine::{
    Cartridge, CartridgeError, MappedDevice, MemoryBus, Mirroring, MirroredRam, Ram,
};

/// Fixed address of the non-maskable interrupt vector.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Fixed address of the reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Fixed address of the IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the hardware stack page (0x0100–0x01FF).
pub const STACK_BASE: u16 = 0x0100;
