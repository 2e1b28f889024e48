//! iNES cartridge images and their mapper devices.
//!
//! A [`Cartridge`] owns the PRG-ROM, the CHR-ROM or CHR-RAM and the bank
//! select register. Mapper devices are cheap handles into that state: the
//! CPU-side and PPU-side halves of one board share the register through the
//! cartridge rather than pointing at each other.

mod cnrom;
mod nrom;
mod uxrom;

use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;

use super::MappedDevice;

pub use cnrom::{CnromChr, CnromPrg};
pub use nrom::NromPrg;
pub use uxrom::UxromPrg;

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const MAGIC: [u8; 4] = *b"NES\x1A";

pub(crate) const PRG_BANK_SIZE: usize = 0x4000;
pub(crate) const CHR_BANK_SIZE: usize = 0x2000;

/// CPU window claimed by every supported board.
const PRG_START: u16 = 0x8000;
const PRG_END: u16 = 0xFFFF;
/// PPU pattern table window.
const CHR_START: u16 = 0x0000;
const CHR_END: u16 = 0x1FFF;

/// Reasons an image is rejected. Nothing is built when loading fails.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("missing iNES magic \"NES\\x1A\"")]
    BadMagic,
    #[error("header declares zero PRG-ROM banks")]
    NoPrgBanks,
    #[error("unsupported mapper {0}")]
    UnsupportedMapper(u8),
    #[error("unsupported TV system {0} (only NTSC is supported)")]
    UnsupportedTvSystem(u8),
    #[error("image shorter than the 16 byte iNES header")]
    TruncatedHeader,
    #[error("PRG-ROM truncated: expected {expected} bytes, found {actual}")]
    TruncatedPrg { expected: usize, actual: usize },
    #[error("CHR-ROM truncated: expected {expected} bytes, found {actual}")]
    TruncatedChr { expected: usize, actual: usize },
    #[error("failed to read cartridge image")]
    Io(#[from] std::io::Error),
}

/// Nametable arrangement hard-wired on the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
}

/// Supported boards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MapperKind {
    Nrom,
    Uxrom,
    Cnrom,
}

impl MapperKind {
    fn from_id(id: u8) -> Result<Self, CartridgeError> {
        match id {
            0 => Ok(MapperKind::Nrom),
            2 => Ok(MapperKind::Uxrom),
            3 => Ok(MapperKind::Cnrom),
            other => Err(CartridgeError::UnsupportedMapper(other)),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            MapperKind::Nrom => 0,
            MapperKind::Uxrom => 2,
            MapperKind::Cnrom => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MapperKind::Nrom => "NROM",
            MapperKind::Uxrom => "UxROM",
            MapperKind::Cnrom => "CNROM",
        }
    }
}

/// Decoded 16 byte iNES header.
#[derive(Clone, Copy, Debug)]
struct Header {
    prg_banks: u8,
    chr_banks: u8,
    mirroring: Mirroring,
    extended_ram: bool,
    trainer: bool,
    mapper: MapperKind,
}

impl Header {
    fn parse(data: &[u8]) -> Result<Self, CartridgeError> {
        let bytes = data
            .get(..HEADER_LEN)
            .ok_or(CartridgeError::TruncatedHeader)?;
        if bytes[0..4] != MAGIC {
            return Err(CartridgeError::BadMagic);
        }

        let prg_banks = bytes[4];
        if prg_banks == 0 {
            return Err(CartridgeError::NoPrgBanks);
        }
        let chr_banks = bytes[5];
        let flags6 = bytes[6];
        let flags7 = bytes[7];

        let tv_system = bytes[10] & 0x03;
        if tv_system != 0 {
            return Err(CartridgeError::UnsupportedTvSystem(tv_system));
        }

        let mapper_id = (flags6 >> 4) | (flags7 & 0xF0);
        let mapper = MapperKind::from_id(mapper_id)?;

        Ok(Self {
            prg_banks,
            chr_banks,
            mirroring: if flags6 & 0x01 != 0 {
                Mirroring::Vertical
            } else {
                Mirroring::Horizontal
            },
            extended_ram: flags6 & 0x02 != 0,
            trainer: flags6 & 0x04 != 0,
            mapper,
        })
    }
}

/// A parsed cartridge image plus the state its mapper devices share.
pub struct Cartridge {
    header: Header,
    prg: Rc<[u8]>,
    chr: Rc<RefCell<Vec<u8>>>,
    /// The board's one bank select register: PRG bank on UxROM, CHR bank on
    /// CNROM, unused on NROM.
    bank_select: Rc<Cell<u8>>,
}

impl Cartridge {
    /// Read and parse an iNES file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Parse an in-memory iNES image.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        let header = Header::parse(data)?;

        let mut offset = HEADER_LEN;
        if header.trainer {
            log::warn!("iNES trainer present; skipping {TRAINER_LEN} bytes");
            offset += TRAINER_LEN;
        }

        let prg_len = header.prg_banks as usize * PRG_BANK_SIZE;
        let prg = data
            .get(offset..offset + prg_len)
            .ok_or_else(|| CartridgeError::TruncatedPrg {
                expected: prg_len,
                actual: data.len().saturating_sub(offset),
            })?;
        offset += prg_len;

        let chr = if header.chr_banks == 0 {
            vec![0; CHR_BANK_SIZE]
        } else {
            let chr_len = header.chr_banks as usize * CHR_BANK_SIZE;
            data.get(offset..offset + chr_len)
                .ok_or_else(|| CartridgeError::TruncatedChr {
                    expected: chr_len,
                    actual: data.len().saturating_sub(offset),
                })?
                .to_vec()
        };

        log::info!(
            "loaded {} cartridge: {} PRG x16K, {} CHR x8K{}, {:?} mirroring",
            header.mapper.name(),
            header.prg_banks,
            header.chr_banks,
            if header.chr_banks == 0 { " (CHR-RAM)" } else { "" },
            header.mirroring,
        );

        Ok(Self {
            header,
            prg: Rc::from(prg),
            chr: Rc::new(RefCell::new(chr)),
            bank_select: Rc::new(Cell::new(0)),
        })
    }

    pub fn mapper(&self) -> MapperKind {
        self.header.mapper
    }

    pub fn mapper_id(&self) -> u8 {
        self.header.mapper.id()
    }

    pub fn mirroring(&self) -> Mirroring {
        self.header.mirroring
    }

    /// Whether the header advertises battery or work RAM at 0x6000-0x7FFF.
    pub fn has_extended_ram(&self) -> bool {
        self.header.extended_ram
    }

    /// Number of 16 KiB PRG-ROM banks.
    pub fn prg_banks(&self) -> u8 {
        self.header.prg_banks
    }

    /// Number of 8 KiB CHR-ROM banks; 0 when the board has CHR-RAM.
    pub fn chr_banks(&self) -> u8 {
        self.header.chr_banks
    }

    pub fn chr_is_ram(&self) -> bool {
        self.header.chr_banks == 0
    }

    /// Current value of the bank select register.
    pub fn bank_select(&self) -> u8 {
        self.bank_select.get()
    }

    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    /// CPU-side mapper device for 0x8000-0xFFFF.
    pub fn cpu_mapper(&self) -> CpuMapper {
        let prg = Rc::clone(&self.prg);
        match self.header.mapper {
            MapperKind::Nrom => CpuMapper::Nrom(NromPrg::new(prg)),
            MapperKind::Uxrom => {
                CpuMapper::Uxrom(UxromPrg::new(prg, Rc::clone(&self.bank_select)))
            }
            MapperKind::Cnrom => CpuMapper::Cnrom(CnromPrg::new(
                prg,
                Rc::clone(&self.bank_select),
                self.chr_bank_count(),
            )),
        }
    }

    /// PPU-side mapper device for the pattern tables at 0x0000-0x1FFF.
    pub fn ppu_mapper(&self) -> PpuMapper {
        let chr = ChrMemory {
            data: Rc::clone(&self.chr),
            writable: self.chr_is_ram(),
        };
        match self.header.mapper {
            MapperKind::Nrom => PpuMapper::Nrom(FixedChr::new(chr)),
            MapperKind::Uxrom => PpuMapper::Uxrom(FixedChr::new(chr)),
            MapperKind::Cnrom => {
                PpuMapper::Cnrom(CnromChr::new(chr, Rc::clone(&self.bank_select)))
            }
        }
    }

    fn chr_bank_count(&self) -> u8 {
        self.header.chr_banks.max(1)
    }
}

/// Handle to the cartridge's CHR storage.
#[derive(Clone)]
pub struct ChrMemory {
    data: Rc<RefCell<Vec<u8>>>,
    writable: bool,
}

impl ChrMemory {
    fn peek(&self, offset: usize) -> u8 {
        let data = self.data.borrow();
        data[offset % data.len()]
    }

    /// Writes land only on CHR-RAM; CHR-ROM ignores them.
    fn write(&self, offset: usize, value: u8) {
        if !self.writable {
            log::trace!("ignored write to CHR-ROM offset 0x{offset:04X}");
            return;
        }
        let mut data = self.data.borrow_mut();
        let len = data.len();
        data[offset % len] = value;
    }

    fn banks(&self) -> usize {
        self.data.borrow().len() / CHR_BANK_SIZE
    }
}

/// Unbanked 8 KiB pattern table window (NROM, UxROM).
#[derive(Clone)]
pub struct FixedChr {
    chr: ChrMemory,
}

impl FixedChr {
    fn new(chr: ChrMemory) -> Self {
        Self { chr }
    }
}

impl MappedDevice for FixedChr {
    fn start(&self) -> u16 {
        CHR_START
    }

    fn end(&self) -> u16 {
        CHR_END
    }

    fn peek(&self, addr: u16) -> u8 {
        self.chr.peek((addr & 0x1FFF) as usize)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.chr.write((addr & 0x1FFF) as usize, value);
    }

    fn name(&self) -> &str {
        "chr"
    }
}

/// CPU-side half of a board.
pub enum CpuMapper {
    Nrom(NromPrg),
    Uxrom(UxromPrg),
    Cnrom(CnromPrg),
}

/// PPU-side half of a board.
pub enum PpuMapper {
    Nrom(FixedChr),
    Uxrom(FixedChr),
    Cnrom(CnromChr),
}

impl MappedDevice for CpuMapper {
    fn start(&self) -> u16 {
        PRG_START
    }

    fn end(&self) -> u16 {
        PRG_END
    }

    fn peek(&self, addr: u16) -> u8 {
        match self {
            CpuMapper::Nrom(m) => m.peek(addr),
            CpuMapper::Uxrom(m) => m.peek(addr),
            CpuMapper::Cnrom(m) => m.peek(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match self {
            CpuMapper::Nrom(m) => m.write(addr, value),
            CpuMapper::Uxrom(m) => m.write(addr, value),
            CpuMapper::Cnrom(m) => m.write(addr, value),
        }
    }

    fn name(&self) -> &str {
        match self {
            CpuMapper::Nrom(_) => "NROM prg",
            CpuMapper::Uxrom(_) => "UxROM prg",
            CpuMapper::Cnrom(_) => "CNROM prg",
        }
    }
}

impl MappedDevice for PpuMapper {
    fn start(&self) -> u16 {
        CHR_START
    }

    fn end(&self) -> u16 {
        CHR_END
    }

    fn peek(&self, addr: u16) -> u8 {
        match self {
            PpuMapper::Nrom(m) | PpuMapper::Uxrom(m) => m.peek(addr),
            PpuMapper::Cnrom(m) => m.peek(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match self {
            PpuMapper::Nrom(m) | PpuMapper::Uxrom(m) => m.write(addr, value),
            PpuMapper::Cnrom(m) => m.write(addr, value),
        }
    }

    fn name(&self) -> &str {
        match self {
            PpuMapper::Nrom(_) => "NROM chr",
            PpuMapper::Uxrom(_) => "UxROM chr",
            PpuMapper::Cnrom(_) => "CNROM chr",
        }
    }
}

/// Offset into PRG-ROM for a CPU address on an unbanked board: a single
/// 16 KiB bank appears in both halves of the window.
fn fixed_prg_offset(prg: &[u8], addr: u16) -> usize {
    let mask = if prg.len() > PRG_BANK_SIZE { 0x7FFF } else { 0x3FFF };
    (addr & mask) as usize
}
