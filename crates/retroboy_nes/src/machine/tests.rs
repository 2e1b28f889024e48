use once_cell::sync::OnceCell;

use super::wiring::{ppu_bus, reference_bus};
use super::*;
use crate::cpu::{Bus, Cpu, TraceLine};

/// Build an iNES image. PRG bank `n` is filled with `n`, CHR bank `n` with
/// `0x80 | n`, so tests can tell which bank a read hit.
fn ines(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
    let mut image = vec![b'N', b'E', b'S', 0x1A, prg_banks, chr_banks, flags6, flags7];
    image.resize(16, 0);
    for bank in 0..prg_banks {
        image.extend(std::iter::repeat(bank).take(0x4000));
    }
    for bank in 0..chr_banks {
        image.extend(std::iter::repeat(0x80 | bank).take(0x2000));
    }
    image
}

/// Single bank NROM image with `program` at 0x8000 and the reset vector
/// pointing at it.
fn nrom_with_program(program: &[u8]) -> Vec<u8> {
    let mut image = ines(1, 1, 0, 0);
    image[16..16 + program.len()].copy_from_slice(program);
    // 0xFFFC maps to PRG offset 0x3FFC.
    image[16 + 0x3FFC] = 0x00;
    image[16 + 0x3FFD] = 0x80;
    image
}

/// Device whose CPU reads clear a latch, like a status register.
struct Latch {
    value: u8,
    reads: usize,
}

impl MappedDevice for Latch {
    fn start(&self) -> u16 {
        0x2002
    }

    fn end(&self) -> u16 {
        0x2002
    }

    fn read(&mut self, _addr: u16) -> u8 {
        self.reads += 1;
        std::mem::take(&mut self.value)
    }

    fn peek(&self, _addr: u16) -> u8 {
        self.value
    }

    fn write(&mut self, _addr: u16, value: u8) {
        self.value = value;
    }

    fn name(&self) -> &str {
        "latch"
    }
}

#[test]
fn ram_covers_its_range() {
    let mut ram = Ram::new(0x6000, 0x7FFF);
    assert_eq!(ram.len(), 0x2000);
    assert_eq!(ram.end(), 0x7FFF);

    ram.write(0x7FFF, 0x42);
    assert_eq!(ram.peek(0x7FFF), 0x42);
    assert_eq!(ram.peek(0x6000), 0x00);
}

#[test]
fn mirrored_ram_aliases_every_copy() {
    let mut ram = MirroredRam::new(0x0000, 0x0800, 4);
    assert_eq!(ram.end(), 0x1FFF);

    ram.write(0x0123, 0x5A);
    for copy in 0..4u16 {
        assert_eq!(ram.peek(0x0123 + copy * 0x0800), 0x5A);
    }

    // A write through the last mirror lands in the same cell.
    ram.write(0x1923, 0xA5);
    assert_eq!(ram.peek(0x0123), 0xA5);
}

#[test]
#[should_panic(expected = "runs past 0xFFFF")]
fn mirrored_ram_outside_address_space_panics() {
    MirroredRam::new(0xF000, 0x0800, 4);
}

#[test]
#[should_panic(expected = "unmapped address 0x5000")]
fn unmapped_access_panics() {
    let mut bus = MemoryBus::new();
    bus.map_device(Box::new(Ram::new(0x0000, 0x3FFF)));
    bus.read(0x5000);
}

#[test]
fn later_registration_wins_overlap() {
    let mut bus = MemoryBus::new();
    bus.map_device(Box::new(Ram::new(0x0000, 0x0FFF).named("low")));
    bus.map_device(Box::new(Ram::new(0x0800, 0x17FF).named("high")));

    assert_eq!(bus.owner_name(0x07FF), Some("low"));
    assert_eq!(bus.owner_name(0x0800), Some("high"));
    assert_eq!(bus.owner_name(0x17FF), Some("high"));
    assert_eq!(bus.owner_name(0x1800), None);
    assert!(!bus.is_mapped(0x1800));

    bus.write(0x0900, 0x77);
    assert_eq!(bus.read(0x0900), 0x77);
    // The shadowed part of "low" is still there, just unreachable.
    bus.write(0x0100, 0x11);
    assert_eq!(bus.read_byte(0x0100, true), 0x11);
}

#[test]
fn peek_leaves_read_side_effects_alone() {
    let mut bus = MemoryBus::new();
    bus.map_device(Box::new(Ram::new(0x0000, 0xFFFF)));
    bus.map_device(Box::new(Latch { value: 0, reads: 0 }));

    bus.write(0x2002, 0x80);
    assert_eq!(bus.peek(0x2002), 0x80);
    assert_eq!(bus.read_byte(0x2002, true), 0x80);

    let lines = Cpu::disassemble(&bus, 0x2000, 0x2004);
    assert!(!lines.is_empty());
    assert_eq!(bus.peek(0x2002), 0x80);

    assert_eq!(bus.read(0x2002), 0x80);
    assert_eq!(bus.read(0x2002), 0x00);
}

#[test]
fn rejects_bad_magic() {
    let mut image = ines(1, 1, 0, 0);
    image[3] = 0x1B;
    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CartridgeError::BadMagic)
    ));
}

#[test]
fn rejects_zero_prg_banks() {
    let image = ines(0, 1, 0, 0);
    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CartridgeError::NoPrgBanks)
    ));
}

#[test]
fn rejects_unknown_mappers() {
    // MMC1 (1): low nibble from flags 6.
    let image = ines(1, 1, 0x10, 0);
    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CartridgeError::UnsupportedMapper(1))
    ));

    // Mapper 0x42: high nibble from flags 7.
    let image = ines(1, 1, 0x20, 0x40);
    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CartridgeError::UnsupportedMapper(0x42))
    ));
}

#[test]
fn rejects_pal_images() {
    let mut image = ines(1, 1, 0, 0);
    image[10] = 0x02;
    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CartridgeError::UnsupportedTvSystem(2))
    ));
}

#[test]
fn rejects_truncated_images() {
    assert!(matches!(
        Cartridge::from_bytes(b"NES\x1A"),
        Err(CartridgeError::TruncatedHeader)
    ));

    let mut image = ines(2, 1, 0, 0);
    image.truncate(16 + 0x4000);
    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CartridgeError::TruncatedPrg {
            expected: 0x8000,
            actual: 0x4000
        })
    ));

    let mut image = ines(1, 2, 0, 0);
    image.pop();
    assert!(matches!(
        Cartridge::from_bytes(&image),
        Err(CartridgeError::TruncatedChr {
            expected: 0x4000,
            actual: 0x3FFF
        })
    ));
}

#[test]
fn load_reports_missing_file() {
    let err = Cartridge::load("/nonexistent/cartridge.nes").err();
    assert!(matches!(err, Some(CartridgeError::Io(_))));
}

#[test]
fn header_flags_are_decoded() {
    let cart = Cartridge::from_bytes(&ines(2, 0, 0x23, 0x00)).expect("valid image");

    assert_eq!(cart.mapper_id(), 2);
    assert_eq!(cart.mapper(), MapperKind::Uxrom);
    assert_eq!(cart.mirroring(), Mirroring::Vertical);
    assert!(cart.has_extended_ram());
    assert_eq!(cart.prg_banks(), 2);
    assert_eq!(cart.chr_banks(), 0);
    assert!(cart.chr_is_ram());

    let cart = Cartridge::from_bytes(&ines(1, 1, 0x00, 0x00)).expect("valid image");
    assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    assert!(!cart.has_extended_ram());
}

#[test]
fn trainer_is_skipped() {
    let mut image = ines(1, 1, 0x04, 0);
    let trainer = vec![0xFF; 512];
    image.splice(16..16, trainer);

    let cart = Cartridge::from_bytes(&image).expect("valid image");
    assert_eq!(cart.prg()[0], 0x00);
    assert_eq!(cart.prg().len(), 0x4000);
}

#[test]
fn nrom_single_bank_reads_identically_in_both_windows() {
    let mut image = ines(1, 1, 0, 0);
    for (i, byte) in image[16..16 + 0x4000].iter_mut().enumerate() {
        *byte = (i * 7) as u8;
    }
    let cart = Cartridge::from_bytes(&image).expect("valid image");
    let bus = reference_bus(&cart);

    for offset in (0..0x4000u16).step_by(0x101) {
        assert_eq!(bus.peek(0x8000 + offset), bus.peek(0xC000 + offset));
    }
    assert_eq!(bus.peek(0xC001), 7);
}

#[test]
fn uxrom_switches_lower_window_only() {
    let cart = Cartridge::from_bytes(&ines(8, 0, 0x20, 0)).expect("valid image");
    let mut bus = reference_bus(&cart);

    assert_eq!(bus.read(0x8000), 0);
    assert_eq!(bus.read(0xC000), 7);

    bus.write(0x9234, 5);
    assert_eq!(cart.bank_select(), 5);
    assert_eq!(bus.read(0x8000), 5);
    assert_eq!(bus.read(0xBFFF), 5);
    assert_eq!(bus.read(0xC000), 7);
    assert_eq!(bus.read(0xFFFF), 7);

    bus.write(0x8000, 0x0B);
    assert_eq!(bus.read(0x8000), 3);
}

#[test]
fn cnrom_bank_select_is_shared_with_ppu_side() {
    let cart = Cartridge::from_bytes(&ines(1, 4, 0x30, 0)).expect("valid image");
    let mut cpu_bus = reference_bus(&cart);
    let mut ppu = ppu_bus(&cart);

    assert_eq!(ppu.read(0x0000), 0x80);

    cpu_bus.write(0x8000, 2);
    assert_eq!(ppu.read(0x0000), 0x82);
    assert_eq!(ppu.read(0x1FFF), 0x82);

    // CHR-ROM ignores writes.
    ppu.write(0x0010, 0x00);
    assert_eq!(ppu.read(0x0010), 0x82);

    // PRG is fixed and mirrored.
    assert_eq!(cpu_bus.read(0x8000), cpu_bus.read(0xC000));
}

#[test]
fn chr_ram_is_writable_and_shared() {
    let cart = Cartridge::from_bytes(&ines(1, 0, 0, 0)).expect("valid image");
    let mut ppu = ppu_bus(&cart);

    ppu.write(0x1234, 0x99);
    assert_eq!(ppu.read(0x1234), 0x99);

    // A second handle sees the same CHR-RAM.
    let mut other = ppu_bus(&cart);
    assert_eq!(other.read(0x1234), 0x99);

    // Nametables mirror every 2 KiB.
    ppu.write(0x2005, 0x44);
    assert_eq!(ppu.read(0x2805), 0x44);
    assert_eq!(ppu.read(0x3805), 0x44);
}

#[test]
fn reference_bus_claims_everything() {
    let cart = Cartridge::from_bytes(&ines(1, 1, 0, 0)).expect("valid image");
    let mut bus = reference_bus(&cart);

    assert!(bus.fully_mapped());
    assert_eq!(bus.owner_name(0x0000), Some("internal ram"));
    assert_eq!(bus.owner_name(0x3FFF), Some("ppu registers"));
    assert_eq!(bus.owner_name(0x6000), Some("work ram"));
    assert_eq!(bus.owner_name(0x8000), Some("NROM prg"));

    bus.write(0x0042, 0x12);
    assert_eq!(bus.read(0x0842), 0x12);
    assert_eq!(bus.read(0x1842), 0x12);
    bus.write(0x2001, 0x34);
    assert_eq!(bus.read(0x3FF9), 0x34);
}

#[test]
fn runs_a_program_from_cartridge() {
    // 8000: LDX #$00
    // 8002: INX
    // 8003: STX $0200
    // 8006: CPX #$05
    // 8008: BNE $8002
    // 800A: JMP $800A
    let program = [
        0xA2, 0x00, 0xE8, 0x8E, 0x00, 0x02, 0xE0, 0x05, 0xD0, 0xF8, 0x4C, 0x0A, 0x80,
    ];
    let cart = Cartridge::from_bytes(&nrom_with_program(&program)).expect("valid image");
    let mut bus = reference_bus(&cart);
    let mut cpu = Cpu::new();

    cpu.reset(&mut bus);
    assert_eq!(cpu.regs.pc, 0x8000);
    while !cpu.complete() {
        cpu.clock(&mut bus);
    }

    let mut guard = 0;
    while cpu.regs.pc != 0x800A {
        cpu.step(&mut bus);
        guard += 1;
        assert!(guard < 100, "program did not reach its idle loop");
    }

    assert_eq!(cpu.regs.x, 5);
    assert_eq!(bus.read(0x0200), 5);
    // Internal RAM mirror.
    assert_eq!(bus.read(0x0A00), 5);
    assert!(cpu.regs.flag(crate::Status::ZERO));

    let lines = Cpu::disassemble(&bus, 0x8000, 0x800A);
    assert_eq!(lines[&0x8008], "$8008: BNE $8002 {REL}");
    assert_eq!(lines[&0x800A], "$800A: JMP $800A {ABS}");
}

static NESTEST_ROM: OnceCell<Vec<u8>> = OnceCell::new();

fn load_nestest_file(filename: &str) -> Vec<u8> {
    use std::path::PathBuf;

    let candidates = [
        PathBuf::from("assets/roms/nes").join(filename),
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/roms/nes")
            .join(filename),
    ];

    for path in &candidates {
        if let Ok(data) = std::fs::read(path) {
            return data;
        }
    }

    panic!("{filename} not found. Tried: {candidates:?}")
}

fn nestest_rom() -> &'static [u8] {
    NESTEST_ROM.get_or_init(|| load_nestest_file("nestest.nes"))
}

/// Run nestest in automation mode (entry 0xC000) and compare every
/// documented-opcode line against the published log.
#[test]
#[ignore]
fn nestest_matches_reference_log() {
    let log = String::from_utf8(load_nestest_file("nestest.log")).expect("log is ASCII");
    let cart = Cartridge::from_bytes(nestest_rom()).expect("nestest.nes parses");
    let mut bus = reference_bus(&cart);
    let mut cpu = Cpu::new();

    cpu.reset(&mut bus);
    while !cpu.complete() {
        cpu.clock(&mut bus);
    }
    cpu.regs.pc = 0xC000;
    cpu.regs.set_p(0x24);
    cpu.set_clock_count(7);

    let mut checked = 0usize;
    for (number, line) in log.lines().enumerate() {
        let expected = TraceLine::parse_nestest(line)
            .unwrap_or_else(|| panic!("unparsable log line {}: {line}", number + 1));
        if expected.assembly.starts_with('*') {
            // Undocumented opcode section starts here.
            break;
        }

        let actual = cpu.trace_line(&bus);
        assert!(
            actual.same_state(&expected),
            "mismatch at log line {}\nexpected: {line}\n  actual: {actual}",
            number + 1
        );

        cpu.step(&mut bus);
        checked += 1;
    }

    assert!(checked > 5000, "only {checked} lines compared");
    // Official opcode tests report their result in 0x0002.
    assert_eq!(bus.read(0x0002), 0x00);
}
