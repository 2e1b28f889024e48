use super::ADDRESS_SPACE;

/// A device that claims an inclusive range of the 16-bit address space.
///
/// The bus hands devices absolute addresses; each device is responsible for
/// turning them into offsets into its own storage. `peek` must never change
/// device state, so tooling can inspect memory without disturbing it.
pub trait MappedDevice {
    /// First address claimed, inclusive.
    fn start(&self) -> u16;

    /// Last address claimed, inclusive.
    fn end(&self) -> u16;

    /// CPU read. Devices with read side effects override this; plain
    /// memory just peeks.
    fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn peek(&self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);

    /// Short label used in bus diagnostics.
    fn name(&self) -> &str;

    fn contains(&self, addr: u16) -> bool {
        (self.start()..=self.end()).contains(&addr)
    }
}

/// Flat RAM backing every address of its range.
#[derive(Clone, Debug)]
pub struct Ram {
    name: &'static str,
    start: u16,
    data: Vec<u8>,
}

impl Ram {
    /// RAM covering `start..=end`, zero filled.
    ///
    /// Panics if the range is reversed.
    pub fn new(start: u16, end: u16) -> Self {
        assert!(
            start <= end,
            "ram range reversed: 0x{start:04X}-0x{end:04X}"
        );
        Self {
            name: "ram",
            start,
            data: vec![0; (end - start) as usize + 1],
        }
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl MappedDevice for Ram {
    fn start(&self) -> u16 {
        self.start
    }

    fn end(&self) -> u16 {
        self.start + (self.data.len() - 1) as u16
    }

    fn peek(&self, addr: u16) -> u8 {
        self.data[(addr - self.start) as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[(addr - self.start) as usize] = value;
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// One page of RAM repeated across a larger range.
///
/// Models incomplete address decoding: every mirror aliases the same cells,
/// so a write through any copy is visible through all of them.
#[derive(Clone, Debug)]
pub struct MirroredRam {
    name: &'static str,
    start: u16,
    end: u16,
    page: Vec<u8>,
}

impl MirroredRam {
    /// `count` copies of a `page_size` byte page starting at `start`.
    ///
    /// Panics if the page is empty or the mirrors run past 0xFFFF; either
    /// is a wiring bug.
    pub fn new(start: u16, page_size: usize, count: usize) -> Self {
        assert!(
            page_size > 0 && count > 0,
            "mirrored ram needs a non-empty page and at least one copy"
        );
        let last = start as usize + page_size * count - 1;
        assert!(
            last < ADDRESS_SPACE,
            "mirrored ram at 0x{start:04X} ({count} x 0x{page_size:X}) runs past 0xFFFF"
        );
        Self {
            name: "mirrored ram",
            start,
            end: last as u16,
            page: vec![0; page_size],
        }
    }

    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page.len()
    }

    #[inline]
    fn offset(&self, addr: u16) -> usize {
        (addr - self.start) as usize % self.page.len()
    }
}

impl MappedDevice for MirroredRam {
    fn start(&self) -> u16 {
        self.start
    }

    fn end(&self) -> u16 {
        self.end
    }

    fn peek(&self, addr: u16) -> u8 {
        self.page[self.offset(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        let offset = self.offset(addr);
        self.page[offset] = value;
    }

    fn name(&self) -> &str {
        self.name
    }
}
