//! Memory map seen by instruction fetch.
//!
//! | Region      | Start         | End           |
//! |-------------|---------------|---------------|
//! | BIOS        | `0x0000_0000` | `0x0000_3FFF` |
//! | WRAM1       | `0x0200_0000` | `0x0203_FFFF` |
//! | WRAM2       | `0x0300_0000` | `0x0300_7FFF` |
//! | IO          | `0x0400_0000` | `0x0400_03FE` |
//! | Palette RAM | `0x0500_0000` | `0x0500_03FF` |
//! | VRAM        | `0x0600_0000` | `0x0601_7FFF` |
//! | OAM         | `0x0700_0000` | `0x0700_03FF` |
//! | ROM         | `0x0800_0000` | `0x09FF_FFFF` |
//!
//! There are no mirrors: anything else is [`BusError::OutOfRange`].

use std::ops::RangeInclusive;

use crate::error::BusError;

pub const BIOS: RangeInclusive<u32> = 0x0000_0000..=0x0000_3FFF;
pub const WRAM1: RangeInclusive<u32> = 0x0200_0000..=0x0203_FFFF;
pub const WRAM2: RangeInclusive<u32> = 0x0300_0000..=0x0300_7FFF;
pub const IO: RangeInclusive<u32> = 0x0400_0000..=0x0400_03FE;
pub const PALETTE_RAM: RangeInclusive<u32> = 0x0500_0000..=0x0500_03FF;
pub const VRAM: RangeInclusive<u32> = 0x0600_0000..=0x0601_7FFF;
pub const OAM: RangeInclusive<u32> = 0x0700_0000..=0x0700_03FF;
pub const ROM: RangeInclusive<u32> = 0x0800_0000..=0x09FF_FFFF;

/// Byte-addressable memory. Wider reads are little-endian compositions of
/// [`MemoryBus::read_byte`].
pub trait MemoryBus {
    /// # Errors
    ///
    /// [`BusError::OutOfRange`] when `address` is not mapped.
    fn read_byte(&self, address: u32) -> Result<u8, BusError>;

    /// # Errors
    ///
    /// Fails when either byte is not mapped.
    fn read_half_word(&self, address: u32) -> Result<u16, BusError> {
        let low = self.read_byte(address)?;
        let high = self.read_byte(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// # Errors
    ///
    /// Fails when any of the four bytes is not mapped.
    fn read_word(&self, address: u32) -> Result<u32, BusError> {
        let mut bytes = [0; 4];
        for (offset, byte) in (0..).zip(bytes.iter_mut()) {
            *byte = self.read_byte(address.wrapping_add(offset))?;
        }
        Ok(u32::from_le_bytes(bytes))
    }
}

fn region_len(region: &RangeInclusive<u32>) -> usize {
    (region.end() - region.start() + 1) as usize
}

/// One buffer per region plus the cartridge image.
pub struct InternalMemory {
    bios_system_rom: Vec<u8>,
    working_ram: Vec<u8>,
    working_iram: Vec<u8>,
    io: Vec<u8>,
    palette_ram: Vec<u8>,
    video_ram: Vec<u8>,
    object_attributes: Vec<u8>,
    rom: Vec<u8>,
}

impl Default for InternalMemory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InternalMemory {
    /// Zero-filled memory with `rom` loaded at the start of the ROM window.
    #[must_use]
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            bios_system_rom: vec![0; region_len(&BIOS)],
            working_ram: vec![0; region_len(&WRAM1)],
            working_iram: vec![0; region_len(&WRAM2)],
            io: vec![0; region_len(&IO)],
            palette_ram: vec![0; region_len(&PALETTE_RAM)],
            video_ram: vec![0; region_len(&VRAM)],
            object_attributes: vec![0; region_len(&OAM)],
            rom,
        }
    }

    /// Bytes past the end of the image read as the low halfword of the
    /// halfword address, the value left on the cartridge bus.
    fn read_rom(&self, address: u32) -> u8 {
        let offset = address - ROM.start();
        self.rom.get(offset as usize).copied().unwrap_or_else(|| {
            let half_word = (offset >> 1) & 0xFFFF;
            (half_word >> (8 * (offset & 1))) as u8
        })
    }
}

impl MemoryBus for InternalMemory {
    fn read_byte(&self, address: u32) -> Result<u8, BusError> {
        let (buffer, start) = match address {
            a if BIOS.contains(&a) => (&self.bios_system_rom, *BIOS.start()),
            a if WRAM1.contains(&a) => (&self.working_ram, *WRAM1.start()),
            a if WRAM2.contains(&a) => (&self.working_iram, *WRAM2.start()),
            a if IO.contains(&a) => (&self.io, *IO.start()),
            a if PALETTE_RAM.contains(&a) => (&self.palette_ram, *PALETTE_RAM.start()),
            a if VRAM.contains(&a) => (&self.video_ram, *VRAM.start()),
            a if OAM.contains(&a) => (&self.object_attributes, *OAM.start()),
            a if ROM.contains(&a) => return Ok(self.read_rom(a)),
            _ => return Err(BusError::OutOfRange { address }),
        };
        Ok(buffer[(address - start) as usize])
    }
}
