use crate::error::CartridgeError;

const HEADER_LEN: usize = 0xC0;
const FIXED_VALUE: u8 = 0x96;

/// The part of the cartridge header needed to identify a ROM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartridgeHeader {
    rom_entry_point: u32,
    game_title: String,
    game_code: String,
    maker_code: String,
    software_version: u8,
}

impl CartridgeHeader {
    /// Parses the first 192 bytes of `data`.
    ///
    /// # Errors
    ///
    /// Fails on a short image, a bad fixed byte, a checksum mismatch or a
    /// text field that is not ASCII.
    pub fn new(data: &[u8]) -> Result<Self, CartridgeError> {
        let header = data
            .get(..HEADER_LEN)
            .ok_or(CartridgeError::TooShort(data.len()))?;
        execute_checks(header)?;

        Ok(Self {
            rom_entry_point: u32::from_le_bytes([header[0], header[1], header[2], header[3]]),
            game_title: into_ascii_str(&header[0xA0..0xAC], "game title")?,
            game_code: into_ascii_str(&header[0xAC..0xB0], "game code")?,
            maker_code: into_ascii_str(&header[0xB0..0xB2], "maker code")?,
            software_version: header[0xBC],
        })
    }

    /// 32bit ARM branch opcode
    #[must_use]
    pub const fn rom_entry_point(&self) -> u32 {
        self.rom_entry_point
    }

    #[must_use]
    pub fn game_title(&self) -> &str {
        &self.game_title
    }

    #[must_use]
    pub fn game_code(&self) -> &str {
        &self.game_code
    }

    #[must_use]
    pub fn maker_code(&self) -> &str {
        &self.maker_code
    }

    /// Usually 0x00
    #[must_use]
    pub const fn software_version(&self) -> u8 {
        self.software_version
    }
}

fn header_checksum(header: &[u8]) -> u8 {
    header[0xA0..0xBD]
        .iter()
        .fold(0_u8, |acc, &item| acc.wrapping_sub(item))
        .wrapping_sub(0x19)
}

fn execute_checks(header: &[u8]) -> Result<(), CartridgeError> {
    if header[0xB2] != FIXED_VALUE {
        return Err(CartridgeError::WrongFixedValue(header[0xB2]));
    }

    let expected = header[0xBD];
    let actual = header_checksum(header);
    if actual != expected {
        return Err(CartridgeError::ChecksumMismatch { expected, actual });
    }

    Ok(())
}

/// Text fields are NUL padded.
fn into_ascii_str(data: &[u8], field: &'static str) -> Result<String, CartridgeError> {
    if !data.is_ascii() {
        return Err(CartridgeError::NotAscii(field));
    }

    Ok(data
        .iter()
        .take_while(|&&byte| byte != 0)
        .map(|&byte| char::from(byte))
        .collect())
}
