//! # Register File
//!
//! - **R0-R12**: General purpose
//! - **R13 (SP)**: Stack pointer (by convention)
//! - **R14 (LR)**: Link register (return address)
//! - **R15 (PC)**: Program counter

use serde::{Deserialize, Serialize};

/// Stack Pointer register index.
pub const REG_SP: u32 = 0xD;

/// Link Register index (return address for subroutines).
pub const REG_LR: u32 = 0xE;

/// Program Counter register index.
pub const REG_PROGRAM_COUNTER: u32 = 0xF;

/// The 16 general-purpose registers visible to the CPU.
///
/// The decoder never touches this: it belongs to whoever drives execution.
/// Register indexes are masked to 4 bits, so any `u32` index is accepted.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers([u32; 16]);

impl Registers {
    #[must_use]
    pub const fn program_counter(&self) -> u32 {
        self.0[REG_PROGRAM_COUNTER as usize]
    }

    pub const fn set_program_counter(&mut self, new_value: u32) {
        self.0[REG_PROGRAM_COUNTER as usize] = new_value;
    }

    pub const fn advance_program_counter(&mut self, bytes: u32) {
        let pc = REG_PROGRAM_COUNTER as usize;
        self.0[pc] = self.0[pc].wrapping_add(bytes);
    }

    pub const fn set_register_at(&mut self, reg: u32, new_value: u32) {
        self.0[(reg & 0xF) as usize] = new_value;
    }

    #[must_use]
    pub const fn register_at(&self, reg: u32) -> u32 {
        self.0[(reg & 0xF) as usize]
    }
}

impl From<[u32; 16]> for Registers {
    fn from(values: [u32; 16]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_program_counter() {
        let mut registers = Registers::default();
        registers.set_program_counter(0x0800_0000);
        registers.advance_program_counter(4);
        assert_eq!(registers.program_counter(), 0x0800_0004);
        assert_eq!(registers.register_at(REG_PROGRAM_COUNTER), 0x0800_0004);
    }

    #[test]
    fn check_register_index_is_masked() {
        let mut registers = Registers::default();
        registers.set_register_at(REG_SP, 0x0300_7F00);
        assert_eq!(registers.register_at(0x1D), 0x0300_7F00);
    }
}
