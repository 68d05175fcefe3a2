//! # Decoded Instructions and Listings
//!
//! [`DecodedInstruction`] wraps either instruction set so that a driving
//! loop can decode and render without caring about the current state.
//! [`Disassembly`] is one listing line: address, raw word and text.
//!
//! Rendering conventions shared by both sets live here too: operands are
//! joined by `,` with no spaces, registers are `R0`..`R15`, immediates up
//! to `0xFFFF` are decimal and larger ones are hex.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::arm::instructions::ArmModeInstruction;
use crate::cpu::barrel_shifter::Shift;
use crate::cpu::psr::CpuState;
use crate::cpu::thumb::instruction::ThumbModeInstruction;
use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodedInstruction {
    Arm(ArmModeInstruction),
    Thumb(ThumbModeInstruction),
}

impl DecodedInstruction {
    /// Decodes `word` in the given state. THUMB uses the low halfword only.
    #[must_use]
    pub fn decode(state: CpuState, word: u32) -> Self {
        match state {
            CpuState::Arm => Self::Arm(ArmModeInstruction::from(word)),
            CpuState::Thumb => Self::Thumb(ThumbModeInstruction::from(word as u16)),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Arm(instruction) => instruction.disassembler(),
            Self::Thumb(instruction) => instruction.disassembler(),
        }
    }

    #[must_use]
    pub const fn diagnostic(&self) -> Option<DecodeError> {
        match self {
            Self::Arm(instruction) => instruction.diagnostic(),
            Self::Thumb(instruction) => instruction.diagnostic(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> CpuState {
        match self {
            Self::Arm(_) => CpuState::Arm,
            Self::Thumb(_) => CpuState::Thumb,
        }
    }

    /// Address worth annotating in a listing: branch destinations and
    /// PC-relative data.
    #[must_use]
    pub const fn target(&self, address: u32) -> Option<u32> {
        match self {
            Self::Arm(instruction) => instruction.branch_target(address),
            Self::Thumb(instruction) => match instruction.branch_target(address) {
                Some(target) => Some(target),
                None => instruction.pc_relative_target(address),
            },
        }
    }
}

/// Assembler text of `instruction`.
#[must_use]
pub fn render(instruction: &DecodedInstruction) -> String {
    instruction.render()
}

/// One line of a disassembly listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disassembly {
    pub address: u32,
    pub raw: u32,
    pub instruction: DecodedInstruction,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
}

impl Disassembly {
    #[must_use]
    pub fn new(address: u32, raw: u32, instruction: DecodedInstruction) -> Self {
        Self {
            address,
            raw,
            text: instruction.render(),
            target: instruction.target(address),
            instruction,
        }
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instruction.state() {
            CpuState::Arm => write!(f, "0x{:08x}: {:08x} {}", self.address, self.raw, self.text)?,
            CpuState::Thumb => write!(f, "0x{:08x}: {:04x} {}", self.address, self.raw, self.text)?,
        }
        if let Some(target) = self.target {
            write!(f, " ; 0x{target:08x}")?;
        }
        Ok(())
    }
}

pub(crate) fn register(index: u32) -> String {
    format!("R{index}")
}

/// Names of the registers set in `list`, lowest first.
pub(crate) fn register_names(list: u16) -> Vec<String> {
    (0..16_u8)
        .filter(|&index| list.get_bit(index))
        .map(|index| register(u32::from(index)))
        .collect()
}

/// `{R0,R2,R5}`.
pub(crate) fn register_list(list: u16) -> String {
    braces(&register_names(list))
}

pub(crate) fn braces(names: &[String]) -> String {
    format!("{{{}}}", names.join(","))
}

pub(crate) fn immediate(value: u32) -> String {
    if value <= 0xFFFF {
        format!("#{value}")
    } else {
        format!("#0x{value:08X}")
    }
}

pub(crate) fn shift(shift: Shift) -> String {
    match shift {
        Shift::Lsl(amount) => format!("LSL #{amount}"),
        Shift::Lsr(amount) => format!("LSR #{amount}"),
        Shift::Asr(amount) => format!("ASR #{amount}"),
        Shift::Ror(amount) => format!("ROR #{amount}"),
        Shift::Rrx => "RRX".to_string(),
    }
}

pub(crate) fn join_operands(mnemonic: &str, operands: &[String]) -> String {
    format!("{mnemonic} {}", operands.join(","))
}
