//! # THUMB Instruction Set (16-bit)
//!
//! Nineteen formats, told apart by the top bits of the halfword. Only
//! conditional branches carry a condition. Encodings outside the formats
//! decode to `Undefined`.

pub mod alu_instructions;
pub mod disassembler;

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_possible_wrap)]
#[allow(clippy::cast_lossless)]
pub mod instruction;
pub mod mode;
