//! # ARM7TDMI
//!
//! Decoder and disassembler for both instruction sets, plus the pieces of
//! execution needed to give data processing a meaning: condition codes,
//! the barrel shifter and the ALU flag engine.
//!
//! | Module             | Role                                      |
//! |--------------------|-------------------------------------------|
//! | [`arm`]            | 32-bit instruction set                    |
//! | [`thumb`]          | 16-bit instruction set                    |
//! | [`instruction`]    | State-independent wrapper and listings    |
//! | [`barrel_shifter`] | Operand2 shifts and rotated immediates    |
//! | [`alu`]            | Result and N/Z/C/V of the 16 operations   |
//! | [`arm7tdmi`]       | Fetch/decode loop over a [`MemoryBus`]    |
//!
//! [`MemoryBus`]: crate::bus::MemoryBus

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_wrap)]
pub mod alu;
pub mod arm;

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::module_name_repetitions)]
pub mod arm7tdmi;

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[allow(clippy::cast_possible_wrap)]
pub mod barrel_shifter;
pub mod condition;

#[allow(clippy::cast_possible_truncation)]
pub mod flags;

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::module_name_repetitions)]
pub mod instruction;
pub mod psr;
pub mod registers;
pub mod swi;
pub mod thumb;
