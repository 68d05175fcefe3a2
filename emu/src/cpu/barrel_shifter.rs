//! # Barrel Shifter
//!
//! Produces the second ALU operand and its carry-out, from either a rotated
//! 8-bit immediate or a register value passed through one of the shifts.
//!
//! ```text
//! Immediate operand:   |_rotate_|______imm8______|   value = imm8 ROR (rotate * 2)
//! Register operand:    |___shift____|typ|0|__Rm__|   shift amount from imm5
//!                      |__Rs__|0|typ|1|__Rm__|       shift amount from Rs[7:0]
//! ```
//!
//! Encoded immediate shift amounts have three special cases: `LSR #0` and
//! `ASR #0` mean a shift by 32, and `ROR #0` means `RRX` (rotate right by one
//! through the carry flag). Register supplied amounts have no special cases:
//! an amount of 0 leaves both value and carry untouched.

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;

/// The second ALU operand with the carry-out of the shifter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedOperand {
    pub value: u32,
    pub carry_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    Lsl,
    Lsr,
    Asr,
    Ror,
}

impl ShiftKind {
    /// Picks the kind from the 2-bit `typ` field of an encoding.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Self::Lsl,
            0b01 => Self::Lsr,
            0b10 => Self::Asr,
            _ => Self::Ror,
        }
    }

    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lsl => "LSL",
            Self::Lsr => "LSR",
            Self::Asr => "ASR",
            Self::Ror => "ROR",
        }
    }
}

/// A shift with its effective amount already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    Lsl(u32),
    Lsr(u32),
    Asr(u32),
    Ror(u32),
    /// Rotate right by one, shifting the carry flag into bit 31.
    Rrx,
}

impl Shift {
    /// Resolves a shift whose amount is encoded as a 5-bit immediate.
    #[must_use]
    pub const fn from_immediate(kind: ShiftKind, amount: u32) -> Self {
        let amount = amount & 0x1F;
        match (kind, amount) {
            (ShiftKind::Lsl, _) => Self::Lsl(amount),
            (ShiftKind::Lsr, 0) => Self::Lsr(32),
            (ShiftKind::Lsr, _) => Self::Lsr(amount),
            (ShiftKind::Asr, 0) => Self::Asr(32),
            (ShiftKind::Asr, _) => Self::Asr(amount),
            (ShiftKind::Ror, 0) => Self::Rrx,
            (ShiftKind::Ror, _) => Self::Ror(amount),
        }
    }

    /// Resolves a shift whose amount comes from the bottom byte of a register.
    #[must_use]
    pub const fn from_register(kind: ShiftKind, register_value: u32) -> Self {
        let amount = register_value & 0xFF;
        match kind {
            ShiftKind::Lsl => Self::Lsl(amount),
            ShiftKind::Lsr => Self::Lsr(amount),
            ShiftKind::Asr => Self::Asr(amount),
            ShiftKind::Ror => Self::Ror(amount),
        }
    }

    /// True for `LSL #0`, the encoding of an unshifted register.
    #[must_use]
    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Lsl(0))
    }

    #[must_use]
    pub fn apply(self, value: u32, carry_in: bool) -> ShiftedOperand {
        shift(self, value, carry_in)
    }
}

/// Runs `value` through the barrel shifter.
#[must_use]
pub fn shift(shift: Shift, value: u32, carry_in: bool) -> ShiftedOperand {
    let (value, carry_out) = match shift {
        Shift::Lsl(0) | Shift::Lsr(0) | Shift::Asr(0) | Shift::Ror(0) => (value, carry_in),
        Shift::Lsl(amount @ 1..=31) => (value << amount, value.get_bit((32 - amount) as u8)),
        Shift::Lsl(32) => (0, value.get_bit(0)),
        Shift::Lsl(_) => (0, false),
        Shift::Lsr(amount @ 1..=31) => (value >> amount, value.get_bit((amount - 1) as u8)),
        Shift::Lsr(32) => (0, value.get_bit(31)),
        Shift::Lsr(_) => (0, false),
        Shift::Asr(amount @ 1..=31) => (
            ((value as i32) >> amount) as u32,
            value.get_bit((amount - 1) as u8),
        ),
        Shift::Asr(_) => {
            let sign = value.get_bit(31);
            (if sign { u32::MAX } else { 0 }, sign)
        }
        Shift::Ror(amount) => match amount % 32 {
            0 => (value, value.get_bit(31)),
            amount => (
                value.rotate_right(amount),
                value.get_bit((amount - 1) as u8),
            ),
        },
        Shift::Rrx => ((u32::from(carry_in) << 31) | (value >> 1), value.get_bit(0)),
    };

    ShiftedOperand { value, carry_out }
}

/// Value of an 8-bit immediate rotated right by twice `rotate`.
#[must_use]
pub const fn rotate_immediate(immediate: u32, rotate: u32) -> u32 {
    (immediate & 0xFF).rotate_right((rotate & 0xF) * 2)
}

/// Rotated immediate operand. With no rotation the carry passes through,
/// otherwise it is bit 31 of the result.
#[must_use]
pub const fn immediate_operand(immediate: u32, rotate: u32, carry_in: bool) -> ShiftedOperand {
    let value = rotate_immediate(immediate, rotate);
    let carry_out = if rotate & 0xF == 0 {
        carry_in
    } else {
        value >> 31 == 1
    };

    ShiftedOperand { value, carry_out }
}
