//! # Conditional Execution
//!
//! Every ARM instruction carries a condition in bits 31-28. The instruction
//! only takes effect when the condition holds for the current N/Z/C/V flags.
//! THUMB only uses conditions in the conditional branch format (bits 11-8).
//!
//! ```text
//! ┌───────┬────────┬─────────────────────┬────────────────────┐
//! │ Code  │ Suffix │     Meaning         │    Flags Tested    │
//! ├───────┼────────┼─────────────────────┼────────────────────┤
//! │ 0000  │   EQ   │ Equal               │ Z=1                │
//! │ 0001  │   NE   │ Not equal           │ Z=0                │
//! │ 0010  │   CS   │ Unsigned ≥          │ C=1                │
//! │ 0011  │   CC   │ Unsigned <          │ C=0                │
//! │ 0100  │   MI   │ Negative            │ N=1                │
//! │ 0101  │   PL   │ Positive or zero    │ N=0                │
//! │ 0110  │   VS   │ Overflow            │ V=1                │
//! │ 0111  │   VC   │ No overflow         │ V=0                │
//! │ 1000  │   HI   │ Unsigned >          │ C=1 AND Z=0        │
//! │ 1001  │   LS   │ Unsigned ≤          │ C=0 OR Z=1         │
//! │ 1010  │   GE   │ Signed ≥            │ N=V                │
//! │ 1011  │   LT   │ Signed <            │ N≠V                │
//! │ 1100  │   GT   │ Signed >            │ Z=0 AND N=V        │
//! │ 1101  │   LE   │ Signed ≤            │ Z=1 OR N≠V         │
//! │ 1110  │  (AL)  │ Always              │ -                  │
//! │ 1111  │   NV   │ Reserved            │ never decoded      │
//! └───────┴────────┴─────────────────────┴────────────────────┘
//! ```
//!
//! Code `1111` has no [`Condition`] variant: converting it fails with
//! [`LookupError::ConditionOutOfRange`] and the ARM decoder turns such words
//! into an `Invalid` instruction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cpu::flags::StatusFlags;
use crate::error::LookupError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    EQ = 0x0,
    NE = 0x1,
    CS = 0x2,
    CC = 0x3,
    MI = 0x4,
    PL = 0x5,
    VS = 0x6,
    VC = 0x7,
    HI = 0x8,
    LS = 0x9,
    GE = 0xA,
    LT = 0xB,
    GT = 0xC,
    LE = 0xD,
    #[default]
    AL = 0xE,
}

impl Condition {
    const ALL: [Self; 15] = [
        Self::EQ,
        Self::NE,
        Self::CS,
        Self::CC,
        Self::MI,
        Self::PL,
        Self::VS,
        Self::VC,
        Self::HI,
        Self::LS,
        Self::GE,
        Self::LT,
        Self::GT,
        Self::LE,
        Self::AL,
    ];

    /// Whether an instruction guarded by `self` executes under `flags`.
    #[must_use]
    pub const fn evaluate(self, flags: StatusFlags) -> bool {
        let StatusFlags { n, z, c, v } = flags;
        match self {
            Self::EQ => z,
            Self::NE => !z,
            Self::CS => c,
            Self::CC => !c,
            Self::MI => n,
            Self::PL => !n,
            Self::VS => v,
            Self::VC => !v,
            Self::HI => c && !z,
            Self::LS => !c || z,
            Self::GE => n == v,
            Self::LT => n != v,
            Self::GT => !z && n == v,
            Self::LE => z || n != v,
            Self::AL => true,
        }
    }
}

/// Free-function form of [`Condition::evaluate`].
#[must_use]
pub const fn evaluate(code: Condition, flags: StatusFlags) -> bool {
    code.evaluate(flags)
}

impl TryFrom<u8> for Condition {
    type Error = LookupError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(LookupError::ConditionOutOfRange(code))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AL => Ok(()),
            other => write!(f, "{other:?}"),
        }
    }
}
