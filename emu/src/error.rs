//! Error taxonomy shared by the decoder, the memory bus and the front end.
//!
//! Decoding itself never fails: odd encodings become `Undefined`, `Invalid`
//! or `Unsupported` variants. [`DecodeError`] is the reporting form of those
//! variants, built with `diagnostic()` so that a driving loop can log them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Instruction classes that exist in the encoding space but are not
/// implemented by this processor (it has no coprocessor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsupportedClass {
    CoprocessorDataTransfer,
    CoprocessorDataOperation,
    CoprocessorRegisterTransfer,
}

impl UnsupportedClass {
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::CoprocessorDataTransfer => "LDC/STC",
            Self::CoprocessorDataOperation => "CDP",
            Self::CoprocessorRegisterTransfer => "MRC/MCR",
        }
    }
}

impl fmt::Display for UnsupportedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CoprocessorDataTransfer => "coprocessor data transfer",
            Self::CoprocessorDataOperation => "coprocessor data operation",
            Self::CoprocessorRegisterTransfer => "coprocessor register transfer",
        };
        f.write_str(name)
    }
}

/// Bit patterns that can not be turned into a meaningful instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidReason {
    /// Condition field 0b1111 is reserved on ARMv4T.
    ReservedCondition,
    /// MSR with transfer type 41: register to full PSR.
    MsrRegisterToPsr,
    /// PSR transfer whose bits 16..=21 match no known form.
    UnknownPsrTransfer { transfer_type: u32 },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedCondition => f.write_str("reserved condition NV"),
            Self::MsrRegisterToPsr => f.write_str("MSR register to PSR"),
            Self::UnknownPsrTransfer { transfer_type } => {
                write!(f, "unknown PSR transfer type {transfer_type}")
            }
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported {class} in 0x{raw:08X}")]
    UnsupportedFormat { raw: u32, class: UnsupportedClass },

    #[error("invalid encoding 0x{raw:08X}: {reason}")]
    InvalidEncoding { raw: u32, reason: InvalidReason },

    #[error("undefined instruction 0x{raw:08X}")]
    Undefined { raw: u32 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    #[error("address 0x{address:08X} is outside the memory map")]
    OutOfRange { address: u32 },

    #[error("address 0x{address:08X} is not aligned to {width} bytes")]
    AlignmentViolation { address: u32, width: u32 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("condition code {0} has no entry in the condition table")]
    ConditionOutOfRange(u8),

    #[error("SWI number 0x{0:X} has no BIOS function")]
    SwiOutOfRange(u32),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("cartridge is {0} bytes, a header needs at least 192")]
    TooShort(usize),

    #[error("header field `{0}` is not valid ASCII")]
    NotAscii(&'static str),

    #[error("fixed header byte is 0x{0:02X}, expected 0x96")]
    WrongFixedValue(u8),

    #[error("header checksum is 0x{expected:02X} but the header sums to 0x{actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

#[derive(Debug, Error)]
pub enum EmuError {
    #[error(transparent)]
    Bus(#[from] BusError),

    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
}
