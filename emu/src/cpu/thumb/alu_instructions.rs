use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::cpu::arm::alu_instruction::ArmModeAluInstruction;

/// Format 4 operations, `Rd := Rd op Rs`.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub enum ThumbModeAluInstruction {
    And = 0x0,
    Eor = 0x1,
    Lsl = 0x2,
    Lsr = 0x3,
    Asr = 0x4,
    Adc = 0x5,
    Sbc = 0x6,
    Ror = 0x7,
    Tst = 0x8,
    Neg = 0x9,
    Cmp = 0xA,
    Cmn = 0xB,
    Orr = 0xC,
    Mul = 0xD,
    Bic = 0xE,
    Mvn = 0xF,
}

impl ThumbModeAluInstruction {
    const ALL: [Self; 16] = [
        Self::And,
        Self::Eor,
        Self::Lsl,
        Self::Lsr,
        Self::Asr,
        Self::Adc,
        Self::Sbc,
        Self::Ror,
        Self::Tst,
        Self::Neg,
        Self::Cmp,
        Self::Cmn,
        Self::Orr,
        Self::Mul,
        Self::Bic,
        Self::Mvn,
    ];

    /// The ARM data processing operation performing the same computation.
    ///
    /// Shifts are `MOVS Rd, Rd, <shift> Rs` and NEG is `RSBS Rd, Rs, #0`.
    /// MUL has no data processing form.
    #[must_use]
    pub const fn arm_equivalent(self) -> Option<ArmModeAluInstruction> {
        let equivalent = match self {
            Self::And => ArmModeAluInstruction::And,
            Self::Eor => ArmModeAluInstruction::Eor,
            Self::Lsl | Self::Lsr | Self::Asr | Self::Ror => ArmModeAluInstruction::Mov,
            Self::Adc => ArmModeAluInstruction::Adc,
            Self::Sbc => ArmModeAluInstruction::Sbc,
            Self::Tst => ArmModeAluInstruction::Tst,
            Self::Neg => ArmModeAluInstruction::Rsb,
            Self::Cmp => ArmModeAluInstruction::Cmp,
            Self::Cmn => ArmModeAluInstruction::Cmn,
            Self::Orr => ArmModeAluInstruction::Orr,
            Self::Mul => return None,
            Self::Bic => ArmModeAluInstruction::Bic,
            Self::Mvn => ArmModeAluInstruction::Mvn,
        };
        Some(equivalent)
    }
}

impl From<u16> for ThumbModeAluInstruction {
    fn from(alu_op_code: u16) -> Self {
        Self::ALL[usize::from(alu_op_code & 0xF)]
    }
}

impl Display for ThumbModeAluInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::And => "AND",
            Self::Eor => "EOR",
            Self::Lsl => "LSL",
            Self::Lsr => "LSR",
            Self::Asr => "ASR",
            Self::Adc => "ADC",
            Self::Sbc => "SBC",
            Self::Ror => "ROR",
            Self::Tst => "TST",
            Self::Neg => "NEG",
            Self::Cmp => "CMP",
            Self::Cmn => "CMN",
            Self::Orr => "ORR",
            Self::Mul => "MUL",
            Self::Bic => "BIC",
            Self::Mvn => "MVN",
        };
        f.write_str(name)
    }
}

/// Format 3 operations on an 8-bit immediate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThumbImmediateOperation {
    Mov,
    Cmp,
    Add,
    Sub,
}

impl ThumbImmediateOperation {
    #[must_use]
    pub const fn arm_equivalent(self) -> ArmModeAluInstruction {
        match self {
            Self::Mov => ArmModeAluInstruction::Mov,
            Self::Cmp => ArmModeAluInstruction::Cmp,
            Self::Add => ArmModeAluInstruction::Add,
            Self::Sub => ArmModeAluInstruction::Sub,
        }
    }
}

impl From<u16> for ThumbImmediateOperation {
    fn from(op: u16) -> Self {
        match op & 0b11 {
            0 => Self::Mov,
            1 => Self::Cmp,
            2 => Self::Add,
            _ => Self::Sub,
        }
    }
}

impl Display for ThumbImmediateOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mov => f.write_str("MOV"),
            Self::Cmp => f.write_str("CMP"),
            Self::Add => f.write_str("ADD"),
            Self::Sub => f.write_str("SUB"),
        }
    }
}

/// Format 5 operations, able to reach R8-R15.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThumbHighRegisterOperation {
    Add,
    Cmp,
    Mov,
    Bx,
}

impl ThumbHighRegisterOperation {
    #[must_use]
    pub const fn arm_equivalent(self) -> Option<ArmModeAluInstruction> {
        match self {
            Self::Add => Some(ArmModeAluInstruction::Add),
            Self::Cmp => Some(ArmModeAluInstruction::Cmp),
            Self::Mov => Some(ArmModeAluInstruction::Mov),
            Self::Bx => None,
        }
    }
}

impl Display for ThumbHighRegisterOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mov => f.write_str("MOV"),
            Self::Cmp => f.write_str("CMP"),
            Self::Add => f.write_str("ADD"),
            Self::Bx => f.write_str("BX"),
        }
    }
}

impl From<u16> for ThumbHighRegisterOperation {
    fn from(op: u16) -> Self {
        match op & 0b11 {
            0 => Self::Add,
            1 => Self::Cmp,
            2 => Self::Mov,
            _ => Self::Bx,
        }
    }
}
