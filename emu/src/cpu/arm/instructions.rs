//! # ARM Instruction Decoding
//!
//! Turns a 32-bit word into an [`ArmModeInstruction`]. Decoding is total:
//! every word yields a variant, odd encodings included.
//!
//! ```text
//! ┌────────────┬──────────────────────────────────────────────────────────┐
//! │ Bits 27-25 │ Category                                                 │
//! ├────────────┼──────────────────────────────────────────────────────────┤
//! │    000     │ bit7 & bit4: Multiply, Multiply Long, SWP, LDRH/STRH...  │
//! │            │ otherwise:   BX, Data Processing / PSR (register)        │
//! │    001     │ Data Processing / PSR (immediate)                        │
//! │    010     │ Single Data Transfer (immediate offset)                  │
//! │    011     │ Single Data Transfer (register offset), bit4: Undefined  │
//! │    100     │ Block Data Transfer (LDM/STM)                            │
//! │    101     │ Branch (B/BL)                                            │
//! │    110     │ Coprocessor Data Transfer (unsupported)                  │
//! │    111     │ bit24: SWI, otherwise coprocessor operations (unsupp.)   │
//! └────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! The condition (bits 31-28) is checked first: `1111` is reserved on this
//! processor and gives [`ArmModeInstruction::Invalid`].
//!
//! ## Instruction Encoding Example
//!
//! ```text
//! ADD R0, R1, R2, LSL #3
//!
//! 31-28  27-26  25  24-21  20  19-16  15-12  11-7   6-5  4  3-0
//! [1110] [ 00 ] [0] [0100] [0] [0001] [0000] [00011][00] [0][0010]
//!   │       │    │    │     │    │      │      │     │   │   └─ Rm = R2
//!   │       │    │    │     │    │      │      │     │   └──── Shift by imm
//!   │       │    │    │     │    │      │      │     └──────── LSL
//!   │       │    │    │     │    │      │      └────────────── Shift = 3
//!   │       │    │    │     │    │      └───────────────────── Rd = R0
//!   │       │    │    │     │    └──────────────────────────── Rn = R1
//!   │       │    │    │     └───────────────────────────────── S = 0 (no flags)
//!   │       │    │    └─────────────────────────────────────── ADD opcode
//!   │       │    └──────────────────────────────────────────── Register operand
//!   │       └───────────────────────────────────────────────── Data processing
//!   └───────────────────────────────────────────────────────── Always execute
//! ```

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::arm::alu_instruction::{
    AluSecondOperandInfo, ArmModeAluInstruction, PsrKind, PsrOpKind, ShiftOperator,
};
use crate::cpu::barrel_shifter::{Shift, ShiftKind, rotate_immediate};
use crate::cpu::condition::Condition;
use crate::cpu::flags::{Indexing, LoadStoreKind, Offsetting, OperandKind, ReadWriteKind};
use crate::cpu::registers::REG_SP;
use crate::cpu::swi::BiosFunction;
use crate::error::{DecodeError, InvalidReason, UnsupportedClass};

/// Bits 4..=27 of `BX Rn`.
const BRANCH_AND_EXCHANGE_PATTERN: u32 = 0b0001_0010_1111_1111_1111_0001;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SingleDataTransferOffsetInfo {
    Immediate { offset: u32 },
    RegisterImmediate { shift: Shift, reg_offset: u32 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum HalfwordDataTransferOffsetKind {
    /// `(high nibble << 4) | low nibble`.
    Immediate { offset: u32 },
    Register { register: u32 },
}

/// SH bits (6-5) of a halfword transfer. `00` belongs to the multiply family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum HalfwordTransferKind {
    UnsignedHalfwords,
    SignedByte,
    SignedHalfwords,
}

impl HalfwordTransferKind {
    const fn from_sh(sh: u32) -> Self {
        match sh & 0b11 {
            0b10 => Self::SignedByte,
            0b11 => Self::SignedHalfwords,
            _ => Self::UnsignedHalfwords,
        }
    }
}

impl std::fmt::Display for HalfwordTransferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsignedHalfwords => f.write_str("H"),
            Self::SignedByte => f.write_str("SB"),
            Self::SignedHalfwords => f.write_str("SH"),
        }
    }
}

/// LDM/STM addressing mode. The stack names are used when the base is SP.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BlockAddressingMode {
    Ed,
    Ea,
    Fd,
    Fa,
    Da,
    Ia,
    Db,
    Ib,
}

impl BlockAddressingMode {
    /// Indexed by `(load << 2) | (pre << 1) | up`.
    const STACK: [Self; 8] = [
        Self::Ed,
        Self::Ea,
        Self::Fd,
        Self::Fa,
        Self::Fa,
        Self::Fd,
        Self::Ea,
        Self::Ed,
    ];

    const OTHER: [Self; 8] = [
        Self::Da,
        Self::Ia,
        Self::Db,
        Self::Ib,
        Self::Da,
        Self::Ia,
        Self::Db,
        Self::Ib,
    ];

    #[must_use]
    pub fn new(
        load_store: LoadStoreKind,
        indexing: Indexing,
        offsetting: Offsetting,
        base_register: u32,
    ) -> Self {
        let index = (usize::from(load_store == LoadStoreKind::Load) << 2)
            | (usize::from(indexing == Indexing::Pre) << 1)
            | usize::from(offsetting == Offsetting::Up);

        if base_register == REG_SP {
            Self::STACK[index]
        } else {
            Self::OTHER[index]
        }
    }
}

impl std::fmt::Display for BlockAddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ed => "ED",
            Self::Ea => "EA",
            Self::Fd => "FD",
            Self::Fa => "FA",
            Self::Da => "DA",
            Self::Ia => "IA",
            Self::Db => "DB",
            Self::Ib => "IB",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmModeMultiplyVariant {
    Mul,
    Mla,
}

impl From<bool> for ArmModeMultiplyVariant {
    fn from(accumulate: bool) -> Self {
        if accumulate { Self::Mla } else { Self::Mul }
    }
}

impl std::fmt::Display for ArmModeMultiplyVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mul => f.write_str("MUL"),
            Self::Mla => f.write_str("MLA"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmModeMultiplyLongVariant {
    Umull,
    Umlal,
    Smull,
    Smlal,
}

impl ArmModeMultiplyLongVariant {
    /// From the signed (bit 22) and accumulate (bit 21) flags.
    const fn new(signed: bool, accumulate: bool) -> Self {
        match (signed, accumulate) {
            (false, false) => Self::Umull,
            (false, true) => Self::Umlal,
            (true, false) => Self::Smull,
            (true, true) => Self::Smlal,
        }
    }
}

impl std::fmt::Display for ArmModeMultiplyLongVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Umull => f.write_str("UMULL"),
            Self::Umlal => f.write_str("UMLAL"),
            Self::Smull => f.write_str("SMULL"),
            Self::Smlal => f.write_str("SMLAL"),
        }
    }
}

/// All ARM instruction types after decoding.
///
/// | Variant                | Example Instructions | Description                  |
/// |------------------------|----------------------|------------------------------|
/// | `DataProcessing`       | AND, ADD, CMP, MOV   | ALU operations               |
/// | `PSRTransfer`          | MRS, MSR             | Status register access       |
/// | `Multiply`             | MUL, MLA             | 32-bit multiply              |
/// | `MultiplyLong`         | UMULL, SMLAL         | 64-bit multiply              |
/// | `SingleDataSwap`       | SWP, SWPB            | Atomic memory swap           |
/// | `BranchAndExchange`    | BX                   | Branch + possible ARM↔Thumb  |
/// | `HalfwordDataTransfer` | LDRH, STRH, LDRSB    | 16-bit and signed transfers  |
/// | `SingleDataTransfer`   | LDR, STR, LDRB       | 32-bit and byte transfers    |
/// | `BlockDataTransfer`    | LDM, STM             | Multiple register transfer   |
/// | `Branch`               | B, BL                | Branch (and link)            |
/// | `SoftwareInterrupt`    | SWI                  | BIOS call                    |
/// | `Unsupported`          | LDC, CDP, MRC        | Coprocessor classes          |
/// | `Undefined`            | -                    | Undefined instruction space  |
/// | `Invalid`              | -                    | Impossible field combination |
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum ArmModeInstruction {
    DataProcessing {
        condition: Condition,
        alu_instruction: ArmModeAluInstruction,
        set_conditions: bool,
        rn: u32,
        destination: u32,
        op2: AluSecondOperandInfo,
    },
    PSRTransfer {
        condition: Condition,
        psr_kind: PsrKind,
        kind: PsrOpKind,
    },
    Multiply {
        variant: ArmModeMultiplyVariant,
        condition: Condition,
        should_set_codes: bool,
        rd_destination_register: u32,
        rn_accumulate_register: u32,
        rs_operand_register: u32,
        rm_operand_register: u32,
    },
    MultiplyLong {
        variant: ArmModeMultiplyLongVariant,
        condition: Condition,
        should_set_codes: bool,
        rdhi_destination_register: u32,
        rdlo_destination_register: u32,
        rs_operand_register: u32,
        rm_operand_register: u32,
    },
    SingleDataSwap {
        condition: Condition,
        quantity: ReadWriteKind,
        rn: u32,
        rd: u32,
        rm: u32,
    },
    BranchAndExchange {
        condition: Condition,
        register: u32,
    },
    HalfwordDataTransfer {
        condition: Condition,
        indexing: Indexing,
        offsetting: Offsetting,
        write_back: bool,
        load_store_kind: LoadStoreKind,
        offset_kind: HalfwordDataTransferOffsetKind,
        base_register: u32,
        source_destination_register: u32,
        transfer_kind: HalfwordTransferKind,
    },
    SingleDataTransfer {
        condition: Condition,
        kind: LoadStoreKind,
        quantity: ReadWriteKind,
        write_back: bool,
        indexing: Indexing,
        offsetting: Offsetting,
        rd: u32,
        base_register: u32,
        offset_info: SingleDataTransferOffsetInfo,
    },
    BlockDataTransfer {
        condition: Condition,
        addressing_mode: BlockAddressingMode,
        load_psr: bool,
        write_back: bool,
        load_store: LoadStoreKind,
        rn: u32,
        register_list: u16,
    },
    Branch {
        condition: Condition,
        link: bool,
        /// Signed offset in words, relative to the instruction address + 8.
        offset: i32,
    },
    SoftwareInterrupt {
        condition: Condition,
        comment: u32,
        function: Option<BiosFunction>,
    },
    Unsupported {
        condition: Condition,
        class: UnsupportedClass,
        raw: u32,
    },
    Undefined {
        raw: u32,
    },
    Invalid {
        raw: u32,
        reason: InvalidReason,
    },
}

impl ArmModeInstruction {
    /// The condition guarding the instruction, if it decoded far enough to have one.
    #[must_use]
    pub const fn condition(&self) -> Option<Condition> {
        match self {
            Self::DataProcessing { condition, .. }
            | Self::PSRTransfer { condition, .. }
            | Self::Multiply { condition, .. }
            | Self::MultiplyLong { condition, .. }
            | Self::SingleDataSwap { condition, .. }
            | Self::BranchAndExchange { condition, .. }
            | Self::HalfwordDataTransfer { condition, .. }
            | Self::SingleDataTransfer { condition, .. }
            | Self::BlockDataTransfer { condition, .. }
            | Self::Branch { condition, .. }
            | Self::SoftwareInterrupt { condition, .. }
            | Self::Unsupported { condition, .. } => Some(*condition),
            Self::Undefined { .. } | Self::Invalid { .. } => None,
        }
    }

    /// A reportable error for encodings that are not regular instructions.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<DecodeError> {
        match *self {
            Self::Unsupported { class, raw, .. } => {
                Some(DecodeError::UnsupportedFormat { raw, class })
            }
            Self::Undefined { raw } => Some(DecodeError::Undefined { raw }),
            Self::Invalid { raw, reason } => Some(DecodeError::InvalidEncoding { raw, reason }),
            _ => None,
        }
    }

    /// Destination of a branch located at `address`.
    #[must_use]
    pub const fn branch_target(&self, address: u32) -> Option<u32> {
        match self {
            Self::Branch { offset, .. } => Some(
                address
                    .wrapping_add(8)
                    .wrapping_add_signed(offset.wrapping_mul(4)),
            ),
            _ => None,
        }
    }
}

impl From<u32> for ArmModeInstruction {
    fn from(op_code: u32) -> Self {
        let Ok(condition) = Condition::try_from(op_code.get_bits(28..=31) as u8) else {
            tracing::debug!("reserved condition in opcode=0x{op_code:08X}");
            return Self::Invalid {
                raw: op_code,
                reason: InvalidReason::ReservedCondition,
            };
        };

        match op_code.get_bits(25..=27) {
            0b000 => decode_group_zero(op_code, condition),
            0b001 => decode_data_processing(op_code, condition),
            0b010 => decode_single_data_transfer(op_code, condition),
            0b011 if op_code.get_bit(4) => {
                tracing::debug!("undefined instruction decode: opcode=0x{op_code:08X}");
                Self::Undefined { raw: op_code }
            }
            0b011 => decode_single_data_transfer(op_code, condition),
            0b100 => decode_block_data_transfer(op_code, condition),
            0b101 => Self::Branch {
                condition,
                link: op_code.get_bit(24),
                offset: op_code.get_bits(0..=23).sign_extended(24) as i32,
            },
            0b110 => Self::Unsupported {
                condition,
                class: UnsupportedClass::CoprocessorDataTransfer,
                raw: op_code,
            },
            _ if op_code.get_bit(24) => {
                let comment = op_code.get_bits(0..=23);
                Self::SoftwareInterrupt {
                    condition,
                    comment,
                    function: BiosFunction::try_from(comment).ok(),
                }
            }
            _ => {
                let class = if op_code.get_bit(4) {
                    UnsupportedClass::CoprocessorRegisterTransfer
                } else {
                    UnsupportedClass::CoprocessorDataOperation
                };
                Self::Unsupported {
                    condition,
                    class,
                    raw: op_code,
                }
            }
        }
    }
}

fn decode_group_zero(op_code: u32, condition: Condition) -> ArmModeInstruction {
    if op_code.get_bit(7) && op_code.get_bit(4) {
        match op_code.get_bits(5..=6) {
            0b00 => decode_multiply_family(op_code, condition),
            sh => decode_halfword_data_transfer(op_code, condition, sh),
        }
    } else if op_code.get_bits(4..=27) == BRANCH_AND_EXCHANGE_PATTERN {
        ArmModeInstruction::BranchAndExchange {
            condition,
            register: op_code.get_bits(0..=3),
        }
    } else {
        decode_data_processing(op_code, condition)
    }
}

/// Bits 7-4 are `1001` here: bits 24 and 23 pick the instruction.
fn decode_multiply_family(op_code: u32, condition: Condition) -> ArmModeInstruction {
    let rm = op_code.get_bits(0..=3);
    let rs = op_code.get_bits(8..=11);
    let rd_lo = op_code.get_bits(12..=15);
    let rd_hi = op_code.get_bits(16..=19);
    let should_set_codes = op_code.get_bit(20);

    match (op_code.get_bit(24), op_code.get_bit(23)) {
        (false, false) if !op_code.get_bit(22) => ArmModeInstruction::Multiply {
            variant: op_code.get_bit(21).into(),
            condition,
            should_set_codes,
            rd_destination_register: rd_hi,
            rn_accumulate_register: rd_lo,
            rs_operand_register: rs,
            rm_operand_register: rm,
        },
        (false, true) => ArmModeInstruction::MultiplyLong {
            variant: ArmModeMultiplyLongVariant::new(op_code.get_bit(22), op_code.get_bit(21)),
            condition,
            should_set_codes,
            rdhi_destination_register: rd_hi,
            rdlo_destination_register: rd_lo,
            rs_operand_register: rs,
            rm_operand_register: rm,
        },
        (true, false) if op_code.get_bits(20..=21) == 0 && rs == 0 => {
            ArmModeInstruction::SingleDataSwap {
                condition,
                quantity: op_code.get_bit(22).into(),
                rn: rd_hi,
                rd: rd_lo,
                rm,
            }
        }
        _ => {
            tracing::debug!("undefined multiply/swap encoding: opcode=0x{op_code:08X}");
            ArmModeInstruction::Undefined { raw: op_code }
        }
    }
}

fn decode_halfword_data_transfer(
    op_code: u32,
    condition: Condition,
    sh: u32,
) -> ArmModeInstruction {
    let offset_kind = match OperandKind::from(op_code.get_bit(22)) {
        OperandKind::Immediate => HalfwordDataTransferOffsetKind::Immediate {
            offset: (op_code.get_bits(8..=11) << 4) | op_code.get_bits(0..=3),
        },
        OperandKind::Register => HalfwordDataTransferOffsetKind::Register {
            register: op_code.get_bits(0..=3),
        },
    };

    ArmModeInstruction::HalfwordDataTransfer {
        condition,
        indexing: op_code.get_bit(24).into(),
        offsetting: op_code.get_bit(23).into(),
        write_back: op_code.get_bit(21),
        load_store_kind: op_code.get_bit(20).into(),
        offset_kind,
        base_register: op_code.get_bits(16..=19),
        source_destination_register: op_code.get_bits(12..=15),
        transfer_kind: HalfwordTransferKind::from_sh(sh),
    }
}

fn decode_data_processing(op_code: u32, condition: Condition) -> ArmModeInstruction {
    let alu_instruction = ArmModeAluInstruction::from(op_code.get_bits(21..=24));
    let set_conditions = op_code.get_bit(20);
    let op_kind = OperandKind::from(op_code.get_bit(25));

    // TST/TEQ/CMP/CMN without S are the PSR transfer encodings.
    if alu_instruction.is_test() && !set_conditions {
        return decode_psr_transfer(op_code, condition, op_kind);
    }

    ArmModeInstruction::DataProcessing {
        condition,
        alu_instruction,
        set_conditions,
        rn: op_code.get_bits(16..=19),
        destination: op_code.get_bits(12..=15),
        op2: decode_second_operand(op_code, op_kind),
    }
}

fn decode_second_operand(op_code: u32, op_kind: OperandKind) -> AluSecondOperandInfo {
    match op_kind {
        OperandKind::Immediate => {
            let rotate = op_code.get_bits(8..=11);
            AluSecondOperandInfo::Immediate {
                value: rotate_immediate(op_code.get_bits(0..=7), rotate),
                rotate,
            }
        }
        OperandKind::Register => {
            let kind = ShiftKind::from_bits(op_code.get_bits(5..=6));
            let shift_operator = if op_code.get_bit(4) {
                ShiftOperator::Register {
                    kind,
                    register: op_code.get_bits(8..=11),
                }
            } else {
                ShiftOperator::Immediate(Shift::from_immediate(kind, op_code.get_bits(7..=11)))
            };
            AluSecondOperandInfo::Register {
                register: op_code.get_bits(0..=3),
                shift_operator,
            }
        }
    }
}

fn decode_psr_transfer(
    op_code: u32,
    condition: Condition,
    op_kind: OperandKind,
) -> ArmModeInstruction {
    let psr_kind = PsrKind::from(op_code.get_bit(22));

    let kind = match (op_kind, op_code.get_bits(16..=21)) {
        (OperandKind::Register, 0b00_1111) => PsrOpKind::Mrs {
            destination_register: op_code.get_bits(12..=15),
        },
        (_, 0b10_1000) => PsrOpKind::MsrFlg {
            operand: decode_second_operand(op_code, op_kind),
        },
        (OperandKind::Register, 0b10_1001) => {
            tracing::debug!("MSR register to PSR: opcode=0x{op_code:08X}");
            return ArmModeInstruction::Invalid {
                raw: op_code,
                reason: InvalidReason::MsrRegisterToPsr,
            };
        }
        (_, transfer_type) => {
            tracing::debug!("unknown PSR transfer {transfer_type}: opcode=0x{op_code:08X}");
            return ArmModeInstruction::Invalid {
                raw: op_code,
                reason: InvalidReason::UnknownPsrTransfer { transfer_type },
            };
        }
    };

    ArmModeInstruction::PSRTransfer {
        condition,
        psr_kind,
        kind,
    }
}

fn decode_single_data_transfer(op_code: u32, condition: Condition) -> ArmModeInstruction {
    // The I bit is inverted compared to data processing: 0 means immediate.
    let offset_info = match OperandKind::from(!op_code.get_bit(25)) {
        OperandKind::Immediate => SingleDataTransferOffsetInfo::Immediate {
            offset: op_code.get_bits(0..=11),
        },
        OperandKind::Register => SingleDataTransferOffsetInfo::RegisterImmediate {
            shift: Shift::from_immediate(
                ShiftKind::from_bits(op_code.get_bits(5..=6)),
                op_code.get_bits(7..=11),
            ),
            reg_offset: op_code.get_bits(0..=3),
        },
    };

    ArmModeInstruction::SingleDataTransfer {
        condition,
        kind: op_code.get_bit(20).into(),
        quantity: op_code.get_bit(22).into(),
        write_back: op_code.get_bit(21),
        indexing: op_code.get_bit(24).into(),
        offsetting: op_code.get_bit(23).into(),
        rd: op_code.get_bits(12..=15),
        base_register: op_code.get_bits(16..=19),
        offset_info,
    }
}

fn decode_block_data_transfer(op_code: u32, condition: Condition) -> ArmModeInstruction {
    let load_store = LoadStoreKind::from(op_code.get_bit(20));
    let rn = op_code.get_bits(16..=19);
    let addressing_mode = BlockAddressingMode::new(
        load_store,
        op_code.get_bit(24).into(),
        op_code.get_bit(23).into(),
        rn,
    );

    ArmModeInstruction::BlockDataTransfer {
        condition,
        addressing_mode,
        load_psr: op_code.get_bit(22),
        write_back: op_code.get_bit(21),
        load_store,
        rn,
        register_list: op_code.get_bits(0..=15) as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_mov_immediate() {
        let output = ArmModeInstruction::from(0xE3A0_0001);
        assert_eq!(
            output,
            ArmModeInstruction::DataProcessing {
                condition: Condition::AL,
                alu_instruction: ArmModeAluInstruction::Mov,
                set_conditions: false,
                rn: 0,
                destination: 0,
                op2: AluSecondOperandInfo::Immediate { value: 1, rotate: 0 },
            }
        );
    }

    #[test]
    fn decode_rotated_immediate() {
        // MOV R0, #0x04000000
        let output = ArmModeInstruction::from(0xE3A0_0301);
        let ArmModeInstruction::DataProcessing { op2, .. } = output else {
            panic!("expected data processing, got {output:?}");
        };
        assert_eq!(
            op2,
            AluSecondOperandInfo::Immediate {
                value: 0x0400_0000,
                rotate: 3
            }
        );
    }

    #[test]
    fn decode_shifted_register_operand() {
        // ADDS R0, R1, R2, LSL #3
        let output = ArmModeInstruction::from(0xE091_0182);
        assert_eq!(
            output,
            ArmModeInstruction::DataProcessing {
                condition: Condition::AL,
                alu_instruction: ArmModeAluInstruction::Add,
                set_conditions: true,
                rn: 1,
                destination: 0,
                op2: AluSecondOperandInfo::Register {
                    register: 2,
                    shift_operator: ShiftOperator::Immediate(Shift::Lsl(3)),
                },
            }
        );

        // MOV R0, R1, LSR #32 / RRX / LSL R2
        let decode_op2 = |op_code: u32| match ArmModeInstruction::from(op_code) {
            ArmModeInstruction::DataProcessing { op2, .. } => op2,
            other => panic!("expected data processing, got {other:?}"),
        };
        assert_eq!(
            decode_op2(0xE1A0_0021),
            AluSecondOperandInfo::Register {
                register: 1,
                shift_operator: ShiftOperator::Immediate(Shift::Lsr(32)),
            }
        );
        assert_eq!(
            decode_op2(0xE1A0_0061),
            AluSecondOperandInfo::Register {
                register: 1,
                shift_operator: ShiftOperator::Immediate(Shift::Rrx),
            }
        );
        assert_eq!(
            decode_op2(0xE1A0_0211),
            AluSecondOperandInfo::Register {
                register: 1,
                shift_operator: ShiftOperator::Register {
                    kind: ShiftKind::Lsl,
                    register: 2
                },
            }
        );
    }

    #[test]
    fn decode_branch_with_link() {
        let output = ArmModeInstruction::from(0xEB00_0005);
        assert_eq!(
            output,
            ArmModeInstruction::Branch {
                condition: Condition::AL,
                link: true,
                offset: 5,
            }
        );
        assert_eq!(output.branch_target(0x0800_0000), Some(0x0800_001C));

        let output = ArmModeInstruction::from(0x0AFF_FFFE);
        assert_eq!(
            output,
            ArmModeInstruction::Branch {
                condition: Condition::EQ,
                link: false,
                offset: -2,
            }
        );
        assert_eq!(output.branch_target(0x0800_0010), Some(0x0800_0010));
    }

    #[test]
    fn decode_branch_and_exchange() {
        let output = ArmModeInstruction::from(0xE12F_FF1E);
        assert_eq!(
            output,
            ArmModeInstruction::BranchAndExchange {
                condition: Condition::AL,
                register: 14,
            }
        );
    }

    #[test]
    fn decode_reserved_condition() {
        let output = ArmModeInstruction::from(0xF3A0_0001);
        assert_eq!(
            output,
            ArmModeInstruction::Invalid {
                raw: 0xF3A0_0001,
                reason: InvalidReason::ReservedCondition,
            }
        );
        assert_eq!(output.condition(), None);
        assert_eq!(
            output.diagnostic(),
            Some(DecodeError::InvalidEncoding {
                raw: 0xF3A0_0001,
                reason: InvalidReason::ReservedCondition,
            })
        );
    }

    #[test]
    fn decode_psr_transfers() {
        assert_eq!(
            ArmModeInstruction::from(0xE10F_0000),
            ArmModeInstruction::PSRTransfer {
                condition: Condition::AL,
                psr_kind: PsrKind::Cpsr,
                kind: PsrOpKind::Mrs {
                    destination_register: 0
                },
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xE14F_1000),
            ArmModeInstruction::PSRTransfer {
                condition: Condition::AL,
                psr_kind: PsrKind::Spsr,
                kind: PsrOpKind::Mrs {
                    destination_register: 1
                },
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xE128_F002),
            ArmModeInstruction::PSRTransfer {
                condition: Condition::AL,
                psr_kind: PsrKind::Cpsr,
                kind: PsrOpKind::MsrFlg {
                    operand: AluSecondOperandInfo::Register {
                        register: 2,
                        shift_operator: ShiftOperator::Immediate(Shift::Lsl(0)),
                    }
                },
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xE328_F20F),
            ArmModeInstruction::PSRTransfer {
                condition: Condition::AL,
                psr_kind: PsrKind::Cpsr,
                kind: PsrOpKind::MsrFlg {
                    operand: AluSecondOperandInfo::Immediate {
                        value: 0xF000_0000,
                        rotate: 2
                    }
                },
            }
        );
    }

    #[test]
    fn decode_invalid_psr_transfers() {
        assert_eq!(
            ArmModeInstruction::from(0xE129_F001),
            ArmModeInstruction::Invalid {
                raw: 0xE129_F001,
                reason: InvalidReason::MsrRegisterToPsr,
            }
        );
        // TST R0, R1 without the S bit.
        assert_eq!(
            ArmModeInstruction::from(0xE100_0001),
            ArmModeInstruction::Invalid {
                raw: 0xE100_0001,
                reason: InvalidReason::UnknownPsrTransfer { transfer_type: 0 },
            }
        );
    }

    #[test]
    fn decode_multiply_family() {
        assert_eq!(
            ArmModeInstruction::from(0xE023_4291),
            ArmModeInstruction::Multiply {
                variant: ArmModeMultiplyVariant::Mla,
                condition: Condition::AL,
                should_set_codes: false,
                rd_destination_register: 3,
                rn_accumulate_register: 4,
                rs_operand_register: 2,
                rm_operand_register: 1,
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xE0D1_0392),
            ArmModeInstruction::MultiplyLong {
                variant: ArmModeMultiplyLongVariant::Smull,
                condition: Condition::AL,
                should_set_codes: true,
                rdhi_destination_register: 1,
                rdlo_destination_register: 0,
                rs_operand_register: 3,
                rm_operand_register: 2,
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xE102_0091),
            ArmModeInstruction::SingleDataSwap {
                condition: Condition::AL,
                quantity: ReadWriteKind::Word,
                rn: 2,
                rd: 0,
                rm: 1,
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xE142_0091),
            ArmModeInstruction::SingleDataSwap {
                condition: Condition::AL,
                quantity: ReadWriteKind::Byte,
                rn: 2,
                rd: 0,
                rm: 1,
            }
        );
        // Multiply with bit 22 set is not allocated.
        assert_eq!(
            ArmModeInstruction::from(0xE040_0091),
            ArmModeInstruction::Undefined { raw: 0xE040_0091 }
        );
    }

    #[test]
    fn decode_halfword_transfers() {
        // LDRH R0, [R1, #0x24]!
        assert_eq!(
            ArmModeInstruction::from(0xE1F1_02B4),
            ArmModeInstruction::HalfwordDataTransfer {
                condition: Condition::AL,
                indexing: Indexing::Pre,
                offsetting: Offsetting::Up,
                write_back: true,
                load_store_kind: LoadStoreKind::Load,
                offset_kind: HalfwordDataTransferOffsetKind::Immediate { offset: 0x24 },
                base_register: 1,
                source_destination_register: 0,
                transfer_kind: HalfwordTransferKind::UnsignedHalfwords,
            }
        );
        // LDRSB R3, [R4], -R5
        assert_eq!(
            ArmModeInstruction::from(0xE014_30D5),
            ArmModeInstruction::HalfwordDataTransfer {
                condition: Condition::AL,
                indexing: Indexing::Post,
                offsetting: Offsetting::Down,
                write_back: false,
                load_store_kind: LoadStoreKind::Load,
                offset_kind: HalfwordDataTransferOffsetKind::Register { register: 5 },
                base_register: 4,
                source_destination_register: 3,
                transfer_kind: HalfwordTransferKind::SignedByte,
            }
        );
    }

    #[test]
    fn decode_single_data_transfers() {
        // LDR R0, [R1, #4]
        assert_eq!(
            ArmModeInstruction::from(0xE591_0004),
            ArmModeInstruction::SingleDataTransfer {
                condition: Condition::AL,
                kind: LoadStoreKind::Load,
                quantity: ReadWriteKind::Word,
                write_back: false,
                indexing: Indexing::Pre,
                offsetting: Offsetting::Up,
                rd: 0,
                base_register: 1,
                offset_info: SingleDataTransferOffsetInfo::Immediate { offset: 4 },
            }
        );
        // STRB R2, [R3], -R4, LSL #2
        assert_eq!(
            ArmModeInstruction::from(0xE643_2104),
            ArmModeInstruction::SingleDataTransfer {
                condition: Condition::AL,
                kind: LoadStoreKind::Store,
                quantity: ReadWriteKind::Byte,
                write_back: false,
                indexing: Indexing::Post,
                offsetting: Offsetting::Down,
                rd: 2,
                base_register: 3,
                offset_info: SingleDataTransferOffsetInfo::RegisterImmediate {
                    shift: Shift::Lsl(2),
                    reg_offset: 4,
                },
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xE600_0010),
            ArmModeInstruction::Undefined { raw: 0xE600_0010 }
        );
    }

    #[test]
    fn decode_block_transfers() {
        // STMFD R13!, {R0, R1, R14}
        assert_eq!(
            ArmModeInstruction::from(0xE92D_4003),
            ArmModeInstruction::BlockDataTransfer {
                condition: Condition::AL,
                addressing_mode: BlockAddressingMode::Fd,
                load_psr: false,
                write_back: true,
                load_store: LoadStoreKind::Store,
                rn: 13,
                register_list: 0x4003,
            }
        );
        // LDMIA R0, {R1}
        let output = ArmModeInstruction::from(0xE890_0002);
        let ArmModeInstruction::BlockDataTransfer {
            addressing_mode, ..
        } = output
        else {
            panic!("expected block transfer, got {output:?}");
        };
        assert_eq!(addressing_mode, BlockAddressingMode::Ia);
    }

    #[test]
    fn check_block_addressing_names() {
        use Indexing::{Post, Pre};
        use LoadStoreKind::{Load, Store};
        use Offsetting::{Down, Up};

        let stack = |l, p, u| BlockAddressingMode::new(l, p, u, REG_SP).to_string();
        assert_eq!(stack(Store, Pre, Down), "FD");
        assert_eq!(stack(Load, Post, Up), "FD");
        assert_eq!(stack(Store, Post, Up), "EA");
        assert_eq!(stack(Load, Pre, Down), "EA");
        assert_eq!(stack(Store, Post, Down), "ED");
        assert_eq!(stack(Load, Pre, Up), "ED");
        assert_eq!(stack(Store, Pre, Up), "FA");
        assert_eq!(stack(Load, Post, Down), "FA");

        let other = |l, p, u| BlockAddressingMode::new(l, p, u, 0).to_string();
        assert_eq!(other(Store, Post, Down), "DA");
        assert_eq!(other(Load, Post, Up), "IA");
        assert_eq!(other(Store, Pre, Down), "DB");
        assert_eq!(other(Load, Pre, Up), "IB");
    }

    #[test]
    fn decode_software_interrupt() {
        assert_eq!(
            ArmModeInstruction::from(0xEF00_0006),
            ArmModeInstruction::SoftwareInterrupt {
                condition: Condition::AL,
                comment: 6,
                function: Some(BiosFunction::Div),
            }
        );
        assert_eq!(
            ArmModeInstruction::from(0xEF00_0063),
            ArmModeInstruction::SoftwareInterrupt {
                condition: Condition::AL,
                comment: 0x63,
                function: None,
            }
        );
    }

    #[test]
    fn decode_coprocessor_classes() {
        let expect = |op_code, class| {
            let output = ArmModeInstruction::from(op_code);
            assert_eq!(
                output,
                ArmModeInstruction::Unsupported {
                    condition: Condition::AL,
                    class,
                    raw: op_code,
                }
            );
            assert_eq!(
                output.diagnostic(),
                Some(DecodeError::UnsupportedFormat { raw: op_code, class })
            );
        };
        expect(0xED90_0100, UnsupportedClass::CoprocessorDataTransfer);
        expect(0xEE00_0100, UnsupportedClass::CoprocessorDataOperation);
        expect(0xEE10_0110, UnsupportedClass::CoprocessorRegisterTransfer);
    }

    #[test]
    fn decode_is_total_over_every_format_group() {
        let low_patterns = [
            0x0000_0000,
            0x0000_0090,
            0x0000_00B0,
            0x0000_00D0,
            0x0000_00F0,
            0x0000_0010,
            0x0000_FFFF,
            0x000F_FFFF,
            0x0002_FF1E,
            0x000F_F01F,
        ];
        for condition in 0..16_u32 {
            for middle in 0..256_u32 {
                for low in low_patterns {
                    let op_code = (condition << 28) | (middle << 20) | low;
                    let decoded = ArmModeInstruction::from(op_code);
                    assert_eq!(decoded, ArmModeInstruction::from(op_code));
                    assert!(!decoded.disassembler().is_empty());
                }
            }
        }
    }

    #[test]
    fn decode_is_total_on_random_words() {
        for _ in 0..100_000 {
            let op_code = rand::random::<u32>();
            let decoded = ArmModeInstruction::from(op_code);
            assert_eq!(decoded, ArmModeInstruction::from(op_code));
            assert_eq!(decoded.disassembler(), decoded.disassembler());
        }
    }
}
