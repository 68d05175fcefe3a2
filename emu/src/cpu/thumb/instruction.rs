//! # Thumb Instruction Decoding
//!
//! This module handles decoding 16-bit Thumb instructions.
//!
//! ## Thumb Instruction Formats
//!
//! Thumb instructions are grouped into 19 formats, identified by their high bits:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Thumb Instruction Formats                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Format 1:  000 xx          Move shifted register                       │
//! │  Format 2:  00011           Add/subtract                                │
//! │  Format 3:  001 xx          Move/compare/add/subtract immediate         │
//! │  Format 4:  010000          ALU operations                              │
//! │  Format 5:  010001          Hi register operations / BX                 │
//! │  Format 6:  01001           PC-relative load                            │
//! │  Format 7:  0101 xx0        Load/store with register offset             │
//! │  Format 8:  0101 xx1        Load/store sign-extended byte/halfword      │
//! │  Format 9:  011 xx          Load/store with immediate offset            │
//! │  Format 10: 1000 x          Load/store halfword                         │
//! │  Format 11: 1001 x          SP-relative load/store                      │
//! │  Format 12: 1010 x          Load address                                │
//! │  Format 13: 10110000        Add offset to stack pointer                 │
//! │  Format 14: 1011 x10x       Push/pop registers                          │
//! │  Format 15: 1100 x          Multiple load/store                         │
//! │  Format 16: 1101 xxxx       Conditional branch                          │
//! │  Format 17: 11011111        Software interrupt                          │
//! │  Format 18: 11100           Unconditional branch                        │
//! │  Format 19: 1111 x          Long branch with link                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything else (`1011` misc encodings other than formats 13 and 14,
//! condition `1110` in format 16, the `11101` BLX suffix) is
//! [`ThumbModeInstruction::Undefined`].
//!
//! Offsets are stored already scaled: word offsets are multiplied by 4 and
//! halfword offsets by 2, branch offsets are signed byte offsets.
//!
//! ## Long Branch (BL)
//!
//! The BL instruction spans ±4MB but requires two 16-bit instructions:
//!
//! ```text
//! First:  1111 0xxx xxxx xxxx  ; LR = PC + (offset_hi << 12)
//! Second: 1111 1xxx xxxx xxxx  ; PC = LR + (offset_lo << 1), LR = old_PC | 1
//! ```

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::cpu::barrel_shifter::ShiftKind;
use crate::cpu::condition::Condition;
use crate::cpu::flags::{LoadStoreKind, OperandKind, ReadWriteKind};
use crate::cpu::swi::BiosFunction;
use crate::cpu::thumb::alu_instructions::{
    ThumbHighRegisterOperation, ThumbImmediateOperation, ThumbModeAluInstruction,
};
use crate::error::DecodeError;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum ThumbModeInstruction {
    MoveShiftedRegister {
        shift_operation: ShiftKind,
        /// 1..=32 for LSR/ASR, 0..=31 for LSL.
        offset5: u16,
        source_register: u16,
        destination_register: u16,
    },
    AddSubtract {
        operation_kind: OperandKind,
        subtract: bool,
        rn_offset3: u16,
        source_register: u16,
        destination_register: u16,
    },
    MoveCompareAddSubtractImm {
        operation: ThumbImmediateOperation,
        destination_register: u16,
        offset: u16,
    },
    AluOp {
        alu_operation: ThumbModeAluInstruction,
        source_register: u16,
        destination_register: u16,
    },
    HiRegisterOpBX {
        register_operation: ThumbHighRegisterOperation,
        source_register: u16,
        destination_register: u16,
    },
    PCRelativeLoad {
        destination_register: u16,
        immediate_value: u16,
    },
    LoadStoreRegisterOffset {
        load_store: LoadStoreKind,
        byte_word: ReadWriteKind,
        ro: u16,
        base_register: u16,
        destination_register: u16,
    },
    LoadStoreSignExtByteHalfword {
        h: bool,
        sign_extend_flag: bool,
        offset_register: u16,
        base_register: u16,
        destination_register: u16,
    },
    LoadStoreImmOffset {
        load_store: LoadStoreKind,
        byte_word: ReadWriteKind,
        offset: u16,
        base_register: u16,
        destination_register: u16,
    },
    LoadStoreHalfword {
        load_store: LoadStoreKind,
        offset: u16,
        base_register: u16,
        source_destination_register: u16,
    },
    SPRelativeLoadStore {
        load_store: LoadStoreKind,
        destination_register: u16,
        word8: u16,
    },
    LoadAddress {
        sp: bool,
        destination_register: u16,
        offset: u16,
    },
    AddOffsetSP {
        /// Set when the offset is subtracted.
        s: bool,
        word7: u16,
    },
    PushPopReg {
        load_store: LoadStoreKind,
        /// LR for PUSH, PC for POP.
        pc_lr: bool,
        register_list: u16,
    },
    MultipleLoadStore {
        load_store: LoadStoreKind,
        base_register: u16,
        register_list: u16,
    },
    CondBranch {
        condition: Condition,
        immediate_offset: i32,
    },
    Swi {
        comment: u16,
        function: Option<BiosFunction>,
    },
    UncondBranch {
        offset: i32,
    },
    LongBranchLink {
        /// Set on the low half.
        h: bool,
        /// `offset_hi << 12` (signed) on the high half, `offset_lo << 1` on the low half.
        offset: i32,
    },
    Undefined {
        raw: u16,
    },
}

impl ThumbModeInstruction {
    #[must_use]
    pub const fn diagnostic(&self) -> Option<DecodeError> {
        match *self {
            Self::Undefined { raw } => Some(DecodeError::Undefined { raw: raw as u32 }),
            _ => None,
        }
    }

    /// Destination of a branch located at `address` (PC reads 4 bytes ahead).
    ///
    /// For the high half of BL this is the intermediate LR value. The low
    /// half depends on LR and has no static target.
    #[must_use]
    pub const fn branch_target(&self, address: u32) -> Option<u32> {
        match *self {
            Self::CondBranch {
                immediate_offset: offset,
                ..
            }
            | Self::UncondBranch { offset }
            | Self::LongBranchLink { h: false, offset } => {
                Some(address.wrapping_add(4).wrapping_add_signed(offset))
            }
            _ => None,
        }
    }

    /// Effective address of a PC-relative load or load address at `address`.
    #[must_use]
    pub const fn pc_relative_target(&self, address: u32) -> Option<u32> {
        match *self {
            Self::PCRelativeLoad {
                immediate_value: offset,
                ..
            }
            | Self::LoadAddress {
                sp: false, offset, ..
            } => Some(pc_relative_base(address).wrapping_add(offset as u32)),
            _ => None,
        }
    }
}

/// PC as seen by PC-relative addressing: 4 bytes ahead with bit 1 cleared.
#[must_use]
pub const fn pc_relative_base(address: u32) -> u32 {
    address.wrapping_add(4) & !2
}

impl From<u16> for ThumbModeInstruction {
    fn from(op_code: u16) -> Self {
        match op_code.get_bits(13..=15) {
            0b000 => decode_shift_or_add_subtract(op_code),
            0b001 => Self::MoveCompareAddSubtractImm {
                operation: op_code.get_bits(11..=12).into(),
                destination_register: op_code.get_bits(8..=10),
                offset: op_code.get_bits(0..=7),
            },
            0b010 => decode_register_group(op_code),
            0b011 => {
                let byte_word: ReadWriteKind = op_code.get_bit(12).into();
                let offset = match byte_word {
                    ReadWriteKind::Word => op_code.get_bits(6..=10) << 2,
                    ReadWriteKind::Byte => op_code.get_bits(6..=10),
                };

                Self::LoadStoreImmOffset {
                    load_store: op_code.get_bit(11).into(),
                    byte_word,
                    offset,
                    base_register: op_code.get_bits(3..=5),
                    destination_register: op_code.get_bits(0..=2),
                }
            }
            0b100 if op_code.get_bit(12) => Self::SPRelativeLoadStore {
                load_store: op_code.get_bit(11).into(),
                destination_register: op_code.get_bits(8..=10),
                word8: op_code.get_bits(0..=7) << 2,
            },
            0b100 => Self::LoadStoreHalfword {
                load_store: op_code.get_bit(11).into(),
                offset: op_code.get_bits(6..=10) << 1,
                base_register: op_code.get_bits(3..=5),
                source_destination_register: op_code.get_bits(0..=2),
            },
            0b101 if op_code.get_bit(12) => decode_misc(op_code),
            0b101 => Self::LoadAddress {
                sp: op_code.get_bit(11),
                destination_register: op_code.get_bits(8..=10),
                offset: op_code.get_bits(0..=7) << 2,
            },
            0b110 if op_code.get_bit(12) => decode_branch_or_swi(op_code),
            0b110 => Self::MultipleLoadStore {
                load_store: op_code.get_bit(11).into(),
                base_register: op_code.get_bits(8..=10),
                register_list: op_code.get_bits(0..=7),
            },
            _ => match op_code.get_bits(11..=12) {
                0b00 => Self::UncondBranch {
                    offset: (u32::from(op_code.get_bits(0..=10)) << 1).sign_extended(12) as i32,
                },
                0b01 => undefined(op_code),
                h => {
                    let offset11 = u32::from(op_code.get_bits(0..=10));
                    let offset = if h == 0b11 {
                        (offset11 << 1) as i32
                    } else {
                        (offset11 << 12).sign_extended(23) as i32
                    };
                    Self::LongBranchLink {
                        h: h == 0b11,
                        offset,
                    }
                }
            },
        }
    }
}

fn undefined(op_code: u16) -> ThumbModeInstruction {
    tracing::debug!("undefined thumb instruction: opcode=0x{op_code:04X}");
    ThumbModeInstruction::Undefined { raw: op_code }
}

fn decode_shift_or_add_subtract(op_code: u16) -> ThumbModeInstruction {
    if op_code.get_bits(11..=12) == 0b11 {
        return ThumbModeInstruction::AddSubtract {
            operation_kind: op_code.get_bit(10).into(),
            subtract: op_code.get_bit(9),
            rn_offset3: op_code.get_bits(6..=8),
            source_register: op_code.get_bits(3..=5),
            destination_register: op_code.get_bits(0..=2),
        };
    }

    let shift_operation = ShiftKind::from_bits(u32::from(op_code.get_bits(11..=12)));
    let offset5 = match (shift_operation, op_code.get_bits(6..=10)) {
        (ShiftKind::Lsr | ShiftKind::Asr, 0) => 32,
        (_, offset) => offset,
    };

    ThumbModeInstruction::MoveShiftedRegister {
        shift_operation,
        offset5,
        source_register: op_code.get_bits(3..=5),
        destination_register: op_code.get_bits(0..=2),
    }
}

/// Formats 4 to 8, the `010` group.
fn decode_register_group(op_code: u16) -> ThumbModeInstruction {
    if op_code.get_bit(12) {
        let load_store_fields = (
            op_code.get_bits(6..=8),
            op_code.get_bits(3..=5),
            op_code.get_bits(0..=2),
        );
        let (ro, base_register, destination_register) = load_store_fields;

        return if op_code.get_bit(9) {
            ThumbModeInstruction::LoadStoreSignExtByteHalfword {
                h: op_code.get_bit(11),
                sign_extend_flag: op_code.get_bit(10),
                offset_register: ro,
                base_register,
                destination_register,
            }
        } else {
            ThumbModeInstruction::LoadStoreRegisterOffset {
                load_store: op_code.get_bit(11).into(),
                byte_word: op_code.get_bit(10).into(),
                ro,
                base_register,
                destination_register,
            }
        };
    }

    match op_code.get_bits(10..=11) {
        0b00 => ThumbModeInstruction::AluOp {
            alu_operation: op_code.get_bits(6..=9).into(),
            source_register: op_code.get_bits(3..=5),
            destination_register: op_code.get_bits(0..=2),
        },
        0b01 => {
            let high = |flag: bool, register: u16| if flag { register + 8 } else { register };
            ThumbModeInstruction::HiRegisterOpBX {
                register_operation: op_code.get_bits(8..=9).into(),
                source_register: high(op_code.get_bit(6), op_code.get_bits(3..=5)),
                destination_register: high(op_code.get_bit(7), op_code.get_bits(0..=2)),
            }
        }
        _ => ThumbModeInstruction::PCRelativeLoad {
            destination_register: op_code.get_bits(8..=10),
            immediate_value: op_code.get_bits(0..=7) << 2,
        },
    }
}

/// The `1011` group: only formats 13 and 14 are allocated.
fn decode_misc(op_code: u16) -> ThumbModeInstruction {
    if op_code.get_bits(8..=11) == 0b0000 {
        ThumbModeInstruction::AddOffsetSP {
            s: op_code.get_bit(7),
            word7: op_code.get_bits(0..=6) << 2,
        }
    } else if op_code.get_bit(10) && !op_code.get_bit(9) {
        ThumbModeInstruction::PushPopReg {
            load_store: op_code.get_bit(11).into(),
            pc_lr: op_code.get_bit(8),
            register_list: op_code.get_bits(0..=7),
        }
    } else {
        undefined(op_code)
    }
}

fn decode_branch_or_swi(op_code: u16) -> ThumbModeInstruction {
    match op_code.get_bits(8..=11) {
        0xE => undefined(op_code),
        0xF => {
            let comment = op_code.get_bits(0..=7);
            ThumbModeInstruction::Swi {
                comment,
                function: BiosFunction::try_from(u32::from(comment)).ok(),
            }
        }
        cond => Condition::try_from(cond as u8).map_or_else(
            |_| undefined(op_code),
            |condition| ThumbModeInstruction::CondBranch {
                condition,
                // 9 bits signed offset, the assembler stores `label >> 1`.
                immediate_offset: (u32::from(op_code.get_bits(0..=7)) << 1).sign_extended(9)
                    as i32,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_move_shifted_register() {
        assert_eq!(
            ThumbModeInstruction::from(0b000_00_00010_001_000),
            ThumbModeInstruction::MoveShiftedRegister {
                shift_operation: ShiftKind::Lsl,
                offset5: 2,
                source_register: 1,
                destination_register: 0,
            }
        );
        // LSR #0 encodes a shift by 32.
        assert_eq!(
            ThumbModeInstruction::from(0b000_01_00000_001_000),
            ThumbModeInstruction::MoveShiftedRegister {
                shift_operation: ShiftKind::Lsr,
                offset5: 32,
                source_register: 1,
                destination_register: 0,
            }
        );
    }

    #[test]
    fn decode_add_subtract() {
        assert_eq!(
            ThumbModeInstruction::from(0x1C40),
            ThumbModeInstruction::AddSubtract {
                operation_kind: OperandKind::Immediate,
                subtract: false,
                rn_offset3: 1,
                source_register: 0,
                destination_register: 0,
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0b00011_0_1_010_001_000),
            ThumbModeInstruction::AddSubtract {
                operation_kind: OperandKind::Register,
                subtract: true,
                rn_offset3: 2,
                source_register: 1,
                destination_register: 0,
            }
        );
    }

    #[test]
    fn decode_multiple_load_store() {
        let output = ThumbModeInstruction::from(0b1100_1001_1010_0000);
        assert_eq!(
            ThumbModeInstruction::MultipleLoadStore {
                load_store: LoadStoreKind::Load,
                base_register: 1,
                register_list: 160,
            },
            output
        );
    }

    #[test]
    fn decode_pc_relative_load() {
        let output = ThumbModeInstruction::from(0b0100_1001_0101_1000);
        assert_eq!(
            ThumbModeInstruction::PCRelativeLoad {
                destination_register: 1,
                immediate_value: 352,
            },
            output
        );
        assert_eq!(output.pc_relative_target(0x0800_0002), Some(0x0800_0164));
        assert_eq!(output.pc_relative_target(0x0800_0000), Some(0x0800_0164));
    }

    #[test]
    fn decode_load_store_register_offset() {
        let output = ThumbModeInstruction::from(0b0101_00_0_000_001_010);
        assert_eq!(
            ThumbModeInstruction::LoadStoreRegisterOffset {
                load_store: LoadStoreKind::Store,
                byte_word: ReadWriteKind::default(),
                ro: 0,
                base_register: 1,
                destination_register: 2,
            },
            output
        );

        let output = ThumbModeInstruction::from(0b0101_11_1_010_001_000);
        assert_eq!(
            ThumbModeInstruction::LoadStoreSignExtByteHalfword {
                h: true,
                sign_extend_flag: true,
                offset_register: 2,
                base_register: 1,
                destination_register: 0,
            },
            output
        );
    }

    #[test]
    fn decode_uncond_branch() {
        let output = ThumbModeInstruction::from(0b1110_0001_0010_1111);
        assert_eq!(ThumbModeInstruction::UncondBranch { offset: 606 }, output);
        assert_eq!(output.branch_target(0x0800_0000), Some(0x0800_0262));

        let output = ThumbModeInstruction::from(0b1110_0111_1111_1110);
        assert_eq!(ThumbModeInstruction::UncondBranch { offset: -4 }, output);
        assert_eq!(output.branch_target(0x0800_0010), Some(0x0800_0010));
    }

    #[test]
    fn decode_cond_branch() {
        let output = ThumbModeInstruction::from(0b1101_0001_1111_1100);
        assert_eq!(
            ThumbModeInstruction::CondBranch {
                condition: Condition::NE,
                immediate_offset: -8,
            },
            output
        );
        assert_eq!(output.branch_target(0x0800_0100), Some(0x0800_00FC));

        assert_eq!(
            ThumbModeInstruction::from(0xDE00),
            ThumbModeInstruction::Undefined { raw: 0xDE00 }
        );
    }

    #[test]
    fn decode_software_interrupt() {
        assert_eq!(
            ThumbModeInstruction::from(0xDF06),
            ThumbModeInstruction::Swi {
                comment: 6,
                function: Some(BiosFunction::Div),
            }
        );
        assert_eq!(
            ThumbModeInstruction::from(0xDF63),
            ThumbModeInstruction::Swi {
                comment: 0x63,
                function: None,
            }
        );
    }

    #[test]
    fn decode_hi_reg_operation() {
        let output = ThumbModeInstruction::from(0b0100_0111_0111_0000);
        assert_eq!(
            ThumbModeInstruction::HiRegisterOpBX {
                register_operation: ThumbHighRegisterOperation::Bx,
                source_register: 14,
                destination_register: 0,
            },
            output
        );

        let output = ThumbModeInstruction::from(0b010001_00_0_1_000_001);
        assert_eq!(
            ThumbModeInstruction::HiRegisterOpBX {
                register_operation: ThumbHighRegisterOperation::Add,
                source_register: 8,
                destination_register: 1,
            },
            output
        );

        let output = ThumbModeInstruction::from(0b010001_10_1_1_111_111);
        assert_eq!(
            ThumbModeInstruction::HiRegisterOpBX {
                register_operation: ThumbHighRegisterOperation::Mov,
                source_register: 15,
                destination_register: 15,
            },
            output
        );
    }

    #[test]
    fn decode_push_pop_register() {
        let output = ThumbModeInstruction::from(0b1011_0101_1111_0000);
        assert_eq!(
            ThumbModeInstruction::PushPopReg {
                load_store: LoadStoreKind::Store,
                pc_lr: true,
                register_list: 240,
            },
            output
        );
    }

    #[test]
    fn decode_add_offset_to_sp() {
        assert_eq!(
            ThumbModeInstruction::from(0b1011_0000_1000_0100),
            ThumbModeInstruction::AddOffsetSP { s: true, word7: 16 }
        );
        assert_eq!(
            ThumbModeInstruction::from(0b1011_0000_0111_1111),
            ThumbModeInstruction::AddOffsetSP {
                s: false,
                word7: 508
            }
        );
    }

    #[test]
    fn decode_unallocated_encodings() {
        for op_code in [0xB100_u16, 0xB200, 0xBE00, 0xBF00, 0xE800, 0xEFFF] {
            assert_eq!(
                ThumbModeInstruction::from(op_code),
                ThumbModeInstruction::Undefined { raw: op_code }
            );
            assert_eq!(
                ThumbModeInstruction::from(op_code).diagnostic(),
                Some(DecodeError::Undefined {
                    raw: u32::from(op_code)
                })
            );
        }
    }

    #[test]
    fn decode_alu_operation() {
        let cases = [
            (0b0100_0011_0110_0000_u16, ThumbModeAluInstruction::Mul, 4, 0),
            (0b0100_0000_0001_1000, ThumbModeAluInstruction::And, 3, 0),
            (0b0100_0010_0011_1110, ThumbModeAluInstruction::Tst, 7, 6),
            (0b0100_0011_0010_1010, ThumbModeAluInstruction::Orr, 5, 2),
            (0b0100_0011_1100_1111, ThumbModeAluInstruction::Mvn, 1, 7),
            (0b0100_0001_1110_0011, ThumbModeAluInstruction::Ror, 4, 3),
            (0b0100_0000_0101_0011, ThumbModeAluInstruction::Eor, 2, 3),
            (0b0100_0010_0100_0000, ThumbModeAluInstruction::Neg, 0, 0),
            (0b0100_0000_1000_1000, ThumbModeAluInstruction::Lsl, 1, 0),
            (0b0100_0001_0000_1000, ThumbModeAluInstruction::Asr, 1, 0),
        ];
        for (op_code, alu_operation, source_register, destination_register) in cases {
            assert_eq!(
                ThumbModeInstruction::from(op_code),
                ThumbModeInstruction::AluOp {
                    alu_operation,
                    source_register,
                    destination_register,
                }
            );
        }
    }

    #[test]
    fn decode_load_store_half_word() {
        let output = ThumbModeInstruction::from(0b1000_1_00001_000_001);
        assert_eq!(
            ThumbModeInstruction::LoadStoreHalfword {
                load_store: LoadStoreKind::Load,
                offset: 2,
                base_register: 0,
                source_destination_register: 1,
            },
            output
        );
    }

    #[test]
    fn decode_load_store_imm_offset() {
        // B=0 (word), L=1 (load), offset=2 (<<2 = 8), Rb=1, Rd=2
        let output = ThumbModeInstruction::from(0b0110_1_00010_001_010);
        assert_eq!(
            ThumbModeInstruction::LoadStoreImmOffset {
                load_store: LoadStoreKind::Load,
                byte_word: ReadWriteKind::Word,
                offset: 8,
                base_register: 1,
                destination_register: 2,
            },
            output
        );

        // B=1 (byte), L=1 (load), offset=7, Rb=6, Rd=5
        let output = ThumbModeInstruction::from(0b0111_1_00111_110_101);
        assert_eq!(
            ThumbModeInstruction::LoadStoreImmOffset {
                load_store: LoadStoreKind::Load,
                byte_word: ReadWriteKind::Byte,
                offset: 7,
                base_register: 6,
                destination_register: 5,
            },
            output
        );
    }

    #[test]
    fn decode_load_address_and_sp_relative() {
        let output = ThumbModeInstruction::from(0b1010_0_011_0000_0010);
        assert_eq!(
            ThumbModeInstruction::LoadAddress {
                sp: false,
                destination_register: 3,
                offset: 8,
            },
            output
        );
        assert_eq!(output.pc_relative_target(0x0800_0006), Some(0x0800_0010));

        assert_eq!(
            ThumbModeInstruction::from(0b1001_1_010_0000_0011),
            ThumbModeInstruction::SPRelativeLoadStore {
                load_store: LoadStoreKind::Load,
                destination_register: 2,
                word8: 12,
            }
        );
    }

    #[test]
    fn decode_long_branch_link() {
        let output = ThumbModeInstruction::from(0b1111_0_000_0000_0001);
        assert_eq!(
            ThumbModeInstruction::LongBranchLink {
                h: false,
                offset: 0x1000,
            },
            output
        );
        assert_eq!(output.branch_target(0x0800_0000), Some(0x0800_1004));

        let output = ThumbModeInstruction::from(0b1111_0_111_1111_1111);
        assert_eq!(
            ThumbModeInstruction::LongBranchLink {
                h: false,
                offset: -0x1000,
            },
            output
        );

        let output = ThumbModeInstruction::from(0b1111_1_000_0000_0010);
        assert_eq!(
            ThumbModeInstruction::LongBranchLink { h: true, offset: 4 },
            output
        );
        assert_eq!(output.branch_target(0x0800_0000), None);
    }
}
