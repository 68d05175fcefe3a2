use crate::cpu::arm::alu_instruction::{AluSecondOperandInfo, PsrOpKind, ShiftOperator};
use crate::cpu::arm::instructions::{
    ArmModeInstruction, ArmModeMultiplyVariant, HalfwordDataTransferOffsetKind,
    SingleDataTransferOffsetInfo,
};
use crate::cpu::flags::{Indexing, LoadStoreKind, Offsetting, ReadWriteKind};
use crate::cpu::instruction::{immediate, join_operands, register, register_list, shift};
use crate::cpu::swi::swi_operand;

impl ArmModeInstruction {
    /// Assembler syntax of the instruction, e.g. `ADDS R0,R1,R2,LSL #3`.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn disassembler(&self) -> String {
        match self {
            Self::DataProcessing {
                condition,
                alu_instruction,
                set_conditions,
                rn,
                destination,
                op2,
            } => {
                let op2 = second_operand(op2);
                if alu_instruction.is_test() {
                    return join_operands(
                        &format!("{alu_instruction}{condition}"),
                        &[register(*rn), op2],
                    );
                }

                let s = if *set_conditions { "S" } else { "" };
                let mnemonic = format!("{alu_instruction}{condition}{s}");
                if alu_instruction.is_move() {
                    join_operands(&mnemonic, &[register(*destination), op2])
                } else {
                    join_operands(&mnemonic, &[register(*destination), register(*rn), op2])
                }
            }
            Self::PSRTransfer {
                condition,
                psr_kind,
                kind,
            } => match kind {
                PsrOpKind::Mrs {
                    destination_register,
                } => join_operands(
                    &format!("MRS{condition}"),
                    &[register(*destination_register), psr_kind.to_string()],
                ),
                PsrOpKind::MsrFlg { operand } => join_operands(
                    &format!("MSR{condition}"),
                    &[format!("{psr_kind}_flg"), second_operand(operand)],
                ),
            },
            Self::Multiply {
                variant,
                condition,
                should_set_codes,
                rd_destination_register,
                rn_accumulate_register,
                rs_operand_register,
                rm_operand_register,
            } => {
                let s = if *should_set_codes { "S" } else { "" };
                let mut operands = vec![
                    register(*rd_destination_register),
                    register(*rm_operand_register),
                    register(*rs_operand_register),
                ];
                if *variant == ArmModeMultiplyVariant::Mla {
                    operands.push(register(*rn_accumulate_register));
                }
                join_operands(&format!("{variant}{condition}{s}"), &operands)
            }
            Self::MultiplyLong {
                variant,
                condition,
                should_set_codes,
                rdhi_destination_register,
                rdlo_destination_register,
                rs_operand_register,
                rm_operand_register,
            } => {
                let s = if *should_set_codes { "S" } else { "" };
                join_operands(
                    &format!("{variant}{condition}{s}"),
                    &[
                        register(*rdlo_destination_register),
                        register(*rdhi_destination_register),
                        register(*rm_operand_register),
                        register(*rs_operand_register),
                    ],
                )
            }
            Self::SingleDataSwap {
                condition,
                quantity,
                rn,
                rd,
                rm,
            } => {
                let b = byte_suffix(*quantity);
                join_operands(
                    &format!("SWP{condition}{b}"),
                    &[register(*rd), register(*rm), format!("[{}]", register(*rn))],
                )
            }
            Self::BranchAndExchange {
                condition,
                register: rn,
            } => join_operands(&format!("BX{condition}"), &[register(*rn)]),
            Self::HalfwordDataTransfer {
                condition,
                indexing,
                offsetting,
                write_back,
                load_store_kind,
                offset_kind,
                base_register,
                source_destination_register,
                transfer_kind,
            } => {
                let sign = sign(*offsetting);
                let offset = match offset_kind {
                    HalfwordDataTransferOffsetKind::Immediate { offset: 0 } => None,
                    HalfwordDataTransferOffsetKind::Immediate { offset } => {
                        Some(format!("#{sign}{offset}"))
                    }
                    HalfwordDataTransferOffsetKind::Register { register: rm } => {
                        Some(format!("{sign}{}", register(*rm)))
                    }
                };
                let op = load_store(*load_store_kind);
                join_operands(
                    &format!("{op}{condition}{transfer_kind}"),
                    &[
                        register(*source_destination_register),
                        address(*base_register, offset, *indexing, *write_back),
                    ],
                )
            }
            Self::SingleDataTransfer {
                condition,
                kind,
                quantity,
                write_back,
                indexing,
                offsetting,
                rd,
                base_register,
                offset_info,
            } => {
                let sign = sign(*offsetting);
                let offset = match offset_info {
                    SingleDataTransferOffsetInfo::Immediate { offset: 0 } => None,
                    SingleDataTransferOffsetInfo::Immediate { offset } => {
                        Some(format!("#{sign}{offset}"))
                    }
                    SingleDataTransferOffsetInfo::RegisterImmediate {
                        shift: amount,
                        reg_offset,
                    } => {
                        let rm = format!("{sign}{}", register(*reg_offset));
                        Some(if amount.is_identity() {
                            rm
                        } else {
                            format!("{rm},{}", shift(*amount))
                        })
                    }
                };
                let op = load_store(*kind);
                let b = byte_suffix(*quantity);
                // Post-indexed with write back forces a user mode access.
                let t = if *indexing == Indexing::Post && *write_back {
                    "T"
                } else {
                    ""
                };
                join_operands(
                    &format!("{op}{condition}{b}{t}"),
                    &[
                        register(*rd),
                        address(*base_register, offset, *indexing, *write_back),
                    ],
                )
            }
            Self::BlockDataTransfer {
                condition,
                addressing_mode,
                load_psr,
                write_back,
                load_store,
                rn,
                register_list: list,
            } => {
                let op = match load_store {
                    LoadStoreKind::Store => "STM",
                    LoadStoreKind::Load => "LDM",
                };
                let w = if *write_back { "!" } else { "" };
                let psr = if *load_psr { "^" } else { "" };
                join_operands(
                    &format!("{op}{condition}{addressing_mode}"),
                    &[
                        format!("{}{w}", register(*rn)),
                        format!("{}{psr}", register_list(*list)),
                    ],
                )
            }
            Self::Branch {
                condition,
                link,
                offset,
            } => {
                let l = if *link { "L" } else { "" };
                format!("B{l}{condition} #{offset}")
            }
            Self::SoftwareInterrupt {
                condition,
                comment,
                function,
            } => format!("SWI{condition} {}", swi_operand(*comment, *function)),
            Self::Unsupported {
                condition, class, ..
            } => format!("{}{condition} ; unsupported {class}", class.mnemonic()),
            Self::Undefined { raw } => format!("UNDEFINED 0x{raw:08X}"),
            Self::Invalid { raw, reason } => format!("INVALID 0x{raw:08X} ; {reason}"),
        }
    }
}

fn second_operand(op2: &AluSecondOperandInfo) -> String {
    match op2 {
        AluSecondOperandInfo::Immediate { value, .. } => immediate(*value),
        AluSecondOperandInfo::Register {
            register: rm,
            shift_operator: ShiftOperator::Immediate(amount),
        } => {
            if amount.is_identity() {
                register(*rm)
            } else {
                format!("{},{}", register(*rm), shift(*amount))
            }
        }
        AluSecondOperandInfo::Register {
            register: rm,
            shift_operator: ShiftOperator::Register { kind, register: rs },
        } => format!("{},{} {}", register(*rm), kind.mnemonic(), register(*rs)),
    }
}

fn address(base: u32, offset: Option<String>, indexing: Indexing, write_back: bool) -> String {
    let base = register(base);
    match (indexing, offset) {
        (Indexing::Pre, offset) => {
            let w = if write_back { "!" } else { "" };
            offset.map_or_else(
                || format!("[{base}]{w}"),
                |offset| format!("[{base},{offset}]{w}"),
            )
        }
        (Indexing::Post, None) => format!("[{base}]"),
        (Indexing::Post, Some(offset)) => format!("[{base}],{offset}"),
    }
}

const fn sign(offsetting: Offsetting) -> &'static str {
    match offsetting {
        Offsetting::Up => "",
        Offsetting::Down => "-",
    }
}

const fn load_store(kind: LoadStoreKind) -> &'static str {
    match kind {
        LoadStoreKind::Store => "STR",
        LoadStoreKind::Load => "LDR",
    }
}

const fn byte_suffix(quantity: ReadWriteKind) -> &'static str {
    match quantity {
        ReadWriteKind::Word => "",
        ReadWriteKind::Byte => "B",
    }
}
