use crate::cpu::flags::{LoadStoreKind, OperandKind, ReadWriteKind};
use crate::cpu::instruction::{braces, join_operands, register_names};
use crate::cpu::swi::swi_operand;
use crate::cpu::thumb::alu_instructions::ThumbHighRegisterOperation;
use crate::cpu::thumb::instruction::ThumbModeInstruction;

fn reg(index: u16) -> String {
    format!("R{index}")
}

const fn load_store(load_store: LoadStoreKind, byte_word: ReadWriteKind) -> &'static str {
    match (load_store, byte_word) {
        (LoadStoreKind::Load, ReadWriteKind::Byte) => "LDRB",
        (LoadStoreKind::Load, ReadWriteKind::Word) => "LDR",
        (LoadStoreKind::Store, ReadWriteKind::Byte) => "STRB",
        (LoadStoreKind::Store, ReadWriteKind::Word) => "STR",
    }
}

impl ThumbModeInstruction {
    /// Assembler syntax of the instruction, e.g. `ADD R0,R0,#1`.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn disassembler(&self) -> String {
        match *self {
            Self::MoveShiftedRegister {
                shift_operation,
                offset5,
                source_register,
                destination_register,
            } => join_operands(
                shift_operation.mnemonic(),
                &[
                    reg(destination_register),
                    reg(source_register),
                    format!("#{offset5}"),
                ],
            ),
            Self::AddSubtract {
                operation_kind,
                subtract,
                rn_offset3,
                source_register: rs,
                destination_register: rd,
            } => {
                let o = if subtract { "SUB" } else { "ADD" };
                let rr = match operation_kind {
                    OperandKind::Immediate => format!("#{rn_offset3}"),
                    OperandKind::Register => reg(rn_offset3),
                };
                join_operands(o, &[reg(rd), reg(rs), rr])
            }
            Self::MoveCompareAddSubtractImm {
                operation,
                destination_register,
                offset,
            } => join_operands(
                &operation.to_string(),
                &[reg(destination_register), format!("#{offset}")],
            ),
            Self::AluOp {
                alu_operation,
                source_register: rs,
                destination_register: rd,
            } => join_operands(&alu_operation.to_string(), &[reg(rd), reg(rs)]),
            Self::HiRegisterOpBX {
                register_operation: ThumbHighRegisterOperation::Bx,
                source_register,
                ..
            } => join_operands("BX", &[reg(source_register)]),
            Self::HiRegisterOpBX {
                register_operation,
                source_register,
                destination_register,
            } => join_operands(
                &register_operation.to_string(),
                &[reg(destination_register), reg(source_register)],
            ),
            Self::PCRelativeLoad {
                destination_register,
                immediate_value,
            } => join_operands(
                "LDR",
                &[
                    reg(destination_register),
                    format!("[PC,#{immediate_value}]"),
                ],
            ),
            Self::LoadStoreRegisterOffset {
                load_store: kind,
                byte_word,
                ro,
                base_register: rb,
                destination_register: rd,
            } => join_operands(
                load_store(kind, byte_word),
                &[reg(rd), format!("[{},{}]", reg(rb), reg(ro))],
            ),
            Self::LoadStoreSignExtByteHalfword {
                h: h_flag,
                sign_extend_flag,
                offset_register,
                base_register,
                destination_register,
            } => {
                let instr = match (sign_extend_flag, h_flag) {
                    (false, false) => "STRH",
                    (false, true) => "LDRH",
                    (true, false) => "LDSB",
                    (true, true) => "LDSH",
                };
                join_operands(
                    instr,
                    &[
                        reg(destination_register),
                        format!("[{},{}]", reg(base_register), reg(offset_register)),
                    ],
                )
            }
            Self::LoadStoreImmOffset {
                load_store: kind,
                byte_word,
                offset,
                base_register: rb,
                destination_register: rd,
            } => join_operands(
                load_store(kind, byte_word),
                &[reg(rd), format!("[{},#{offset}]", reg(rb))],
            ),
            Self::LoadStoreHalfword {
                load_store: kind,
                offset,
                base_register,
                source_destination_register,
            } => {
                let instr = match kind {
                    LoadStoreKind::Load => "LDRH",
                    LoadStoreKind::Store => "STRH",
                };
                join_operands(
                    instr,
                    &[
                        reg(source_destination_register),
                        format!("[{},#{offset}]", reg(base_register)),
                    ],
                )
            }
            Self::SPRelativeLoadStore {
                load_store: kind,
                destination_register,
                word8,
            } => join_operands(
                load_store(kind, ReadWriteKind::Word),
                &[reg(destination_register), format!("[SP,#{word8}]")],
            ),
            Self::LoadAddress {
                sp,
                destination_register,
                offset,
            } => {
                let source = if sp { "SP" } else { "PC" };
                join_operands(
                    "ADD",
                    &[
                        reg(destination_register),
                        source.to_string(),
                        format!("#{offset}"),
                    ],
                )
            }
            Self::AddOffsetSP { s, word7 } => {
                let op = if s { "SUB" } else { "ADD" };
                join_operands(op, &["SP".to_string(), format!("#{word7}")])
            }
            Self::PushPopReg {
                load_store: kind,
                pc_lr,
                register_list,
            } => {
                let (instr, extra) = match kind {
                    LoadStoreKind::Load => ("POP", "PC"),
                    LoadStoreKind::Store => ("PUSH", "LR"),
                };
                let mut registers = register_names(register_list);
                if pc_lr {
                    registers.push(extra.to_string());
                }
                format!("{instr} {}", braces(&registers))
            }
            Self::MultipleLoadStore {
                load_store: kind,
                base_register,
                register_list,
            } => {
                let instr = match kind {
                    LoadStoreKind::Load => "LDMIA",
                    LoadStoreKind::Store => "STMIA",
                };
                join_operands(
                    instr,
                    &[
                        format!("{}!", reg(base_register)),
                        braces(&register_names(register_list)),
                    ],
                )
            }
            Self::CondBranch {
                condition,
                immediate_offset,
            } => format!("B{condition} #{immediate_offset}"),
            Self::Swi { comment, function } => {
                format!("SWI {}", swi_operand(u32::from(comment), function))
            }
            Self::UncondBranch { offset } => format!("B #{offset}"),
            Self::LongBranchLink { h, offset } => {
                let h = if h { "H" } else { "" };
                format!("BL{h} #{offset}")
            }
            Self::Undefined { raw } => format!("UNDEFINED 0x{raw:04X}"),
        }
    }
}
