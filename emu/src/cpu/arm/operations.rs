use crate::cpu::arm::alu_instruction::{AluSecondOperandInfo, ShiftOperator};
use crate::cpu::arm::instructions::ArmModeInstruction;
use crate::cpu::barrel_shifter::{Shift, immediate_operand};
use crate::cpu::flags::StatusFlags;
use crate::cpu::registers::{REG_PROGRAM_COUNTER, Registers};

pub const SIZE_OF_INSTRUCTION: u32 = 4;

/// What a data processing instruction would do to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataProcessingOutcome {
    /// False when the condition failed: nothing else changes then.
    pub executed: bool,
    /// `(register, value)` to store, absent for TST/TEQ/CMP/CMN.
    pub write: Option<(u32, u32)>,
    pub flags: StatusFlags,
}

/// Runs a data processing instruction against a register snapshot.
///
/// `registers` holds R15 as the pipelined PC (instruction address + 8).
/// When the shift amount comes from a register, R15 read as an operand is
/// one more word ahead. Returns `None` for any other instruction kind.
#[must_use]
pub fn execute_data_processing(
    instruction: &ArmModeInstruction,
    registers: &Registers,
    flags: StatusFlags,
) -> Option<DataProcessingOutcome> {
    let ArmModeInstruction::DataProcessing {
        condition,
        alu_instruction,
        set_conditions,
        rn,
        destination,
        op2,
    } = *instruction
    else {
        return None;
    };

    if !condition.evaluate(flags) {
        return Some(DataProcessingOutcome {
            executed: false,
            write: None,
            flags,
        });
    }

    let register_shift = matches!(
        op2,
        AluSecondOperandInfo::Register {
            shift_operator: ShiftOperator::Register { .. },
            ..
        }
    );
    let read = |register: u32| {
        let value = registers.register_at(register);
        if register & 0xF == REG_PROGRAM_COUNTER && register_shift {
            value.wrapping_add(SIZE_OF_INSTRUCTION)
        } else {
            value
        }
    };

    let operand = match op2 {
        AluSecondOperandInfo::Immediate { value, rotate } => {
            immediate_operand(value.rotate_left((rotate & 0xF) * 2), rotate, flags.c)
        }
        AluSecondOperandInfo::Register {
            register,
            shift_operator: ShiftOperator::Immediate(shift),
        } => shift.apply(read(register), flags.c),
        AluSecondOperandInfo::Register {
            register,
            shift_operator: ShiftOperator::Register { kind, register: rs },
        } => {
            // Only the bottom byte of Rs is used. R15 is never a valid Rs.
            let amount = registers.register_at(rs);
            Shift::from_register(kind, amount).apply(read(register), flags.c)
        }
    };

    let result = alu_instruction.execute(read(rn), operand, flags, set_conditions);
    tracing::debug!(
        "{alu_instruction}: result=0x{:08X} flags={:?}",
        result.result,
        result.flags
    );

    Some(DataProcessingOutcome {
        executed: true,
        write: result
            .writes_result
            .then_some((destination, result.result)),
        flags: result.flags,
    })
}
