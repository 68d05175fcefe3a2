//! # ALU Flag Engine
//!
//! The sixteen data processing operations. Logical operations take C from
//! the barrel shifter and leave V alone. Arithmetic operations compute C and
//! V from the addition itself: subtraction is `op1 + !op2 + 1`, so C is the
//! "no borrow" flag.

use crate::cpu::arm::alu_instruction::{AluInstructionKind, ArmModeAluInstruction, Kind};
use crate::cpu::barrel_shifter::ShiftedOperand;
use crate::cpu::flags::StatusFlags;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticOpResult {
    pub result: u32,
    pub carry: bool,
    pub overflow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    pub result: u32,
    pub flags: StatusFlags,
    /// False for TST, TEQ, CMP and CMN.
    pub writes_result: bool,
}

/// `first_op + second_op + carry_in` with a 64-bit intermediate.
#[must_use]
pub const fn add_with_carry(first_op: u32, second_op: u32, carry_in: bool) -> ArithmeticOpResult {
    let sum = first_op as u64 + second_op as u64 + carry_in as u64;
    let result = sum as u32;

    // Both operands share a sign and the result does not.
    let overflow = (!(first_op ^ second_op) & (first_op ^ result)) >> 31 == 1;

    ArithmeticOpResult {
        result,
        carry: sum >> 32 == 1,
        overflow,
    }
}

#[must_use]
pub const fn add_inner_op(first_op: u32, second_op: u32) -> ArithmeticOpResult {
    add_with_carry(first_op, second_op, false)
}

/// `first_op - second_op`. Carry is set when no borrow happened.
#[must_use]
pub const fn sub_inner_op(first_op: u32, second_op: u32) -> ArithmeticOpResult {
    add_with_carry(first_op, !second_op, true)
}

/// `first_op - second_op + carry_in - 1`.
#[must_use]
pub const fn sbc_inner_op(first_op: u32, second_op: u32, carry_in: bool) -> ArithmeticOpResult {
    add_with_carry(first_op, !second_op, carry_in)
}

impl ArmModeAluInstruction {
    /// Computes the operation on `op1` and the shifter output `op2`.
    ///
    /// `flags.c` is the carry in. When `set_flags` is false the returned
    /// flags are `flags` untouched.
    #[must_use]
    pub fn execute(
        self,
        op1: u32,
        op2: ShiftedOperand,
        flags: StatusFlags,
        set_flags: bool,
    ) -> AluResult {
        let value = op2.value;
        let carry_in = flags.c;

        let arithmetic = match self {
            Self::Sub | Self::Cmp => sub_inner_op(op1, value),
            Self::Rsb => sub_inner_op(value, op1),
            Self::Add | Self::Cmn => add_inner_op(op1, value),
            Self::Adc => add_with_carry(op1, value, carry_in),
            Self::Sbc => sbc_inner_op(op1, value, carry_in),
            Self::Rsc => sbc_inner_op(value, op1, carry_in),
            Self::And | Self::Tst => logical(op1 & value, op2.carry_out),
            Self::Eor | Self::Teq => logical(op1 ^ value, op2.carry_out),
            Self::Orr => logical(op1 | value, op2.carry_out),
            Self::Mov => logical(value, op2.carry_out),
            Self::Bic => logical(op1 & !value, op2.carry_out),
            Self::Mvn => logical(!value, op2.carry_out),
        };

        let flags = if set_flags {
            let overflow = match self.kind() {
                AluInstructionKind::Arithmetic => arithmetic.overflow,
                AluInstructionKind::Logical => flags.v,
            };
            StatusFlags {
                c: arithmetic.carry,
                v: overflow,
                ..flags
            }
            .with_result(arithmetic.result)
        } else {
            flags
        };

        AluResult {
            result: arithmetic.result,
            flags,
            writes_result: self.writes_result(),
        }
    }
}

const fn logical(result: u32, carry: bool) -> ArithmeticOpResult {
    ArithmeticOpResult {
        result,
        carry,
        overflow: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ArmModeAluInstruction::{Adc, Add, And, Cmp, Mov, Mvn, Rsb, Rsc, Sbc, Sub, Teq, Tst};

    fn operand(value: u32) -> ShiftedOperand {
        ShiftedOperand {
            value,
            carry_out: false,
        }
    }

    fn flags(n: bool, z: bool, c: bool, v: bool) -> StatusFlags {
        StatusFlags { n, z, c, v }
    }

    #[test]
    fn check_add_signed_overflow() {
        let out = Add.execute(0x7FFF_FFFF, operand(1), StatusFlags::default(), true);
        assert_eq!(out.result, 0x8000_0000);
        assert_eq!(out.flags, flags(true, false, false, true));
        assert!(out.writes_result);
    }

    #[test]
    fn check_add_unsigned_carry() {
        let out = Add.execute(0xFFFF_FFFF, operand(1), StatusFlags::default(), true);
        assert_eq!(out.result, 0);
        assert_eq!(out.flags, flags(false, true, true, false));
    }

    #[test]
    fn check_sub_borrow() {
        let out = Sub.execute(0, operand(1), StatusFlags::default(), true);
        assert_eq!(out.result, 0xFFFF_FFFF);
        assert_eq!(out.flags, flags(true, false, false, false));

        let out = Sub.execute(5, operand(5), StatusFlags::default(), true);
        assert_eq!(out.flags, flags(false, true, true, false));
    }

    #[test]
    fn check_sub_signed_overflow() {
        let out = Sub.execute(0x8000_0000, operand(1), StatusFlags::default(), true);
        assert_eq!(out.result, 0x7FFF_FFFF);
        assert_eq!(out.flags, flags(false, false, true, true));
    }

    #[test]
    fn check_reverse_subtract() {
        let out = Rsb.execute(1, operand(0), StatusFlags::default(), true);
        assert_eq!(out.result, 0xFFFF_FFFF);
        assert!(!out.flags.c);

        let out = Rsb.execute(3, operand(10), StatusFlags::default(), true);
        assert_eq!(out.result, 7);
        assert!(out.flags.c);
    }

    #[test]
    fn check_carry_in() {
        let carry = flags(false, false, true, false);

        let out = Adc.execute(1, operand(1), carry, true);
        assert_eq!(out.result, 3);

        let out = Sbc.execute(5, operand(3), carry, true);
        assert_eq!(out.result, 2);
        assert!(out.flags.c);

        let out = Sbc.execute(5, operand(3), StatusFlags::default(), true);
        assert_eq!(out.result, 1);
        assert!(out.flags.c);

        let out = Sbc.execute(0, operand(0), StatusFlags::default(), true);
        assert_eq!(out.result, 0xFFFF_FFFF);
        assert!(!out.flags.c);

        let out = Rsc.execute(3, operand(5), carry, true);
        assert_eq!(out.result, 2);
    }

    #[test]
    fn check_add_with_carry_flags() {
        let carry = flags(false, false, true, false);

        // The carry in alone pushes the sum to bit 32.
        let out = Adc.execute(0xFFFF_FFFF, operand(0), carry, true);
        assert_eq!(out.result, 0);
        assert_eq!(out.flags, flags(false, true, true, false));

        let out = Adc.execute(0x7FFF_FFFF, operand(0), carry, true);
        assert_eq!(out.result, 0x8000_0000);
        assert_eq!(out.flags, flags(true, false, false, true));

        let out = Adc.execute(0xFFFF_FFFF, operand(0), StatusFlags::default(), true);
        assert_eq!(out.flags, flags(true, false, false, false));
    }

    #[test]
    fn check_subtract_with_carry_flags() {
        let out = Sbc.execute(0x8000_0000, operand(0), StatusFlags::default(), true);
        assert_eq!(out.result, 0x7FFF_FFFF);
        assert_eq!(out.flags, flags(false, false, true, true));

        let out = Sbc.execute(0x7FFF_FFFF, operand(0xFFFF_FFFF), StatusFlags::default(), true);
        assert_eq!(out.result, 0x7FFF_FFFF);
        assert_eq!(out.flags, flags(false, false, false, false));
    }

    #[test]
    fn check_reverse_subtract_overflow() {
        let out = Rsb.execute(1, operand(0x8000_0000), StatusFlags::default(), true);
        assert_eq!(out.result, 0x7FFF_FFFF);
        assert_eq!(out.flags, flags(false, false, true, true));

        let out = Rsb.execute(0xFFFF_FFFF, operand(0x7FFF_FFFF), StatusFlags::default(), true);
        assert_eq!(out.result, 0x8000_0000);
        assert_eq!(out.flags, flags(true, false, false, true));
    }

    #[test]
    fn check_reverse_subtract_with_carry_flags() {
        let carry = flags(false, false, true, false);

        let out = Rsc.execute(0, operand(0), StatusFlags::default(), true);
        assert_eq!(out.result, 0xFFFF_FFFF);
        assert_eq!(out.flags, flags(true, false, false, false));

        let out = Rsc.execute(3, operand(5), carry, true);
        assert_eq!(out.flags, flags(false, false, true, false));

        let out = Rsc.execute(1, operand(0x8000_0000), carry, true);
        assert_eq!(out.result, 0x7FFF_FFFF);
        assert_eq!(out.flags, flags(false, false, true, true));
    }

    #[test]
    fn check_logical_uses_shifter_carry() {
        let previous = flags(false, false, false, true);
        let op2 = ShiftedOperand {
            value: 0x0F,
            carry_out: true,
        };

        let out = And.execute(0xF0, op2, previous, true);
        assert_eq!(out.result, 0);
        assert_eq!(out.flags, flags(false, true, true, true));

        let out = Mvn.execute(0, op2, previous, true);
        assert_eq!(out.result, 0xFFFF_FFF0);
        assert_eq!(out.flags, flags(true, false, true, true));
    }

    #[test]
    fn check_flags_untouched_without_set_flags() {
        let previous = flags(true, false, true, true);
        let out = Add.execute(0xFFFF_FFFF, operand(1), previous, false);
        assert_eq!(out.result, 0);
        assert_eq!(out.flags, previous);

        let out = Mov.execute(0, operand(0), previous, false);
        assert_eq!(out.flags, previous);
    }

    #[test]
    fn check_test_operations_discard_result() {
        let out = Cmp.execute(1, operand(1), StatusFlags::default(), true);
        assert!(!out.writes_result);
        assert!(out.flags.z);

        let out = Tst.execute(0b1010, operand(0b0101), StatusFlags::default(), true);
        assert!(!out.writes_result);
        assert!(out.flags.z);

        let out = Teq.execute(7, operand(7), StatusFlags::default(), true);
        assert!(!out.writes_result);
        assert!(out.flags.z);
    }
}
