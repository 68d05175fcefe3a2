use crate::cpu::arm::instructions::ArmModeInstruction;
use crate::cpu::condition::Condition;

/// A raw ARM word next to its decoded form.
///
/// `Display` prints a bit-by-bit dump of the word under the field layout of
/// its format, which is handy when chasing a decoding problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmModeOpcode {
    pub instruction: ArmModeInstruction,
    pub raw: u32,
}

impl ArmModeOpcode {
    #[must_use]
    pub const fn condition(&self) -> Option<Condition> {
        self.instruction.condition()
    }

    const fn layout(&self) -> &'static str {
        match self.instruction {
            ArmModeInstruction::DataProcessing { .. } => {
                "FMT: |_Cond__|0_0|I|_code__|S|__Rn___|__Rd___|_______operand2________|"
            }
            ArmModeInstruction::PSRTransfer { .. } => {
                "FMT: |_Cond__|0_0|I|1_0|P|_type_____|__Rd___|_______operand2________|"
            }
            ArmModeInstruction::Multiply { .. } => {
                "FMT: |_Cond__|0_0_0_0_0_0|A|S|__Rd___|__Rn___|__Rs___|1_0_0_1|__Rm___|"
            }
            ArmModeInstruction::MultiplyLong { .. } => {
                "FMT: |_Cond__|0_0_0_0_1|U|A|S|_RdHi__|_RdLo__|__Rs___|1_0_0_1|__Rm___|"
            }
            ArmModeInstruction::SingleDataSwap { .. } => {
                "FMT: |_Cond__|0_0_0_1_0|B|0_0|__Rn___|__Rd___|0_0_0_0|1_0_0_1|__Rm___|"
            }
            ArmModeInstruction::BranchAndExchange { .. } => {
                "FMT: |_Cond__|0_0_0_1|0_0_1_0|1_1_1_1|1_1_1_1|1_1_1_1|0_0_0_1|__Rn___|"
            }
            ArmModeInstruction::HalfwordDataTransfer { .. } => {
                "FMT: |_Cond__|0_0_0|P|U|I|W|L|__Rn___|__Rd___|_Offset|1|S|H|1|Rm/Off_|"
            }
            ArmModeInstruction::SingleDataTransfer { .. } => {
                "FMT: |_Cond__|0_1|I|P|U|B|W|L|__Rn___|__Rd___|________Offset_________|"
            }
            ArmModeInstruction::BlockDataTransfer { .. } => {
                "FMT: |_Cond__|1_0_0|P|U|S|W|L|__Rn___|_____________Reg_List______________|"
            }
            ArmModeInstruction::Branch { .. } => {
                "FMT: |_Cond__|1_0_1|L|______________________Offset_______________________|"
            }
            ArmModeInstruction::SoftwareInterrupt { .. } => {
                "FMT: |_Cond__|1_1_1_1|_____________Comment_Field_____________________|"
            }
            ArmModeInstruction::Unsupported { .. } => {
                "FMT: |_Cond__|1_1|_______________Coprocessor_________________________|"
            }
            ArmModeInstruction::Undefined { .. } | ArmModeInstruction::Invalid { .. } => {
                "FMT: |_Cond__|_____________________________________________________|"
            }
        }
    }
}

impl From<u32> for ArmModeOpcode {
    fn from(op_code: u32) -> Self {
        Self {
            instruction: ArmModeInstruction::from(op_code),
            raw: op_code,
        }
    }
}

impl std::ops::Deref for ArmModeOpcode {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

impl std::fmt::Display for ArmModeOpcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let instruction = self.instruction.disassembler();

        let mut raw_bits = String::new();
        for bit in format!("{:032b}", self.raw).chars() {
            raw_bits.push(bit);
            raw_bits.push('_');
        }
        raw_bits.pop();

        writeln!(f, "INS: {instruction}")?;
        writeln!(
            f,
            "POS: |..3 ..................2 ..................1 ..................0|"
        )?;
        writeln!(
            f,
            "     |1_0_9_8_7_6_5_4_3_2_1_0_9_8_7_6_5_4_3_2_1_0_9_8_7_6_5_4_3_2_1_0|"
        )?;
        writeln!(f, "RAW: |{raw_bits}|")?;
        writeln!(f, "{}", self.layout())
    }
}
