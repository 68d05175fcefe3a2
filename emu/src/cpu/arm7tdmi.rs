use crate::bus::{MemoryBus, ROM};
use crate::cpu::arm::mode::ArmModeOpcode;
use crate::cpu::instruction::{DecodedInstruction, Disassembly};
use crate::cpu::psr::{CpuState, Psr};
use crate::cpu::registers::Registers;
use crate::cpu::thumb::mode::ThumbModeOpcode;
use crate::error::{BusError, EmuError};

/// Driving loop: fetches from the bus, decodes and renders one instruction
/// per [`Arm7tdmi::step`]. Nothing is executed, the PC only moves forward.
pub struct Arm7tdmi<B: MemoryBus> {
    bus: B,

    pub cpsr: Psr,
    pub registers: Registers,
}

impl<B: MemoryBus> Arm7tdmi<B> {
    /// ARM state with the PC at the start of the ROM window.
    pub fn new(bus: B) -> Self {
        let mut registers = Registers::default();
        registers.set_program_counter(*ROM.start());

        Self {
            bus,
            cpsr: Psr::default(),
            registers,
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: CpuState) -> Self {
        self.cpsr.set_cpu_state(state);
        self
    }

    #[must_use]
    pub fn with_program_counter(mut self, address: u32) -> Self {
        self.registers.set_program_counter(address);
        self
    }

    /// # Errors
    ///
    /// The PC must be word aligned and mapped.
    pub fn fetch_arm(&self) -> Result<u32, BusError> {
        let address = self.aligned_program_counter(CpuState::Arm)?;
        self.bus.read_word(address)
    }

    /// # Errors
    ///
    /// The PC must be halfword aligned and mapped.
    pub fn fetch_thumb(&self) -> Result<u16, BusError> {
        let address = self.aligned_program_counter(CpuState::Thumb)?;
        self.bus.read_half_word(address)
    }

    fn aligned_program_counter(&self, state: CpuState) -> Result<u32, BusError> {
        let address = self.registers.program_counter();
        let width = state.instruction_width();
        if address % width != 0 {
            return Err(BusError::AlignmentViolation { address, width });
        }
        Ok(address)
    }

    /// Decodes the instruction at the PC in the current state and moves the
    /// PC past it. Odd encodings are logged and still listed.
    ///
    /// ARM conditions are checked against the CPSR flags for the logs only.
    ///
    /// # Errors
    ///
    /// Fetch failures. The PC is left untouched in that case.
    pub fn step(&mut self) -> Result<Disassembly, EmuError> {
        let address = self.registers.program_counter();
        let state = self.cpsr.cpu_state();

        let raw = match state {
            CpuState::Arm => self.fetch_arm()?,
            CpuState::Thumb => u32::from(self.fetch_thumb()?),
        };

        let instruction = DecodedInstruction::decode(state, raw);
        match state {
            CpuState::Arm => tracing::trace!("\n{}", ArmModeOpcode::from(raw)),
            CpuState::Thumb => tracing::trace!("\n{}", ThumbModeOpcode::from(raw as u16)),
        }
        if let Some(diagnostic) = instruction.diagnostic() {
            tracing::warn!(address = format_args!("0x{address:08x}"), "{diagnostic}");
        }

        let passes = self.condition_passes(&instruction);
        let line = Disassembly::new(address, raw, instruction);
        tracing::debug!(?state, ?passes, "{line}");

        self.registers
            .advance_program_counter(state.instruction_width());

        Ok(line)
    }

    /// `None` when the instruction has no condition field.
    #[must_use]
    pub fn condition_passes(&self, instruction: &DecodedInstruction) -> Option<bool> {
        match instruction {
            DecodedInstruction::Arm(arm) => arm
                .condition()
                .map(|condition| condition.evaluate(self.cpsr.flags())),
            DecodedInstruction::Thumb(_) => None,
        }
    }
}
