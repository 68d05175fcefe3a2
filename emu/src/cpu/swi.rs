//! GBA BIOS functions reachable through `SWI`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Amount of functions provided by the GBA BIOS.
pub const BIOS_FUNCTIONS: usize = 43;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiosFunction {
    SoftReset = 0x00,
    RegisterRamReset = 0x01,
    Halt = 0x02,
    Stop = 0x03,
    IntrWait = 0x04,
    VBlankIntrWait = 0x05,
    Div = 0x06,
    DivArm = 0x07,
    Sqrt = 0x08,
    ArcTan = 0x09,
    ArcTan2 = 0x0A,
    CpuSet = 0x0B,
    CpuFastSet = 0x0C,
    BiosChecksum = 0x0D,
    BgAffineSet = 0x0E,
    ObjAffineSet = 0x0F,
    BitUnPack = 0x10,
    Lz77UnCompWram = 0x11,
    Lz77UnCompVram = 0x12,
    HuffUnComp = 0x13,
    RlUnCompWram = 0x14,
    RlUnCompVram = 0x15,
    Diff8bitUnFilterWram = 0x16,
    Diff8bitUnFilterVram = 0x17,
    Diff16bitUnFilter = 0x18,
    SoundBiasChange = 0x19,
    SoundDriverInit = 0x1A,
    SoundDriverMode = 0x1B,
    SoundDriverMain = 0x1C,
    SoundDriverVSync = 0x1D,
    SoundChannelClear = 0x1E,
    MidiKey2Freq = 0x1F,
    MusicPlayerOpen = 0x20,
    MusicPlayerStart = 0x21,
    MusicPlayerStop = 0x22,
    MusicPlayerContinue = 0x23,
    MusicPlayerFadeOut = 0x24,
    MultiBoot = 0x25,
    HardReset = 0x26,
    CustomHalt = 0x27,
    SoundDriverVSyncOff = 0x28,
    SoundDriverVSyncOn = 0x29,
    GetJumpList = 0x2A,
}

impl BiosFunction {
    const ALL: [Self; BIOS_FUNCTIONS] = [
        Self::SoftReset,
        Self::RegisterRamReset,
        Self::Halt,
        Self::Stop,
        Self::IntrWait,
        Self::VBlankIntrWait,
        Self::Div,
        Self::DivArm,
        Self::Sqrt,
        Self::ArcTan,
        Self::ArcTan2,
        Self::CpuSet,
        Self::CpuFastSet,
        Self::BiosChecksum,
        Self::BgAffineSet,
        Self::ObjAffineSet,
        Self::BitUnPack,
        Self::Lz77UnCompWram,
        Self::Lz77UnCompVram,
        Self::HuffUnComp,
        Self::RlUnCompWram,
        Self::RlUnCompVram,
        Self::Diff8bitUnFilterWram,
        Self::Diff8bitUnFilterVram,
        Self::Diff16bitUnFilter,
        Self::SoundBiasChange,
        Self::SoundDriverInit,
        Self::SoundDriverMode,
        Self::SoundDriverMain,
        Self::SoundDriverVSync,
        Self::SoundChannelClear,
        Self::MidiKey2Freq,
        Self::MusicPlayerOpen,
        Self::MusicPlayerStart,
        Self::MusicPlayerStop,
        Self::MusicPlayerContinue,
        Self::MusicPlayerFadeOut,
        Self::MultiBoot,
        Self::HardReset,
        Self::CustomHalt,
        Self::SoundDriverVSyncOff,
        Self::SoundDriverVSyncOn,
        Self::GetJumpList,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SoftReset => "SoftReset",
            Self::RegisterRamReset => "RegisterRamReset",
            Self::Halt => "Halt",
            Self::Stop => "Stop",
            Self::IntrWait => "IntrWait",
            Self::VBlankIntrWait => "VBlankIntrWait",
            Self::Div => "Div",
            Self::DivArm => "DivArm",
            Self::Sqrt => "Sqrt",
            Self::ArcTan => "ArcTan",
            Self::ArcTan2 => "ArcTan2",
            Self::CpuSet => "CPUSet",
            Self::CpuFastSet => "CPUFastSet",
            Self::BiosChecksum => "BiosChecksum",
            Self::BgAffineSet => "BgAffineSet",
            Self::ObjAffineSet => "ObjAffineSet",
            Self::BitUnPack => "BitUnPack",
            Self::Lz77UnCompWram => "LZ77UnCompWRAM",
            Self::Lz77UnCompVram => "LZ77UnCompVRAM",
            Self::HuffUnComp => "HuffUnComp",
            Self::RlUnCompWram => "RLUnCompWRAM",
            Self::RlUnCompVram => "RLUnCompVRAM",
            Self::Diff8bitUnFilterWram => "Diff8bitUnFilterWRAM",
            Self::Diff8bitUnFilterVram => "Diff8bitUnfilterVRAM",
            Self::Diff16bitUnFilter => "Diff16bitUnFilter",
            Self::SoundBiasChange => "SoundBiasChange",
            Self::SoundDriverInit => "SoundDriverInit",
            Self::SoundDriverMode => "SoundDriverMode",
            Self::SoundDriverMain => "SoundDriverMain",
            Self::SoundDriverVSync => "SoundDriverVSync",
            Self::SoundChannelClear => "SoundChannelClear",
            Self::MidiKey2Freq => "MIDIKey2Freq",
            Self::MusicPlayerOpen => "MusicPlayerOpen",
            Self::MusicPlayerStart => "MusicPlayerStart",
            Self::MusicPlayerStop => "MusicPlayerStop",
            Self::MusicPlayerContinue => "MusicPlayerContinue",
            Self::MusicPlayerFadeOut => "MusicPlayerFadeOut",
            Self::MultiBoot => "MultiBoot",
            Self::HardReset => "HardReset",
            Self::CustomHalt => "CustomHalt",
            Self::SoundDriverVSyncOff => "SoundDriverVSyncOff",
            Self::SoundDriverVSyncOn => "SoundDriverVSyncOn",
            Self::GetJumpList => "GetJumpList",
        }
    }
}

impl TryFrom<u32> for BiosFunction {
    type Error = LookupError;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        usize::try_from(number)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
            .ok_or(LookupError::SwiOutOfRange(number))
    }
}

impl fmt::Display for BiosFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `SWI` operand: the BIOS function name, or the raw number when unknown.
#[must_use]
pub fn swi_operand(number: u32, function: Option<BiosFunction>) -> String {
    function.map_or_else(
        || format!("#0x{number:02X} ; unknown"),
        |function| function.name().to_string(),
    )
}
