use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Width of every switch and light bank on the panel.
pub const REGISTER_BITS: usize = 12;
pub const MASK_12BIT: u16 = 0o7777;
/// Number of words in core memory.
pub const MEMORY_WORDS: usize = 4096;
/// Bias the core adds to plain character codes on the teleprinter wire.
pub const TELEPRINTER_OFFSET: u8 = 128;
/// Hard column limit of one printer line.
pub const PRINTER_COLUMNS: usize = 78;

macro_rules! bit_register {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name([bool; REGISTER_BITS]);

        impl $name {
            pub const fn new(bits: [bool; REGISTER_BITS]) -> Self {
                Self(bits)
            }

            pub fn bits(&self) -> &[bool; REGISTER_BITS] {
                &self.0
            }

            pub fn get(&self, index: usize) -> Option<bool> {
                self.0.get(index).copied()
            }
        }

        impl From<[bool; REGISTER_BITS]> for $name {
            fn from(bits: [bool; REGISTER_BITS]) -> Self {
                Self(bits)
            }
        }
    };
}

bit_register!(
    /// A bank of 12 toggle switches, index 0 is the leftmost (most significant) toggle.
    SwitchRegister
);
bit_register!(
    /// A bank of 12 indicator lights, derived from a register word.
    LightRegister
);

impl SwitchRegister {
    /// Flips one toggle; returns the new position.
    pub fn toggle(&mut self, index: usize) -> Result<bool, PanelError> {
        let slot = self
            .0
            .get_mut(index)
            .ok_or(PanelError::SwitchIndexOutOfRange(index))?;
        *slot = !*slot;
        Ok(*slot)
    }
}

/// A 12-bit word as it crosses the panel/core boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EncodedWord(u16);

impl EncodedWord {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u16) -> Result<Self, PanelError> {
        if value > MASK_12BIT {
            return Err(PanelError::WordOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Keeps the low 12 bits of `value`.
    pub const fn masked(value: u16) -> Self {
        Self(value & MASK_12BIT)
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for EncodedWord {
    type Error = PanelError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for EncodedWord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u16::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// Full copy of core memory. Always exactly [`MEMORY_WORDS`] words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct MemorySnapshot(Box<[u16]>);

impl MemorySnapshot {
    pub fn zeroed() -> Self {
        Self(vec![0; MEMORY_WORDS].into_boxed_slice())
    }

    pub fn from_words(words: Vec<u16>) -> Result<Self, PanelError> {
        if words.len() != MEMORY_WORDS {
            return Err(PanelError::SnapshotLength {
                expected: MEMORY_WORDS,
                actual: words.len(),
            });
        }
        Ok(Self(words.into_boxed_slice()))
    }

    pub fn words(&self) -> &[u16] {
        &self.0
    }

    /// Reads one word; the address wraps in 12 bits like the core's own addressing.
    pub fn read(&self, addr: EncodedWord) -> u16 {
        self.0[usize::from(addr.value())]
    }

    pub fn write(&mut self, addr: EncodedWord, value: u16) {
        self.0[usize::from(addr.value())] = value;
    }
}

impl Default for MemorySnapshot {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<[u16; MEMORY_WORDS]> for MemorySnapshot {
    fn from(words: [u16; MEMORY_WORDS]) -> Self {
        Self(Box::new(words))
    }
}

impl TryFrom<Vec<u16>> for MemorySnapshot {
    type Error = PanelError;

    fn try_from(words: Vec<u16>) -> Result<Self, Self::Error> {
        Self::from_words(words)
    }
}

impl From<MemorySnapshot> for Vec<u16> {
    fn from(snapshot: MemorySnapshot) -> Self {
        snapshot.0.into_vec()
    }
}

/// Raw character code exchanged with the core, biased by [`TELEPRINTER_OFFSET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeleprinterCharacter(pub u8);

macro_rules! panel_ids {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $id:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }

        impl FromStr for $name {
            type Err = PanelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($id => Ok($name::$variant),)+
                    other => Err(PanelError::UnknownId {
                        kind: stringify!($name),
                        id: other.to_string(),
                    }),
                }
            }
        }
    };
}

panel_ids!(
    /// The two operand switch rows.
    SwitchBank {
        Left => "ls",
        Right => "rs",
    }
);

panel_ids!(
    /// Indicator banks refreshed whole from one register word.
    LightBank {
        MemAddr => "memAddr",
        MemBuf => "memBuf",
        Acc => "acc",
        InstrReg => "instrReg",
        ProgCount => "progCount",
    }
);

panel_ids!(
    SingleLight {
        Link => "link",
        EightMode => "8_mode",
        LincMode => "linc_mode",
        Run => "run",
    }
);

panel_ids!(
    /// Spring-loaded panel controls; each press dispatches exactly one command.
    MomentaryControl {
        Examine => "exam",
        StepExamine => "stepExam",
        Fill => "fill",
        FillStep => "fillStep",
        Do => "do",
    }
);

/// Copy-out view of the registers the panel mirrors on its light banks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelRegisters {
    pub mem_addr: EncodedWord,
    pub mem_buf: EncodedWord,
    pub acc: EncodedWord,
    pub instr_reg: EncodedWord,
    pub prog_count: EncodedWord,
    pub link: bool,
}

impl PanelRegisters {
    pub fn bank(&self, bank: LightBank) -> EncodedWord {
        match bank {
            LightBank::MemAddr => self.mem_addr,
            LightBank::MemBuf => self.mem_buf,
            LightBank::Acc => self.acc,
            LightBank::InstrReg => self.instr_reg,
            LightBank::ProgCount => self.prog_count,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
