//! Types shared by the panel crates: registers, words, memory snapshots and panel identifiers.

pub mod domain;
pub mod error;

pub use domain::{
    EncodedWord, LightBank, LightRegister, MemorySnapshot, MomentaryControl, PanelRegisters,
    SingleLight, SwitchBank, SwitchRegister, TeleprinterCharacter,
};
pub use error::PanelError;
