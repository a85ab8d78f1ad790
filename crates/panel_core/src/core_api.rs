//! Command interface of the compute core the panel drives.

use shared::{EncodedWord, MemorySnapshot, PanelRegisters, TeleprinterCharacter};

/// The emulated processor and memory behind the panel.
///
/// Every call completes before it returns; the panel never holds a live view
/// of core memory, only copies taken through [`ComputeCore::current_memory`].
pub trait ComputeCore {
    fn examine(&mut self, switches: EncodedWord, step: bool);
    fn fill(&mut self, left: EncodedWord, right: EncodedWord, step: bool);
    fn key_do(&mut self, left: EncodedWord, right: EncodedWord);
    fn next_output_char(&mut self) -> Option<TeleprinterCharacter>;
    fn current_memory(&self) -> MemorySnapshot;
    fn registers(&self) -> PanelRegisters;
    /// Hands a typed character to the core's keyboard device.
    fn type_key(&mut self, code: TeleprinterCharacter);
}
