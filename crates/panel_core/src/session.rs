use std::collections::{BTreeSet, HashSet};

use shared::{MomentaryControl, PanelRegisters, SwitchBank, SwitchRegister};

use crate::teleprinter::PrinterPaper;

/// Shift and control latches of the teleprinter keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub shift: bool,
    pub control: bool,
}

/// All interaction state of one panel session. Nothing here outlives the session.
#[derive(Debug, Default)]
pub struct PanelSessionState {
    pub(crate) left: SwitchRegister,
    pub(crate) right: SwitchRegister,
    pub(crate) modifiers: ModifierState,
    pub(crate) pressed_controls: BTreeSet<MomentaryControl>,
    pub(crate) held_keys: HashSet<String>,
    pub(crate) held_teleprinter_keys: HashSet<String>,
    pub(crate) paper: PrinterPaper,
    /// Register view last pushed to the lights; `None` until power-on.
    pub(crate) shown: Option<PanelRegisters>,
}

impl PanelSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switches(&self, bank: SwitchBank) -> &SwitchRegister {
        match bank {
            SwitchBank::Left => &self.left,
            SwitchBank::Right => &self.right,
        }
    }

    pub(crate) fn switches_mut(&mut self, bank: SwitchBank) -> &mut SwitchRegister {
        match bank {
            SwitchBank::Left => &mut self.left,
            SwitchBank::Right => &mut self.right,
        }
    }

    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    pub fn is_pressed(&self, control: MomentaryControl) -> bool {
        self.pressed_controls.contains(&control)
    }

    pub fn is_key_held(&self, key: &str) -> bool {
        self.held_keys.contains(key)
    }

    pub fn paper(&self) -> &PrinterPaper {
        &self.paper
    }

    pub fn shown_registers(&self) -> Option<&PanelRegisters> {
        self.shown.as_ref()
    }
}
