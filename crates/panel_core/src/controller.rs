//! Gesture dispatch: panel input to core commands, core state back to the lights.

use shared::{LightBank, MomentaryControl, SingleLight, SwitchBank};
use storage::{KeyValueStore, MemoryMirror};

use crate::{
    bit_codec,
    core_api::ComputeCore,
    gesture::{key_binding, KeyBinding, PanelGesture, CONTROL_KEY, SHIFT_KEY},
    session::PanelSessionState,
    surface::PanelSurface,
    teleprinter::{decode_char, encode_key, EncodedKey},
};

/// How a gesture was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    /// A press of something already pressed, including keyboard auto-repeat.
    IgnoredRepeat,
    /// Nothing on the panel responds to this gesture.
    Ignored,
}

pub struct PanelController<C, K, S> {
    core: C,
    store: K,
    surface: S,
    mirror: MemoryMirror,
}

impl<C, K, S> PanelController<C, K, S>
where
    C: ComputeCore,
    K: KeyValueStore,
    S: PanelSurface,
{
    pub fn new(core: C, store: K, surface: S, mirror: MemoryMirror) -> Self {
        Self {
            core,
            store,
            surface,
            mirror,
        }
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Pushes every light bank and the mode lights, regardless of what was shown before.
    pub fn power_on(&mut self, session: &mut PanelSessionState) {
        session.shown = None;
        self.sync_lights(session);
        self.surface.set_single_light(SingleLight::EightMode, true);
        self.surface.set_single_light(SingleLight::LincMode, false);
        self.surface.set_single_light(SingleLight::Run, false);
        tracing::info!("panel powered on");
    }

    pub fn handle(&mut self, session: &mut PanelSessionState, gesture: PanelGesture) -> Disposition {
        match gesture {
            PanelGesture::ToggleSwitch { bank, index } => self.toggle_switch(session, bank, index),
            PanelGesture::PointerDown(control) => self.press(session, control),
            PanelGesture::PointerUp(control) => self.release(session, control),
            PanelGesture::KeyDown { key, repeat } => self.key_down(session, key, repeat),
            PanelGesture::KeyUp { key } => self.key_up(session, &key),
            PanelGesture::TeleprinterDown(key_id) => self.teleprinter_down(session, key_id),
            PanelGesture::TeleprinterUp(key_id) => self.teleprinter_up(session, &key_id),
        }
    }

    fn toggle_switch(
        &mut self,
        session: &mut PanelSessionState,
        bank: SwitchBank,
        index: usize,
    ) -> Disposition {
        match session.switches_mut(bank).toggle(index) {
            Ok(on) => {
                tracing::trace!(bank = %bank, index, on, "switch toggled");
                self.surface.click();
                Disposition::Applied
            }
            Err(err) => {
                tracing::warn!(bank = %bank, "ignoring switch gesture: {err}");
                Disposition::Ignored
            }
        }
    }

    fn key_down(&mut self, session: &mut PanelSessionState, key: String, repeat: bool) -> Disposition {
        if repeat || session.held_keys.contains(&key) {
            tracing::trace!(key = %key, "ignoring repeated keydown");
            return Disposition::IgnoredRepeat;
        }
        let binding = key_binding(&key);
        session.held_keys.insert(key);
        match binding {
            Some(KeyBinding::Switch { bank, index }) => self.toggle_switch(session, bank, index),
            Some(KeyBinding::Momentary(control)) => self.press(session, control),
            None => Disposition::Ignored,
        }
    }

    fn key_up(&mut self, session: &mut PanelSessionState, key: &str) -> Disposition {
        session.held_keys.remove(key);
        match key_binding(key) {
            Some(KeyBinding::Momentary(control)) => self.release(session, control),
            _ => Disposition::Ignored,
        }
    }

    fn press(&mut self, session: &mut PanelSessionState, control: MomentaryControl) -> Disposition {
        if !session.pressed_controls.insert(control) {
            tracing::trace!(control = %control, "ignoring repeated press");
            return Disposition::IgnoredRepeat;
        }
        self.surface.set_control_position(control.id(), true);
        self.surface.click();
        self.dispatch(session, control);
        Disposition::Applied
    }

    fn release(&mut self, session: &mut PanelSessionState, control: MomentaryControl) -> Disposition {
        if !session.pressed_controls.remove(&control) {
            return Disposition::Ignored;
        }
        self.surface.set_control_position(control.id(), false);
        self.surface.click();
        Disposition::Applied
    }

    /// Switches are sampled here, at press time.
    fn dispatch(&mut self, session: &mut PanelSessionState, control: MomentaryControl) {
        let left = bit_codec::encode_switches(&session.left);
        let right = bit_codec::encode_switches(&session.right);

        match control {
            MomentaryControl::Examine | MomentaryControl::StepExamine => {
                let step = control == MomentaryControl::StepExamine;
                tracing::debug!(command = "examine", %left, step, "dispatching to core");
                self.core.examine(left, step);
            }
            MomentaryControl::Fill | MomentaryControl::FillStep => {
                let step = control == MomentaryControl::FillStep;
                tracing::debug!(command = "fill", %left, %right, step, "dispatching to core");
                self.core.fill(left, right, step);
                self.persist_memory();
            }
            MomentaryControl::Do => {
                tracing::debug!(command = "key_do", %left, %right, "dispatching to core");
                self.core.key_do(left, right);
                self.persist_memory();
                self.drain_output(session);
            }
        }

        self.sync_lights(session);
    }

    fn persist_memory(&mut self) {
        let snapshot = self.core.current_memory();
        self.mirror.save(&snapshot, &mut self.store);
    }

    /// Moves at most one pending character from the core onto the paper.
    fn drain_output(&mut self, session: &mut PanelSessionState) {
        let Some(code) = self.core.next_output_char() else {
            return;
        };
        let ch = decode_char(code);
        let started_new_line = session.paper.print(ch);
        tracing::trace!(code = code.0, ?ch, started_new_line, "teleprinter output");
        self.surface
            .write_line(session.paper.current().as_str(), started_new_line);
    }

    /// Refreshes every bank whose register changed since the last push, each from one decode.
    fn sync_lights(&mut self, session: &mut PanelSessionState) {
        let registers = self.core.registers();
        let previous = session.shown;

        for bank in LightBank::ALL.iter().copied() {
            let word = registers.bank(bank);
            if previous.map(|shown| shown.bank(bank)) != Some(word) {
                self.surface.set_light_bank(bank, bit_codec::decode(word));
            }
        }
        if previous.map(|shown| shown.link) != Some(registers.link) {
            self.surface.set_single_light(SingleLight::Link, registers.link);
        }

        session.shown = Some(registers);
    }

    fn teleprinter_down(&mut self, session: &mut PanelSessionState, key_id: String) -> Disposition {
        match encode_key(&key_id) {
            EncodedKey::Passthrough(SHIFT_KEY) => {
                session.modifiers.shift = !session.modifiers.shift;
                self.surface
                    .set_control_position(SHIFT_KEY, session.modifiers.shift);
                self.surface.click();
                Disposition::Applied
            }
            EncodedKey::Passthrough(CONTROL_KEY) => {
                session.modifiers.control = !session.modifiers.control;
                self.surface
                    .set_control_position(CONTROL_KEY, session.modifiers.control);
                self.surface.click();
                Disposition::Applied
            }
            encoded => {
                if session.held_teleprinter_keys.contains(&key_id) {
                    tracing::trace!(key = %key_id, "ignoring repeated teleprinter key");
                    return Disposition::IgnoredRepeat;
                }
                self.surface.set_control_position(&key_id, true);
                self.surface.click();
                if let EncodedKey::Data(code) = encoded {
                    tracing::debug!(key = %key_id, code = code.0, "typing on teleprinter");
                    self.core.type_key(code);
                    self.sync_lights(session);
                }
                session.held_teleprinter_keys.insert(key_id);
                Disposition::Applied
            }
        }
    }

    fn teleprinter_up(&mut self, session: &mut PanelSessionState, key_id: &str) -> Disposition {
        if key_id == SHIFT_KEY || key_id == CONTROL_KEY {
            return Disposition::Ignored;
        }
        if !session.held_teleprinter_keys.remove(key_id) {
            return Disposition::Ignored;
        }
        self.surface.set_control_position(key_id, false);
        self.surface.click();
        Disposition::Applied
    }
}
