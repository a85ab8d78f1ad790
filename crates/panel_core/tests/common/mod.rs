#![allow(dead_code)]

use std::collections::VecDeque;

use panel_core::{AudioFeedback, ComputeCore, IndicatorSink, PrinterSink};
use shared::{
    EncodedWord, LightBank, LightRegister, MemorySnapshot, PanelRegisters, SingleLight,
    TeleprinterCharacter,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCall {
    Examine(u16, bool),
    Fill(u16, u16, bool),
    KeyDo(u16, u16),
    TypeKey(u8),
}

/// Core double that records commands and mimics examine/fill addressing.
#[derive(Debug, Default)]
pub struct RecordingCore {
    pub calls: Vec<CoreCall>,
    pub memory: MemorySnapshot,
    pub registers: PanelRegisters,
    pub output: VecDeque<TeleprinterCharacter>,
}

impl RecordingCore {
    pub fn dispatches(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| !matches!(call, CoreCall::TypeKey(_)))
            .count()
    }
}

impl ComputeCore for RecordingCore {
    fn examine(&mut self, switches: EncodedWord, step: bool) {
        self.calls.push(CoreCall::Examine(switches.value(), step));
        self.registers.mem_addr = switches;
        self.registers.mem_buf = EncodedWord::masked(self.memory.read(switches));
    }

    fn fill(&mut self, left: EncodedWord, right: EncodedWord, step: bool) {
        self.calls.push(CoreCall::Fill(left.value(), right.value(), step));
        self.memory.write(left, right.value());
        self.registers.mem_addr = left;
        self.registers.mem_buf = right;
    }

    fn key_do(&mut self, left: EncodedWord, right: EncodedWord) {
        self.calls.push(CoreCall::KeyDo(left.value(), right.value()));
        self.registers.instr_reg = left;
        self.registers.link = !self.registers.link;
    }

    fn next_output_char(&mut self) -> Option<TeleprinterCharacter> {
        self.output.pop_front()
    }

    fn current_memory(&self) -> MemorySnapshot {
        self.memory.clone()
    }

    fn registers(&self) -> PanelRegisters {
        self.registers
    }

    fn type_key(&mut self, code: TeleprinterCharacter) {
        self.calls.push(CoreCall::TypeKey(code.0));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Click,
    Bank(LightBank, LightRegister),
    Light(SingleLight, bool),
    Position(String, bool),
    Line(String, bool),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn clicks(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Click))
            .count()
    }

    pub fn banks(&self) -> Vec<(LightBank, LightRegister)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Bank(bank, lights) => Some((*bank, *lights)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(String, bool)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Line(text, started) => Some((text.clone(), *started)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl AudioFeedback for RecordingSurface {
    fn click(&mut self) {
        self.events.push(SurfaceEvent::Click);
    }
}

impl IndicatorSink for RecordingSurface {
    fn set_light_bank(&mut self, bank: LightBank, lights: LightRegister) {
        self.events.push(SurfaceEvent::Bank(bank, lights));
    }

    fn set_single_light(&mut self, light: SingleLight, on: bool) {
        self.events.push(SurfaceEvent::Light(light, on));
    }

    fn set_control_position(&mut self, control_id: &str, depressed: bool) {
        self.events
            .push(SurfaceEvent::Position(control_id.to_string(), depressed));
    }
}

impl PrinterSink for RecordingSurface {
    fn write_line(&mut self, line: &str, started_new_line: bool) {
        self.events
            .push(SurfaceEvent::Line(line.to_string(), started_new_line));
    }
}
