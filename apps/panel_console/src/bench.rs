//! Bench compute core: the front-panel register paths of the machine with a
//! local-loopback teleprinter. It does not execute instructions.

use std::collections::VecDeque;

use panel_core::ComputeCore;
use shared::{EncodedWord, MemorySnapshot, PanelRegisters, TeleprinterCharacter};

#[derive(Debug, Default)]
pub struct BenchCore {
    memory: MemorySnapshot,
    registers: PanelRegisters,
    printer: VecDeque<TeleprinterCharacter>,
}

impl BenchCore {
    pub fn with_memory(memory: MemorySnapshot) -> Self {
        Self {
            memory,
            ..Self::default()
        }
    }

    fn address(&self, switches: EncodedWord, step: bool) -> EncodedWord {
        if step {
            EncodedWord::masked(self.registers.mem_addr.value() + 1)
        } else {
            switches
        }
    }

    fn show(&mut self, addr: EncodedWord) {
        self.registers.mem_addr = addr;
        self.registers.mem_buf = EncodedWord::masked(self.memory.read(addr));
    }
}

impl ComputeCore for BenchCore {
    fn examine(&mut self, switches: EncodedWord, step: bool) {
        let addr = self.address(switches, step);
        self.show(addr);
    }

    fn fill(&mut self, left: EncodedWord, right: EncodedWord, step: bool) {
        let addr = self.address(left, step);
        self.memory.write(addr, right.value());
        self.show(addr);
    }

    fn key_do(&mut self, left: EncodedWord, _right: EncodedWord) {
        self.registers.instr_reg = left;
        tracing::debug!(instruction = %left, "bench core latched instruction without executing it");
    }

    fn next_output_char(&mut self) -> Option<TeleprinterCharacter> {
        self.printer.pop_front()
    }

    fn current_memory(&self) -> MemorySnapshot {
        self.memory.clone()
    }

    fn registers(&self) -> PanelRegisters {
        self.registers
    }

    fn type_key(&mut self, code: TeleprinterCharacter) {
        self.printer.push_back(code);
    }
}
