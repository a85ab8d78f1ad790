//! Bit ordering shared by switch input and light output.
//!
//! Index 0 of a bank is the most significant bit of the word and index 11 the
//! least significant, so a switch row and the light row above it read the same.

use shared::{domain::REGISTER_BITS, EncodedWord, LightRegister, SwitchRegister};

const MSB_SHIFT: usize = REGISTER_BITS - 1;

/// Packs 12 ordered bits into a word, index 0 as bit 11.
pub fn encode(bits: &[bool; REGISTER_BITS]) -> EncodedWord {
    let word = bits
        .iter()
        .fold(0u16, |acc, bit| (acc << 1) | u16::from(*bit));
    EncodedWord::masked(word)
}

/// Unpacks a word into 12 lights, bit 11 on light 0.
pub fn decode(word: EncodedWord) -> LightRegister {
    let value = word.value();
    let mut lights = [false; REGISTER_BITS];
    for (index, light) in lights.iter_mut().enumerate() {
        *light = (value >> (MSB_SHIFT - index)) & 1 == 1;
    }
    LightRegister::new(lights)
}

pub fn encode_switches(switches: &SwitchRegister) -> EncodedWord {
    encode(switches.bits())
}
