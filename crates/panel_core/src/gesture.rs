//! Panel gestures and the physical keyboard layout bound to the panel.

use std::str::FromStr;

use shared::{MomentaryControl, PanelError, SwitchBank};
use thiserror::Error;

pub const SHIFT_KEY: &str = "shift";
pub const CONTROL_KEY: &str = "ctrl";

const LEFT_SWITCH_KEYS: [&str; 12] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "="];
const RIGHT_SWITCH_KEYS: [&str; 12] = ["q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]"];

/// One discrete input event from the panel surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelGesture {
    /// Pointer click on a toggle switch.
    ToggleSwitch { bank: SwitchBank, index: usize },
    PointerDown(MomentaryControl),
    PointerUp(MomentaryControl),
    /// Physical keyboard key; `repeat` is set for auto-repeat events.
    KeyDown { key: String, repeat: bool },
    KeyUp { key: String },
    /// On-screen teleprinter key, identified by its logical id.
    TeleprinterDown(String),
    TeleprinterUp(String),
}

/// What a physical key does on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Switch { bank: SwitchBank, index: usize },
    Momentary(MomentaryControl),
}

pub fn key_binding(key: &str) -> Option<KeyBinding> {
    if let Some(index) = LEFT_SWITCH_KEYS.iter().position(|k| *k == key) {
        return Some(KeyBinding::Switch {
            bank: SwitchBank::Left,
            index,
        });
    }
    if let Some(index) = RIGHT_SWITCH_KEYS.iter().position(|k| *k == key) {
        return Some(KeyBinding::Switch {
            bank: SwitchBank::Right,
            index,
        });
    }
    let control = match key {
        "f" => MomentaryControl::FillStep,
        "g" => MomentaryControl::Fill,
        "h" => MomentaryControl::StepExamine,
        "j" => MomentaryControl::Examine,
        _ => return None,
    };
    Some(KeyBinding::Momentary(control))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureParseError {
    #[error("empty gesture")]
    Empty,
    #[error("unknown gesture '{0}'")]
    UnknownVerb(String),
    #[error("gesture '{verb}' expects {expected}")]
    MissingArgument {
        verb: String,
        expected: &'static str,
    },
    #[error("gesture '{verb}' does not take '{found}'")]
    UnexpectedArgument { verb: String, found: String },
    #[error("invalid switch index '{0}'")]
    BadIndex(String),
    #[error(transparent)]
    Panel(#[from] PanelError),
}

/// Text form used by scripts: `toggle ls 3`, `down exam`, `up exam`,
/// `keydown j [repeat]`, `keyup j`, `tty-down letter_a`, `tty-up letter_a`.
impl FromStr for PanelGesture {
    type Err = GestureParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().ok_or(GestureParseError::Empty)?;
        let mut arg = |expected: &'static str| {
            parts.next().ok_or_else(|| GestureParseError::MissingArgument {
                verb: verb.to_string(),
                expected,
            })
        };

        let gesture = match verb {
            "toggle" => {
                let bank = arg("a switch bank")?.parse::<SwitchBank>()?;
                let raw_index = arg("a switch index")?;
                let index = raw_index
                    .parse::<usize>()
                    .map_err(|_| GestureParseError::BadIndex(raw_index.to_string()))?;
                PanelGesture::ToggleSwitch { bank, index }
            }
            "down" => PanelGesture::PointerDown(arg("a control id")?.parse()?),
            "up" => PanelGesture::PointerUp(arg("a control id")?.parse()?),
            "keydown" => {
                let key = arg("a key")?.to_string();
                let repeat = match arg("an optional repeat flag") {
                    Err(_) => false,
                    Ok("repeat") => true,
                    Ok(found) => {
                        return Err(GestureParseError::UnexpectedArgument {
                            verb: verb.to_string(),
                            found: found.to_string(),
                        })
                    }
                };
                PanelGesture::KeyDown { key, repeat }
            }
            "keyup" => PanelGesture::KeyUp {
                key: arg("a key")?.to_string(),
            },
            "tty-down" => PanelGesture::TeleprinterDown(arg("a key id")?.to_string()),
            "tty-up" => PanelGesture::TeleprinterUp(arg("a key id")?.to_string()),
            other => return Err(GestureParseError::UnknownVerb(other.to_string())),
        };
        if let Some(found) = parts.next() {
            return Err(GestureParseError::UnexpectedArgument {
                verb: verb.to_string(),
                found: found.to_string(),
            });
        }
        Ok(gesture)
    }
}
