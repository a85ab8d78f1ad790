//! Narrow sinks for everything the panel shows or plays.

use shared::{LightBank, LightRegister, SingleLight};

pub trait AudioFeedback {
    fn click(&mut self);
}

pub trait IndicatorSink {
    /// Replaces all 12 lights of a bank at once.
    fn set_light_bank(&mut self, bank: LightBank, lights: LightRegister);
    fn set_single_light(&mut self, light: SingleLight, on: bool);
    /// Depressed or raised position of a button or teleprinter key.
    fn set_control_position(&mut self, control_id: &str, depressed: bool);
}

pub trait PrinterSink {
    /// Shows the printer line that just received a character.
    fn write_line(&mut self, line: &str, started_new_line: bool);
}

/// Everything the controller renders to.
pub trait PanelSurface: AudioFeedback + IndicatorSink + PrinterSink {}

impl<T: AudioFeedback + IndicatorSink + PrinterSink> PanelSurface for T {}
