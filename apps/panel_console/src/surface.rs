//! Text rendering of the panel for a terminal or log.

use std::io::Write;

use panel_core::{bit_codec, AudioFeedback, IndicatorSink, PrinterSink};
use shared::{LightBank, LightRegister, SingleLight};

const LIGHT_ON: char = '●';
const LIGHT_OFF: char = '○';

/// Writes each indicator change and printer line as one text line.
pub struct TextSurface<W> {
    out: W,
    clicks: u64,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out, clicks: 0 }
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!("panel output write failed: {err}");
        }
    }
}

pub fn render_lights(lights: &LightRegister) -> String {
    // Groups of three, the way the panel's octal digits are painted.
    lights
        .bits()
        .chunks(3)
        .map(|group| {
            group
                .iter()
                .map(|on| if *on { LIGHT_ON } else { LIGHT_OFF })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl<W: Write> AudioFeedback for TextSurface<W> {
    fn click(&mut self) {
        self.clicks += 1;
        tracing::trace!(clicks = self.clicks, "click");
    }
}

impl<W: Write> IndicatorSink for TextSurface<W> {
    fn set_light_bank(&mut self, bank: LightBank, lights: LightRegister) {
        let word = bit_codec::encode(lights.bits());
        let rendered = render_lights(&lights);
        self.emit(format_args!("{:<10} {rendered}  {word}", bank.id()));
    }

    fn set_single_light(&mut self, light: SingleLight, on: bool) {
        let lamp = if on { LIGHT_ON } else { LIGHT_OFF };
        self.emit(format_args!("{:<10} {lamp}", light.id()));
    }

    fn set_control_position(&mut self, control_id: &str, depressed: bool) {
        tracing::trace!(control = control_id, depressed, "control position");
    }
}

impl<W: Write> PrinterSink for TextSurface<W> {
    fn write_line(&mut self, line: &str, started_new_line: bool) {
        let marker = if started_new_line { '+' } else { '|' };
        self.emit(format_args!("tty{marker} {line}"));
    }
}
