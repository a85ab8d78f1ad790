//! Teleprinter character codes and the printer's fixed-width line discipline.

use std::fmt;

use shared::{
    domain::{PRINTER_COLUMNS, TELEPRINTER_OFFSET},
    TeleprinterCharacter,
};

const LETTER_PREFIX: &str = "letter_";
const DIGIT_PREFIX: &str = "digit_";

/// Strips the wire offset from a character emitted by the core.
///
/// Codes below the offset are a core-side contract violation; they wrap
/// rather than being rejected here.
pub fn decode_char(code: TeleprinterCharacter) -> char {
    char::from(code.0.wrapping_sub(TELEPRINTER_OFFSET))
}

/// What a teleprinter key id turns into on its way to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedKey<'a> {
    /// A letter or digit, uppercased and offset.
    Data(TeleprinterCharacter),
    /// Anything else (shift, ctrl, ...) stays with the panel.
    Passthrough(&'a str),
}

/// Encodes `letter_x` / `digit_n` key ids; every other id passes through.
pub fn encode_key(key_id: &str) -> EncodedKey<'_> {
    let glyph = key_id
        .strip_prefix(LETTER_PREFIX)
        .and_then(single_char)
        .filter(char::is_ascii_alphabetic)
        .or_else(|| {
            key_id
                .strip_prefix(DIGIT_PREFIX)
                .and_then(single_char)
                .filter(char::is_ascii_digit)
        });

    match glyph {
        Some(ch) => {
            let plain = ch.to_ascii_uppercase() as u8;
            EncodedKey::Data(TeleprinterCharacter(plain + TELEPRINTER_OFFSET))
        }
        None => EncodedKey::Passthrough(key_id),
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}

/// One line of printer output. Never longer than [`PRINTER_COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrinterLine {
    text: String,
    columns: usize,
}

impl PrinterLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_full(&self) -> bool {
        self.columns >= PRINTER_COLUMNS
    }

    fn push(&mut self, ch: char) {
        self.text.push(ch);
        self.columns += 1;
    }
}

impl fmt::Display for PrinterLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Result of [`append_to_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
    /// The line that received the character.
    pub line: PrinterLine,
    /// The full line that was closed to make room, if any.
    pub finished: Option<PrinterLine>,
}

impl Appended {
    pub fn started_new_line(&self) -> bool {
        self.finished.is_some()
    }
}

/// Hard column limit: a full line is closed and `ch` starts the next one.
pub fn append_to_line(mut current: PrinterLine, ch: char) -> Appended {
    if current.is_full() {
        let mut line = PrinterLine::new();
        line.push(ch);
        return Appended {
            line,
            finished: Some(current),
        };
    }
    current.push(ch);
    Appended {
        line: current,
        finished: None,
    }
}

/// Everything printed this session; lines are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct PrinterPaper {
    finished: Vec<PrinterLine>,
    current: PrinterLine,
}

impl PrinterPaper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints one character; returns true when it started a new line.
    pub fn print(&mut self, ch: char) -> bool {
        let appended = append_to_line(std::mem::take(&mut self.current), ch);
        let started = appended.started_new_line();
        if let Some(full) = appended.finished {
            self.finished.push(full);
        }
        self.current = appended.line;
        started
    }

    pub fn current(&self) -> &PrinterLine {
        &self.current
    }

    pub fn lines(&self) -> impl Iterator<Item = &PrinterLine> {
        self.finished.iter().chain(std::iter::once(&self.current))
    }

    pub fn line_count(&self) -> usize {
        self.finished.len() + 1
    }
}
