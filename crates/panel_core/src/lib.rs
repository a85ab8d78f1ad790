//! Interaction layer of the front panel: bit codecs, teleprinter codec,
//! and the controller that turns panel gestures into core commands.

pub mod bit_codec;
pub mod controller;
pub mod core_api;
pub mod gesture;
pub mod session;
pub mod surface;
pub mod teleprinter;

pub use controller::{Disposition, PanelController};
pub use core_api::ComputeCore;
pub use gesture::{key_binding, GestureParseError, KeyBinding, PanelGesture};
pub use session::{ModifierState, PanelSessionState};
pub use surface::{AudioFeedback, IndicatorSink, PanelSurface, PrinterSink};
pub use teleprinter::{PrinterLine, PrinterPaper};
