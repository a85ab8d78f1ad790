//! Gesture intake: text lines from a reader thread, queued to the panel loop.

use std::io::BufRead;

use crossbeam_channel::{SendError, Sender};
use panel_core::PanelGesture;

/// Reads one gesture per line until EOF or until the panel loop hangs up.
/// Blank lines and `#` comments are skipped; malformed lines are logged.
pub fn read_gestures(reader: impl BufRead, gesture_tx: Sender<PanelGesture>) -> usize {
    let mut queued = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!("gesture input failed: {err}");
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let gesture = match trimmed.parse::<PanelGesture>() {
            Ok(gesture) => gesture,
            Err(err) => {
                tracing::warn!(line = line_no + 1, "skipping gesture: {err}");
                continue;
            }
        };
        if let Err(SendError(_)) = gesture_tx.send(gesture) {
            tracing::error!("panel loop disconnected; dropping remaining input");
            break;
        }
        queued += 1;
    }
    tracing::debug!(queued, "gesture input finished");
    queued
}
