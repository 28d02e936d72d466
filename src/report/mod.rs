//! Event sinks that turn a simulation into something a person or a spreadsheet can read.

pub mod console;
pub mod csv_export;

use crate::domain::process::FrameIndex;

/// `[1,2,3]`
pub(crate) fn format_frames(frames: &[FrameIndex]) -> String {
    let joined: Vec<String> = frames.iter().map(|frame| frame.to_string()).collect();
    format!("[{}]", joined.join(","))
}
