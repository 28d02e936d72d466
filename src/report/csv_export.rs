use serde::Serialize;
use std::fs::File;
use std::io::Write;

use crate::domain::process::{Pid, Time};
use crate::domain::simulator::event::SimulationEvent;
use crate::error::Result;
use crate::report::format_frames;
use crate::traits::EventSink;

#[derive(Debug, Serialize)]
struct EventRow<'a> {
    clock: Time,
    event: &'a str,
    pid: Option<Pid>,
    remaining_time: Option<Time>,
    load_time: Option<Time>,
    utilization: Option<String>,
    frames: Option<String>,
    proc_remaining: Option<usize>,
}

impl<'a> EventRow<'a> {
    fn empty(clock: Time, event: &'a str) -> Self {
        EventRow { clock, event, pid: None, remaining_time: None, load_time: None, utilization: None, frames: None, proc_remaining: None }
    }
}

/// Writes one `;`-separated row per event. Unused columns stay empty.
pub struct CsvEventWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvEventWriter<File> {
    pub fn from_path(path: &str) -> Result<Self> {
        let writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
        log::info!("Writing simulation events to '{}'.", path);
        Ok(CsvEventWriter { writer })
    }
}

impl<W: Write> CsvEventWriter<W> {
    pub fn new(out: W) -> Self {
        CsvEventWriter { writer: csv::WriterBuilder::new().delimiter(b';').from_writer(out) }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| crate::error::Error::IoError(e.into_error()))
    }
}

impl<W: Write> EventSink for CsvEventWriter<W> {
    fn on_event(&mut self, event: &SimulationEvent) -> Result<()> {
        let row = match event {
            SimulationEvent::Running { clock, pid, remaining_time, load_time, utilization, held_frames } => EventRow {
                pid: Some(*pid),
                remaining_time: Some(*remaining_time),
                load_time: Some(*load_time),
                utilization: Some(utilization.to_string()),
                frames: Some(format_frames(held_frames)),
                ..EventRow::empty(*clock, "RUNNING")
            },
            SimulationEvent::Evicted { clock, frames } => EventRow { frames: Some(format_frames(frames)), ..EventRow::empty(*clock, "EVICTED") },
            SimulationEvent::Finished { clock, pid, arrived_remaining } => {
                EventRow { pid: Some(*pid), proc_remaining: Some(*arrived_remaining), ..EventRow::empty(*clock, "FINISHED") }
            }
            SimulationEvent::Summary(summary) => EventRow::empty(summary.makespan, "SUMMARY"),
        };

        self.writer.serialize(row)?;
        if let SimulationEvent::Summary(_) = event {
            self.writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::memory::pool::Utilization;

    #[test]
    fn test_rows_have_a_header_and_empty_unused_columns() {
        let mut writer = CsvEventWriter::new(Vec::new());
        writer
            .on_event(&SimulationEvent::Running {
                clock: 0,
                pid: 1,
                remaining_time: 10,
                load_time: 4,
                utilization: Utilization::Percent(50),
                held_frames: vec![0, 1],
            })
            .unwrap();
        writer.on_event(&SimulationEvent::Evicted { clock: 14, frames: vec![0, 1] }).unwrap();

        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "clock;event;pid;remaining_time;load_time;utilization;frames;proc_remaining");
        assert_eq!(lines[1], "0;RUNNING;1;10;4;50%;[0,1];");
        assert_eq!(lines[2], "14;EVICTED;;;;;[0,1];");
    }
}
