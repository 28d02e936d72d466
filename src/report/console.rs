use std::io::{self, Write};

use crate::domain::memory::pool::Utilization;
use crate::domain::simulator::event::SimulationEvent;
use crate::error::Result;
use crate::report::format_frames;
use crate::traits::EventSink;

/// Writes the line-oriented text report, one line per event and a four-line summary.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleReporter { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        ConsoleReporter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for ConsoleReporter<W> {
    fn on_event(&mut self, event: &SimulationEvent) -> Result<()> {
        writeln!(self.out, "{}", format_event(event))?;
        if let SimulationEvent::Summary(_) = event {
            self.out.flush()?;
        }
        Ok(())
    }
}

pub fn format_event(event: &SimulationEvent) -> String {
    match event {
        SimulationEvent::Running { clock, pid, remaining_time, utilization: Utilization::Unlimited, .. } => {
            format!("{}, RUNNING, id={}, remaining-time={}", clock, pid, remaining_time)
        }
        SimulationEvent::Running { clock, pid, remaining_time, load_time, utilization, held_frames } => format!(
            "{}, RUNNING, id={}, remaining-time={}, load-time={}, mem-usage={}, mem-addresses={}",
            clock,
            pid,
            remaining_time,
            load_time,
            utilization,
            format_frames(held_frames)
        ),
        SimulationEvent::Evicted { clock, frames } => format!("{}, EVICTED, mem-addresses={}", clock, format_frames(frames)),
        SimulationEvent::Finished { clock, pid, arrived_remaining } => format!("{}, FINISHED, id={}, proc-remaining={}", clock, pid, arrived_remaining),
        SimulationEvent::Summary(summary) => format!(
            "Throughput {}, {}, {}\nTurnaround time {}\nTime overhead {:.2} {:.2}\nMakespan {}",
            summary.throughput_avg,
            summary.throughput_min,
            summary.throughput_max,
            summary.turnaround_avg,
            summary.overhead_max,
            summary.overhead_avg,
            summary.makespan
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::statistics::Summary;

    #[test]
    fn test_running_line_with_memory() {
        let event = SimulationEvent::Running {
            clock: 5,
            pid: 3,
            remaining_time: 12,
            load_time: 8,
            utilization: Utilization::Percent(40),
            held_frames: vec![0, 1, 4, 5],
        };
        assert_eq!(format_event(&event), "5, RUNNING, id=3, remaining-time=12, load-time=8, mem-usage=40%, mem-addresses=[0,1,4,5]");
    }

    #[test]
    fn test_running_line_without_memory() {
        let event =
            SimulationEvent::Running { clock: 0, pid: 1, remaining_time: 10, load_time: 0, utilization: Utilization::Unlimited, held_frames: vec![] };
        assert_eq!(format_event(&event), "0, RUNNING, id=1, remaining-time=10");
    }

    #[test]
    fn test_writes_summary_block() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.on_event(&SimulationEvent::Finished { clock: 15, pid: 2, arrived_remaining: 0 }).unwrap();
        reporter
            .on_event(&SimulationEvent::Summary(Summary {
                throughput_avg: 2,
                throughput_min: 2,
                throughput_max: 2,
                turnaround_avg: 12,
                overhead_max: 2.8,
                overhead_avg: 1.9,
                makespan: 15,
            }))
            .unwrap();

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(text, "15, FINISHED, id=2, proc-remaining=0\nThroughput 2, 2, 2\nTurnaround time 12\nTime overhead 2.80 1.90\nMakespan 15\n");
    }
}
