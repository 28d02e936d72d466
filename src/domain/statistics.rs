use serde::Serialize;

use crate::domain::process::{Process, Time};

/// Length of a throughput interval in time units.
pub const THROUGHPUT_INTERVAL: Time = 60;

/// End-of-run performance figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Completions per interval, rounded up.
    pub throughput_avg: u64,
    pub throughput_min: u64,
    pub throughput_max: u64,

    /// Mean turnaround, rounded up.
    pub turnaround_avg: Time,

    pub overhead_max: f64,
    pub overhead_avg: f64,

    /// Clock at which the last process finished.
    pub makespan: Time,
}

/// Running totals collected while the simulation progresses.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    current_interval: u64,
    completions_in_interval: u64,
    throughput_min: Option<u64>,
    throughput_max: u64,
    total_turnaround: Time,
    overhead_sum: f64,
    overhead_max: f64,
    finished_processes: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finished_processes(&self) -> u64 {
        self.finished_processes
    }

    pub fn record_completion(&mut self, clock: Time, process: &Process) {
        let turnaround = clock.saturating_sub(process.arrival_time);
        let overhead = turnaround as f64 / process.job_time.max(1) as f64;

        self.total_turnaround += turnaround;
        self.overhead_sum += overhead;
        self.overhead_max = self.overhead_max.max(overhead);
        self.finished_processes += 1;

        // A completion exactly on a boundary still belongs to the interval it closes.
        let interval = clock.saturating_sub(1) / THROUGHPUT_INTERVAL;

        if interval > self.current_interval {
            if interval - self.current_interval > 1 {
                // Whole intervals passed without a completion.
                self.throughput_min = Some(0);
            }
            self.close_interval();
            self.current_interval = interval;
            self.completions_in_interval = 1;
        } else {
            self.completions_in_interval += 1;
        }
        self.throughput_max = self.throughput_max.max(self.completions_in_interval);

        log::trace!("t={} pid {} finished: turnaround {}, overhead {:.2}", clock, process.pid, turnaround, overhead);
    }

    /// Turns the running totals into averages. `clock` is the completion time of the last process.
    pub fn finalize(&mut self, clock: Time) -> Summary {
        self.close_interval();

        let finished = self.finished_processes;
        let (turnaround_avg, overhead_avg) =
            if finished == 0 { (0, 0.0) } else { (self.total_turnaround.div_ceil(finished), self.overhead_sum / finished as f64) };
        let throughput_avg = if finished == 0 { 0 } else { finished.div_ceil(self.current_interval + 1) };

        Summary {
            throughput_avg,
            throughput_min: self.throughput_min.unwrap_or(0),
            throughput_max: self.throughput_max,
            turnaround_avg,
            overhead_max: self.overhead_max,
            overhead_avg,
            makespan: clock,
        }
    }

    fn close_interval(&mut self) {
        if self.finished_processes == 0 {
            return;
        }
        let count = self.completions_in_interval;
        self.throughput_min = Some(self.throughput_min.map_or(count, |min| min.min(count)));
    }
}
