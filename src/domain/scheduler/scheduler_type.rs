use std::fmt;
use std::str::FromStr;

use crate::domain::process::{Process, Time};
use crate::domain::ready_queue::ReadyQueue;
use crate::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerType {
    /// First come, first served. Runs each process to completion in arrival order.
    #[default]
    Fcfs,

    /// Runs the head for at most one quantum, then requeues it at the tail.
    ///
    /// Partial-load policies charge their page faults again on every dispatch. A process whose
    /// charge per dispatch is at least the quantum never finishes.
    RoundRobin,

    /// Picks the arrived process with the shortest original job and runs it to completion.
    ShortestRemaining,
}

/// How long a dispatched process gets the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunSlice {
    /// Runs for the given time and finishes.
    Complete(Time),

    /// Runs for one quantum and goes back to the arrived queue.
    Quantum(Time),
}

impl RunSlice {
    pub fn duration(&self) -> Time {
        match self {
            RunSlice::Complete(time) | RunSlice::Quantum(time) => *time,
        }
    }
}

impl SchedulerType {
    /// Puts the arrived queue in dispatch order. Only shortest-job selection reorders.
    pub fn prepare(&self, arrived: &mut ReadyQueue) {
        if *self == SchedulerType::ShortestRemaining {
            arrived.order_by_job_time();
        }
    }

    /// Run-to-completion schedulers serve the original `job_time`; page-fault charges only
    /// lengthen round-robin runs.
    pub fn plan_slice(&self, process: &Process, quantum: Time) -> RunSlice {
        match self {
            SchedulerType::RoundRobin if process.remaining_time > quantum => RunSlice::Quantum(quantum),
            SchedulerType::RoundRobin => RunSlice::Complete(process.remaining_time),
            SchedulerType::Fcfs | SchedulerType::ShortestRemaining => RunSlice::Complete(process.job_time),
        }
    }
}

impl FromStr for SchedulerType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ff" | "fcfs" => Ok(SchedulerType::Fcfs),
            "rr" | "round-robin" | "roundrobin" => Ok(SchedulerType::RoundRobin),
            "cs" | "sjf" | "shortest" => Ok(SchedulerType::ShortestRemaining),
            _ => Err(ConversionError::UnknownSchedulerType(s.to_string())),
        }
    }
}

impl fmt::Display for SchedulerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedulerType::Fcfs => "first-come-first-served",
            SchedulerType::RoundRobin => "round-robin",
            SchedulerType::ShortestRemaining => "shortest-job",
        };
        write!(f, "{}", name)
    }
}
