use crate::domain::memory::pool::Utilization;
use crate::domain::process::{FrameIndex, Pid, Time};
use crate::domain::statistics::Summary;

/// Everything the driver reports while a simulation runs, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A process got the CPU. `remaining_time` already includes any page-fault charge of this dispatch.
    Running { clock: Time, pid: Pid, remaining_time: Time, load_time: Time, utilization: Utilization, held_frames: Vec<FrameIndex> },

    /// Frames were released, either to make room for a dispatch or because a process finished.
    Evicted { clock: Time, frames: Vec<FrameIndex> },

    /// A process completed. `arrived_remaining` counts the processes still waiting to run.
    Finished { clock: Time, pid: Pid, arrived_remaining: usize },

    Summary(Summary),
}

impl SimulationEvent {
    pub fn clock(&self) -> Option<Time> {
        match self {
            SimulationEvent::Running { clock, .. } | SimulationEvent::Evicted { clock, .. } | SimulationEvent::Finished { clock, .. } => Some(*clock),
            SimulationEvent::Summary(summary) => Some(summary.makespan),
        }
    }
}
