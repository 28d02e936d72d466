use crate::domain::process::{FrameIndex, Time};

pub mod fair_share;
pub mod memory_policy;
pub mod pool;
pub mod swapping;
pub mod virtual_memory;

/// Paging in costs two time units per frame.
pub const LOAD_TIME_PER_PAGE: Time = 2;

/// Outcome of preparing a process's memory for a dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLoad {
    /// Time charged on top of the run for paging in newly granted frames.
    pub load_time: Time,

    /// Frames taken from other ready processes to make room, ascending.
    pub evicted: Vec<FrameIndex>,
}

impl MemoryLoad {
    pub fn new(granted_pages: usize, mut evicted: Vec<FrameIndex>) -> Self {
        evicted.sort_unstable();
        MemoryLoad { load_time: LOAD_TIME_PER_PAGE * granted_pages as Time, evicted }
    }
}
