use std::fmt;

/// Size of one page frame in KB. Memory requirements in the input are given in KB.
pub const PAGE_SIZE_KB: usize = 4;

pub type Pid = u32;
pub type FrameIndex = usize;
pub type Time = u64;

/// A simulated process.
///
/// `held_frames` always stays sorted ascending and never grows past `mem_req`, so `pages_used()`
/// is simply its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Time,

    /// Total execution units the process asked for. Never changes.
    pub job_time: Time,

    /// Execution units still owed. Starts at `job_time`, shrinks on each round-robin slice and
    /// grows when a partial load charges page faults.
    pub remaining_time: Time,

    /// Pages required for a full load.
    pub mem_req: usize,

    held_frames: Vec<FrameIndex>,
}

impl Process {
    /// Creates a process from an input 4-tuple. `mem_kb` is rounded down to whole pages.
    pub fn new(arrival_time: Time, pid: Pid, mem_kb: usize, job_time: Time) -> Self {
        Process { pid, arrival_time, job_time, remaining_time: job_time, mem_req: mem_kb / PAGE_SIZE_KB, held_frames: Vec::new() }
    }

    /// Creates a process whose requirement is already expressed in pages.
    pub fn with_pages(arrival_time: Time, pid: Pid, mem_req: usize, job_time: Time) -> Self {
        Process { pid, arrival_time, job_time, remaining_time: job_time, mem_req, held_frames: Vec::new() }
    }

    pub fn pages_used(&self) -> usize {
        self.held_frames.len()
    }

    pub fn held_frames(&self) -> &[FrameIndex] {
        &self.held_frames
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.pages_used() == self.mem_req
    }

    /// Pages still missing for a full load.
    pub fn unloaded_pages(&self) -> usize {
        self.mem_req.saturating_sub(self.pages_used())
    }

    pub(crate) fn hold_frames(&mut self, frames: &[FrameIndex]) {
        self.held_frames.extend_from_slice(frames);
        self.held_frames.sort_unstable();
    }

    /// Drops the `count` lowest held frames and returns them in ascending order.
    pub(crate) fn release_lowest_frames(&mut self, count: usize) -> Vec<FrameIndex> {
        let count = count.min(self.held_frames.len());
        self.held_frames.drain(..count).collect()
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pid {} (arrival {}, job {}, remaining {}, pages {}/{})",
            self.pid,
            self.arrival_time,
            self.job_time,
            self.remaining_time,
            self.pages_used(),
            self.mem_req
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_requirement_rounds_down_to_pages() {
        assert_eq!(Process::new(0, 1, 16, 10).mem_req, 4);
        assert_eq!(Process::new(0, 2, 19, 10).mem_req, 4);
        assert_eq!(Process::new(0, 3, 3, 10).mem_req, 0);
    }

    #[test]
    fn test_held_frames_stay_sorted() {
        let mut process = Process::with_pages(0, 1, 6, 10);
        process.hold_frames(&[7, 2]);
        process.hold_frames(&[5, 0]);
        assert_eq!(process.held_frames(), &[0, 2, 5, 7]);
        assert_eq!(process.pages_used(), 4);
        assert_eq!(process.unloaded_pages(), 2);

        assert_eq!(process.release_lowest_frames(3), vec![0, 2, 5]);
        assert_eq!(process.held_frames(), &[7]);
        assert!(!process.is_fully_loaded());
    }

    #[test]
    fn test_release_more_than_held_only_returns_held() {
        let mut process = Process::with_pages(0, 1, 4, 10);
        process.hold_frames(&[3]);
        assert_eq!(process.release_lowest_frames(5), vec![3]);
        assert_eq!(process.pages_used(), 0);
    }
}
