use std::fmt;

use crate::domain::process::{FrameIndex, Process};
use crate::error::{Error, Result};

/// Fixed minimum working set, in pages, a process must hold to run under the partial-load policies.
pub const MIN_RESIDENT_PAGES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Free,
    Occupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utilization {
    /// Memory is not modelled; every process is assumed to fit.
    Unlimited,
    Percent(u8),
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Utilization::Unlimited => write!(f, "unlimited"),
            Utilization::Percent(percent) => write!(f, "{}%", percent),
        }
    }
}

/// Physical memory as an array of page frames.
#[derive(Debug, Clone)]
pub struct MemoryPool {
    frames: Vec<FrameState>,
    empty_pages: usize,
    utilization: Utilization,
}

impl MemoryPool {
    pub fn new(total_pages: usize) -> Self {
        MemoryPool { frames: vec![FrameState::Free; total_pages], empty_pages: total_pages, utilization: Utilization::Percent(0) }
    }

    /// A pool for runs without memory management. It has no frames and reports `Unlimited`.
    pub fn unlimited() -> Self {
        MemoryPool { frames: Vec::new(), empty_pages: 0, utilization: Utilization::Unlimited }
    }

    pub fn total_pages(&self) -> usize {
        self.frames.len()
    }

    pub fn empty_pages(&self) -> usize {
        self.empty_pages
    }

    pub fn occupied_pages(&self) -> usize {
        self.total_pages() - self.empty_pages
    }

    pub fn utilization(&self) -> Utilization {
        self.utilization
    }

    pub fn frame_state(&self, frame: FrameIndex) -> Option<FrameState> {
        self.frames.get(frame).copied()
    }

    /// Hands the `requested` lowest free frames to `process` and returns how many were granted.
    ///
    /// Asking for more than is free aborts the run: policies are expected to evict first.
    /// Asking for more than the process is missing is rejected, so `held_frames` never outgrows
    /// `mem_req`.
    pub fn allocate(&mut self, process: &mut Process, requested: usize) -> Result<usize> {
        if requested > process.unloaded_pages() {
            return Err(Error::OverAllocation { pid: process.pid, requested, missing: process.unloaded_pages() });
        }
        if requested > self.empty_pages {
            return Err(Error::AllocationError {
                pid: process.pid,
                requested,
                available: self.empty_pages,
                total_pages: self.total_pages(),
            });
        }
        if requested == 0 {
            return Ok(0);
        }

        let mut claimed = Vec::with_capacity(requested);
        for (index, state) in self.frames.iter_mut().enumerate() {
            if claimed.len() == requested {
                break;
            }
            if *state == FrameState::Free {
                *state = FrameState::Occupied;
                claimed.push(index);
            }
        }

        self.empty_pages -= claimed.len();
        process.hold_frames(&claimed);
        self.recompute_utilization();
        debug_assert!(self.verify(), "free frame counter drifted after allocation");

        log::trace!("Allocated frames {:?} to pid {}", claimed, process.pid);
        Ok(claimed.len())
    }

    /// Frees the `count` lowest frames held by `process` and returns them in ascending order.
    ///
    /// Evicting nothing, or more than is held, is a caller bug: it is logged and the pool evicts
    /// what it can.
    pub fn evict(&mut self, process: &mut Process, count: usize) -> Vec<FrameIndex> {
        if count == 0 {
            log::error!("Eviction of 0 pages requested for pid {}; nothing to do.", process.pid);
            return Vec::new();
        }
        if count > process.pages_used() {
            log::error!("Expected to evict {} pages from pid {} but it only holds {}.", count, process.pid, process.pages_used());
        }

        let released = process.release_lowest_frames(count);
        for &frame in &released {
            match self.frames.get_mut(frame) {
                Some(state) if *state == FrameState::Occupied => {
                    *state = FrameState::Free;
                    self.empty_pages += 1;
                }
                Some(_) => log::error!("Frame {} released by pid {} was already free.", frame, process.pid),
                None => log::error!("Frame {} released by pid {} is outside the pool.", frame, process.pid),
            }
        }

        self.recompute_utilization();
        debug_assert!(self.verify(), "free frame counter drifted after eviction");

        released
    }

    /// Checks that the free counter matches the frame table.
    pub fn verify(&self) -> bool {
        self.frames.iter().filter(|state| **state == FrameState::Free).count() == self.empty_pages
    }

    fn recompute_utilization(&mut self) {
        if self.utilization == Utilization::Unlimited {
            return;
        }
        let total = self.total_pages();
        if total == 0 {
            self.utilization = Utilization::Percent(0);
            return;
        }
        let percent = (self.occupied_pages() * 100).div_ceil(total);
        self.utilization = Utilization::Percent(percent as u8);
    }
}

/// Frames `process` still needs before it holds the minimum working set (`MIN_RESIDENT_PAGES`, or
/// its whole requirement if that is smaller).
pub fn min_pages(process: &Process) -> usize {
    process.mem_req.min(MIN_RESIDENT_PAGES).saturating_sub(process.pages_used())
}
