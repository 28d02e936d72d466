use std::fmt;
use std::str::FromStr;

use crate::domain::memory::pool::MemoryPool;
use crate::domain::memory::{MemoryLoad, fair_share, swapping, virtual_memory};
use crate::domain::process::{Process, Time};
use crate::domain::ready_queue::ReadyQueue;
use crate::error::{ConversionError, Result};

/// Memory allocation strategy, picked once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryPolicy {
    /// Memory is not modelled.
    #[default]
    Unlimited,

    /// Load every process fully, swapping out whole processes to make room.
    Swap,

    /// Run with a minimum working set, page-fault for the rest.
    Virtual,

    /// Share memory in proportion to the remaining CPU time of the ready processes.
    Fair,
}

impl MemoryPolicy {
    pub fn is_unlimited(&self) -> bool {
        *self == MemoryPolicy::Unlimited
    }

    /// Pool to use for a run under this policy.
    pub fn create_pool(&self, total_pages: usize) -> MemoryPool {
        match self {
            MemoryPolicy::Unlimited => MemoryPool::unlimited(),
            _ => MemoryPool::new(total_pages),
        }
    }

    /// Prepares the memory of `process`, which has just been taken off the arrived queue and is
    /// about to run. Other ready processes may lose frames.
    pub fn apply(&self, clock: Time, pool: &mut MemoryPool, arrived: &mut ReadyQueue, process: &mut Process) -> Result<MemoryLoad> {
        match self {
            MemoryPolicy::Unlimited => Ok(MemoryLoad::default()),
            MemoryPolicy::Swap => swapping::swap_in(clock, pool, arrived, process),
            MemoryPolicy::Virtual => virtual_memory::load_partially(clock, pool, arrived, process),
            MemoryPolicy::Fair => fair_share::load_fair_share(clock, pool, arrived, process),
        }
    }
}

impl FromStr for MemoryPolicy {
    type Err = ConversionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u" | "unlimited" => Ok(MemoryPolicy::Unlimited),
            "p" | "swap" | "swapping" => Ok(MemoryPolicy::Swap),
            "v" | "virtual" => Ok(MemoryPolicy::Virtual),
            "cm" | "fair" => Ok(MemoryPolicy::Fair),
            _ => Err(ConversionError::UnknownMemoryPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for MemoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MemoryPolicy::Unlimited => "unlimited",
            MemoryPolicy::Swap => "swap",
            MemoryPolicy::Virtual => "virtual",
            MemoryPolicy::Fair => "fair",
        };
        write!(f, "{}", name)
    }
}
