use crate::api::config_dto::SimulationConfigDto;
use crate::domain::memory::memory_policy::MemoryPolicy;
use crate::domain::process::{PAGE_SIZE_KB, Time};
use crate::domain::scheduler::SchedulerType;
use crate::error::{Error, Result};

pub const DEFAULT_QUANTUM: Time = 10;

/// Settings of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub scheduler: SchedulerType,
    pub memory_policy: MemoryPolicy,

    /// Size of the memory pool in pages. Ignored for `MemoryPolicy::Unlimited`.
    pub memory_pages: usize,

    /// Round-robin time slice.
    pub quantum: Time,
}

impl SimulationConfig {
    pub fn new(scheduler: SchedulerType, memory_policy: MemoryPolicy, memory_pages: usize) -> Self {
        SimulationConfig { scheduler, memory_policy, memory_pages, quantum: DEFAULT_QUANTUM }
    }

    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = quantum;
        self
    }

    /// Builds a config from its JSON form. Memory size there is in KB.
    pub fn from_dto(dto: &SimulationConfigDto) -> Result<Self> {
        let scheduler = dto.scheduler.parse::<SchedulerType>()?;
        let memory_policy = dto.memory_policy.parse::<MemoryPolicy>()?;
        let memory_pages = dto.memory_size_kb.unwrap_or(0) / PAGE_SIZE_KB;

        let config = SimulationConfig::new(scheduler, memory_policy, memory_pages).with_quantum(dto.quantum.unwrap_or(DEFAULT_QUANTUM));
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.quantum == 0 {
            return Err(Error::InvalidConfig("round-robin quantum must be at least 1".to_string()));
        }
        if !self.memory_policy.is_unlimited() && self.memory_pages == 0 {
            return Err(Error::InvalidConfig(format!("memory policy '{}' needs a memory size of at least one page ({} KB)", self.memory_policy, PAGE_SIZE_KB)));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig::new(SchedulerType::default(), MemoryPolicy::default(), 0)
    }
}
