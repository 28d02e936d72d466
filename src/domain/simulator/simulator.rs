use crate::domain::memory::pool::MemoryPool;
use crate::domain::process::{Process, Time};
use crate::domain::ready_queue::{ReadyQueue, admit_arrivals};
use crate::domain::scheduler::RunSlice;
use crate::domain::simulator::config::SimulationConfig;
use crate::domain::simulator::event::SimulationEvent;
use crate::domain::statistics::{Statistics, Summary};
use crate::error::Result;
use crate::traits::EventSink;

/// Where the driver is within one pass of its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Admitting,
    Selecting,
    Loading,
    Running,
    Evicting,
    Finalizing,
}

/// Discrete-event driver. Owns the simulated clock, both queues, the memory pool and the
/// statistics of one run.
///
/// The clock only moves while idling (one unit at a time) and while a process runs.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    clock: Time,

    /// Processes that haven't arrived yet, by arrival time then pid.
    pending: ReadyQueue,

    /// Processes waiting for the CPU.
    arrived: ReadyQueue,

    pool: MemoryPool,
    statistics: Statistics,
    phase: DriverPhase,
}

impl Simulation {
    pub fn new(config: SimulationConfig, processes: Vec<Process>) -> Result<Self> {
        config.validate()?;

        let mut pending: ReadyQueue = processes.into_iter().collect();
        pending.stable_order_by_arrival_and_pid();
        let pool = config.memory_policy.create_pool(config.memory_pages);

        Ok(Simulation { config, clock: 0, pending, arrived: ReadyQueue::new(), pool, statistics: Statistics::new(), phase: DriverPhase::Idle })
    }

    pub fn clock(&self) -> Time {
        self.clock
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn pool(&self) -> &MemoryPool {
        &self.pool
    }

    pub fn pending(&self) -> &ReadyQueue {
        &self.pending
    }

    pub fn arrived(&self) -> &ReadyQueue {
        &self.arrived
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && self.arrived.is_empty()
    }

    /// Runs until both queues are empty, then emits and returns the summary.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> Result<Summary> {
        log::info!(
            "Starting simulation: {} processes, scheduler {}, memory {} ({} pages), quantum {}",
            self.pending.len(),
            self.config.scheduler,
            self.config.memory_policy,
            self.pool.total_pages(),
            self.config.quantum
        );

        while !self.is_finished() {
            self.step(sink)?;
        }

        self.set_phase(DriverPhase::Finalizing);
        let summary = self.statistics.finalize(self.clock);
        sink.on_event(&SimulationEvent::Summary(summary.clone()))?;

        log::info!("Simulation finished at t={} after {} completions.", self.clock, self.statistics.finished_processes());
        Ok(summary)
    }

    /// One pass of the loop: admit arrivals, then either wait one time unit or dispatch the next
    /// process.
    pub fn step(&mut self, sink: &mut dyn EventSink) -> Result<()> {
        self.set_phase(DriverPhase::Admitting);
        admit_arrivals(self.clock, &mut self.pending, &mut self.arrived);

        self.set_phase(DriverPhase::Selecting);
        self.config.scheduler.prepare(&mut self.arrived);

        match self.arrived.pop_front() {
            Some(process) => self.dispatch(process, sink),
            None => {
                self.set_phase(DriverPhase::Idle);
                self.clock += 1;
                Ok(())
            }
        }
    }

    fn dispatch(&mut self, mut process: Process, sink: &mut dyn EventSink) -> Result<()> {
        self.set_phase(DriverPhase::Loading);
        let load = self.config.memory_policy.apply(self.clock, &mut self.pool, &mut self.arrived, &mut process)?;

        if !load.evicted.is_empty() {
            sink.on_event(&SimulationEvent::Evicted { clock: self.clock, frames: load.evicted })?;
        }

        sink.on_event(&SimulationEvent::Running {
            clock: self.clock,
            pid: process.pid,
            remaining_time: process.remaining_time,
            load_time: load.load_time,
            utilization: self.pool.utilization(),
            held_frames: process.held_frames().to_vec(),
        })?;

        self.set_phase(DriverPhase::Running);
        let slice = self.config.scheduler.plan_slice(&process, self.config.quantum);
        self.clock += slice.duration() + load.load_time;
        log::debug!("pid {} ran {:?} (+{} loading), clock now {}", process.pid, slice, load.load_time, self.clock);

        // Arrivals during the run queue up ahead of a preempted process.
        admit_arrivals(self.clock, &mut self.pending, &mut self.arrived);

        match slice {
            RunSlice::Quantum(quantum) => {
                process.remaining_time -= quantum;
                self.arrived.push_back(process);
                Ok(())
            }
            RunSlice::Complete(_) => self.finish(process, sink),
        }
    }

    fn finish(&mut self, mut process: Process, sink: &mut dyn EventSink) -> Result<()> {
        self.set_phase(DriverPhase::Evicting);
        if !self.config.memory_policy.is_unlimited() && process.pages_used() > 0 {
            let held = process.pages_used();
            let frames = self.pool.evict(&mut process, held);
            sink.on_event(&SimulationEvent::Evicted { clock: self.clock, frames })?;
        }

        self.statistics.record_completion(self.clock, &process);
        sink.on_event(&SimulationEvent::Finished { clock: self.clock, pid: process.pid, arrived_remaining: self.arrived.len() })
    }

    fn set_phase(&mut self, phase: DriverPhase) {
        if self.phase != phase {
            log::trace!("t={} {:?} -> {:?}", self.clock, self.phase, phase);
            self.phase = phase;
        }
    }
}
