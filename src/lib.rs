use crate::domain::process::Process;
use crate::domain::simulator::config::SimulationConfig;
use crate::domain::simulator::simulator::Simulation;
use crate::domain::statistics::Summary;
use crate::error::Result;
use crate::traits::EventSink;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;
pub mod traits;

/// Runs `processes` under `config` to completion, streaming every event into `sink`.
pub fn run_simulation(config: SimulationConfig, processes: Vec<Process>, sink: &mut dyn EventSink) -> Result<Summary> {
    let mut simulation = Simulation::new(config, processes)?;
    simulation.run(sink)
}
