pub mod memory;
pub mod process;
pub mod ready_queue;
pub mod scheduler;
pub mod simulator;
pub mod statistics;
