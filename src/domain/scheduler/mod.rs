pub mod scheduler_type;

pub use scheduler_type::{RunSlice, SchedulerType};
