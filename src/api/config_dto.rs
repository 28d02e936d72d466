use serde::Deserialize;

/// JSON form of a simulation run.
///
/// ```json
/// { "processFile": "processes.txt", "scheduler": "rr", "memoryPolicy": "cm", "memorySizeKb": 400, "quantum": 10 }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfigDto {
    pub process_file: Option<String>,
    pub scheduler: String,
    pub memory_policy: String,
    pub memory_size_kb: Option<usize>,
    pub quantum: Option<u64>,
    pub events_csv: Option<String>,
}
