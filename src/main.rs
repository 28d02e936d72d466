use anyhow::{Context, bail};
use clap::Parser;

use paging_scheduler_sim::api::config_dto::SimulationConfigDto;
use paging_scheduler_sim::domain::memory::memory_policy::MemoryPolicy;
use paging_scheduler_sim::domain::process::PAGE_SIZE_KB;
use paging_scheduler_sim::domain::scheduler::SchedulerType;
use paging_scheduler_sim::domain::simulator::config::SimulationConfig;
use paging_scheduler_sim::loader::parser::{parse_json_file, parse_process_file};
use paging_scheduler_sim::report::console::ConsoleReporter;
use paging_scheduler_sim::report::csv_export::CsvEventWriter;
use paging_scheduler_sim::traits::FanOutSink;
use paging_scheduler_sim::{logger, run_simulation};

/// Simulates CPU scheduling and paged memory allocation over a list of processes.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Process file, one `arrival_time pid memory_kb job_time` per line.
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Scheduling algorithm: ff, rr or cs.
    #[arg(short = 'a', long = "scheduler")]
    scheduler: Option<String>,

    /// Memory policy: u, p, v or cm.
    #[arg(short = 'm', long = "memory")]
    memory: Option<String>,

    /// Memory size in KB.
    #[arg(short = 's', long = "memory-size")]
    memory_size: Option<usize>,

    /// Round-robin quantum (default 10).
    #[arg(short = 'q', long = "quantum")]
    quantum: Option<u64>,

    /// JSON run description. Command line flags override its values.
    #[arg(long = "config")]
    config: Option<String>,

    /// Also write every event to this `;`-separated file.
    #[arg(long = "csv")]
    csv: Option<String>,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let dto = match &cli.config {
        Some(path) => Some(parse_json_file::<SimulationConfigDto>(path).with_context(|| format!("loading config '{}'", path))?),
        None => None,
    };

    let config = build_config(&cli, dto.as_ref())?;
    let process_file = match cli.file.clone().or_else(|| dto.as_ref().and_then(|d| d.process_file.clone())) {
        Some(path) => path,
        None => bail!("no process file given, use -f or set processFile in the config"),
    };
    let csv_path = cli.csv.clone().or_else(|| dto.as_ref().and_then(|d| d.events_csv.clone()));

    let processes = parse_process_file(&process_file).with_context(|| format!("reading processes from '{}'", process_file))?;

    let mut sink = FanOutSink::new().with(ConsoleReporter::stdout());
    if let Some(path) = csv_path {
        sink = sink.with(CsvEventWriter::from_path(&path)?);
    }

    run_simulation(config, processes, &mut sink)?;
    Ok(())
}

fn build_config(cli: &Cli, dto: Option<&SimulationConfigDto>) -> anyhow::Result<SimulationConfig> {
    let mut config = match dto {
        Some(dto) => SimulationConfig::from_dto(dto)?,
        None => SimulationConfig::default(),
    };

    if let Some(name) = &cli.scheduler {
        config.scheduler = name.parse::<SchedulerType>()?;
    }
    if let Some(name) = &cli.memory {
        config.memory_policy = name.parse::<MemoryPolicy>()?;
    }
    if let Some(kb) = cli.memory_size {
        config.memory_pages = kb / PAGE_SIZE_KB;
    }
    if let Some(quantum) = cli.quantum {
        config.quantum = quantum;
    }

    config.validate()?;
    log::debug!("Resolved configuration: {:?}", config);
    Ok(config)
}
