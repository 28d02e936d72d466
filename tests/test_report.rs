use paging_scheduler_sim::domain::memory::memory_policy::MemoryPolicy;
use paging_scheduler_sim::domain::process::Process;
use paging_scheduler_sim::domain::scheduler::SchedulerType;
use paging_scheduler_sim::domain::simulator::config::SimulationConfig;
use paging_scheduler_sim::report::console::ConsoleReporter;
use paging_scheduler_sim::report::csv_export::CsvEventWriter;
use paging_scheduler_sim::run_simulation;
use paging_scheduler_sim::traits::{FanOutSink, RecordingSink};

#[test]
fn test_console_report_for_unlimited_memory() {
    let config = SimulationConfig::new(SchedulerType::Fcfs, MemoryPolicy::Unlimited, 0);
    let mut reporter = ConsoleReporter::new(Vec::new());
    run_simulation(config, vec![Process::new(0, 1, 0, 10), Process::new(1, 2, 0, 5)], &mut reporter).unwrap();

    let expected = "\
0, RUNNING, id=1, remaining-time=10
10, FINISHED, id=1, proc-remaining=1
10, RUNNING, id=2, remaining-time=5
15, FINISHED, id=2, proc-remaining=0
Throughput 2, 2, 2
Turnaround time 12
Time overhead 2.80 1.90
Makespan 15
";
    assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(), expected);
}

#[test]
fn test_console_report_for_virtual_memory() {
    let config = SimulationConfig::new(SchedulerType::Fcfs, MemoryPolicy::Virtual, 4);
    let mut reporter = ConsoleReporter::new(Vec::new());
    run_simulation(config, vec![Process::new(0, 1, 32, 10)], &mut reporter).unwrap();

    let text = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "0, RUNNING, id=1, remaining-time=14, load-time=8, mem-usage=100%, mem-addresses=[0,1,2,3]");
    assert_eq!(lines[1], "18, EVICTED, mem-addresses=[0,1,2,3]");
    assert_eq!(lines[2], "18, FINISHED, id=1, proc-remaining=0");
    assert_eq!(lines[6], "Makespan 18");
}

#[test]
fn test_fan_out_feeds_every_sink() {
    let config = SimulationConfig::new(SchedulerType::RoundRobin, MemoryPolicy::Swap, 8).with_quantum(5);
    let mut recorder = RecordingSink::new();
    let mut csv = CsvEventWriter::new(Vec::new());

    {
        let mut sink = FanOutSink::new().with(&mut recorder).with(&mut csv);
        run_simulation(config, vec![Process::new(0, 1, 8, 12)], &mut sink).unwrap();
    }

    let rows = String::from_utf8(csv.into_inner().unwrap()).unwrap();
    // Header plus one row per event.
    assert_eq!(rows.lines().count(), recorder.events.len() + 1);
    assert!(rows.lines().last().unwrap().starts_with("16;SUMMARY;"));
}
